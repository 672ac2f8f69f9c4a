use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AllocationBreakdown, ProtocolInfo, ShareResult, ValuationParams, ValuationResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub share: ShareResult,
    pub params: ValuationParams,
    pub valuation: ValuationResult,
    pub allocation: AllocationBreakdown,
    pub calculated_at: DateTime<Utc>,
    /// Protocol and activity window the inputs describe, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ProtocolInfo>,
}
