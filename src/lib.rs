pub mod models;
pub mod config;
pub mod projection;
pub mod session;
pub mod data;
pub mod utils;
pub mod tui;

pub use models::{ActivityRow, ActivityType, Projection, ProjectorError, Result, ShareInput, ShareResult, ValuationParams, ValuationResult};
pub use config::Settings;
pub use projection::{AllocationNormalizer, HistoricalComparison, ProjectionCalculator, ShareEngine, ValuationEngine};
pub use session::FormSession;

// Re-export commonly used types
pub use rust_decimal::Decimal;
