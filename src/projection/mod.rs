pub mod share;
pub mod valuation;
pub mod allocation;
pub mod comparison;
pub mod calculator;

pub use share::ShareEngine;
pub use valuation::ValuationEngine;
pub use allocation::AllocationNormalizer;
pub use comparison::{AirdropHistory, HistoricalComparison, StaticHistory};
pub use calculator::ProjectionCalculator;
