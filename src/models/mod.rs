pub mod activity;
pub mod share;
pub mod valuation;
pub mod allocation;
pub mod history;
pub mod report;
pub mod error;

pub use activity::*;
pub use share::*;
pub use valuation::*;
pub use allocation::*;
pub use history::*;
pub use report::*;
pub use error::*;
