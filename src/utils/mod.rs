pub mod format;

pub use format::{format_currency, format_large_number, format_number, format_share};
