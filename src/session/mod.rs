pub mod form;

pub use form::{FormSession, Slider};
