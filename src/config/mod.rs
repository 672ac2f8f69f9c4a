pub mod settings;

pub use settings::{ActivitySettings, AppSettings, Settings, SliderRange, SliderSettings};
