pub mod settings;

pub use settings::{AppConfig, SalahConfig, TimesSource};
