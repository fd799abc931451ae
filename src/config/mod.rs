pub mod settings;

pub use settings::{AppConfig, LocationSource, NotifierKind};
