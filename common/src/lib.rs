pub mod bulb;
pub mod error;
pub mod light;
pub mod settings;
pub mod sunset;
pub mod timeline;

pub use error::ConfigurationError;
pub use light::LightSetting;
pub use settings::{ ConfigProvider, Settings };
