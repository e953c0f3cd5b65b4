mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ApiSettings, CacheSettings, LoggingSettings, ProvisioningSettings, Settings,
};
