pub mod domain;
pub mod error;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::imei::{format_grouped, normalize, validate, Imei, Rejection, Validation};
pub use domain::lookup::{CheckService, DeviceReport};
pub use error::{ConfigError, LookupError};
pub use infra::{DeviceLookup, ImeiInfoClient};
