pub mod config;
pub mod imei_info;
pub mod logging;

pub use imei_info::{DeviceLookup, ImeiInfoClient};
