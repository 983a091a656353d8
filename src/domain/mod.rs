//! Pure domain logic: IMEI validation and the device report model.

pub mod imei;
pub mod lookup;

pub use imei::{format_grouped, normalize, validate, Imei, Rejection, Validation};
pub use lookup::{CheckService, DeviceReport};
