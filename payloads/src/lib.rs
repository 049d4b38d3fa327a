//! Value types shared by the payment SDK: who gets paid, and what the merchant app is running on.
pub mod device_data;
pub mod json;
pub mod payee;

pub use device_data::DeviceData;
pub use json::OptionalStrings;
pub use payee::Payee;
