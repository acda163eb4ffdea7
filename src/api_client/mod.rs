mod auth;
mod client;
mod device;
mod fetch_error;
mod tab;

pub use auth::{bucket_from_timestamp, current_time_bucket, derive_key, format_bucket, USER_AGENT};
pub use client::{TabApiClient, TabSource, UG_API_BASE};
pub use device::{is_valid_device_id, DeviceIdentity};
pub use fetch_error::FetchError;
pub use tab::TabRecord;

#[cfg(test)]
pub use client::MockTabSource;
