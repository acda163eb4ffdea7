pub mod api_client;
pub mod configuration;
pub mod foundation;
pub mod process;
pub mod startup;

pub use api_client::{DeviceIdentity, FetchError, TabApiClient, TabRecord, TabSource};
pub use configuration::*;
pub use process::{extract_all_tabs, extract_tab_ids, ExtractSummary};
