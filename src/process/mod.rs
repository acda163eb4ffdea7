mod backup;
mod extract;

pub use backup::{extract_tab_ids, BackupError};
pub use extract::{extract_all_tabs, ExtractSummary};
