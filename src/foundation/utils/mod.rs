mod content;
mod filename;

pub use content::{format_content, strip_markup};
pub use filename::{generate_filename, sanitize_filename};
