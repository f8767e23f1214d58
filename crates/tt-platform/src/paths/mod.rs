mod ensure;
mod resolve;

pub use ensure::ensure_dirs;
pub use resolve::{crash_report_dir, data_dir, log_dir, webview_data_dir};
