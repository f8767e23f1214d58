//! Native OS capabilities used by the host: well-known directories,
//! disk free-space queries, file/folder pickers, shell open, and crash
//! reports.

pub mod crash_report;
pub mod dialogs;
pub mod disk;
pub mod paths;
pub mod shell;

pub use disk::{disk_space, resolve_existing_directory, DiskSpace};
pub use paths::{crash_report_dir, data_dir, ensure_dirs, log_dir, webview_data_dir};
