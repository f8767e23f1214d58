//! Open files and folders with the user's default handler.

use std::path::Path;

use tt_common::PlatformError;

pub fn open_path(path: &Path) -> Result<(), PlatformError> {
    open::that_detached(path)
        .map_err(|e| PlatformError::ShellError(format!("{}: {e}", path.display())))
}
