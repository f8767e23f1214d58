//! Native file and folder pickers.
//!
//! A dismissed dialog is `None`, never an error.

use std::path::{Path, PathBuf};

/// Ask the user for a `.torrent` file.
pub fn pick_torrent_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open torrent")
        .add_filter("Torrent Files (*.torrent)", &["torrent"])
        .add_filter("All Files (*.*)", &["*"])
        .pick_file()
}

/// Ask the user for a folder, starting at `initial` when it exists.
pub fn pick_folder(initial: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title("Choose folder");
    if let Some(start) = initial.filter(|p| p.is_dir()) {
        dialog = dialog.set_directory(start);
    }
    dialog.pick_folder()
}
