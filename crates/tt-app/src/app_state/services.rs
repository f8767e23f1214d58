//! Native services answering bridge requests against the live window.

use std::path::{Path, PathBuf};

use tt_bridge::{HostServices, PlacementError, WindowCommand};
use tt_common::PlatformError;
use tt_host::HostWindow;
use tt_platform::DiskSpace;

/// Borrowed view over the window for the duration of one request.
pub(super) struct AppServices<'a> {
    window: &'a mut HostWindow,
    ready: bool,
    close_requested: &'a mut bool,
}

impl<'a> AppServices<'a> {
    pub(super) fn new(window: &'a mut HostWindow, ready: bool, close_requested: &'a mut bool) -> Self {
        Self {
            window,
            ready,
            close_requested,
        }
    }
}

impl HostServices for AppServices<'_> {
    fn window_command(&mut self, command: WindowCommand) -> bool {
        if !self.ready {
            return false;
        }
        match command {
            // Runs after the response is posted.
            WindowCommand::Close => *self.close_requested = true,
            WindowCommand::Minimize => self.window.minimize(),
            WindowCommand::Maximize => self.window.toggle_maximize(),
        }
        true
    }

    fn pick_torrent_file(&mut self) -> Option<PathBuf> {
        tt_platform::dialogs::pick_torrent_file()
    }

    fn pick_folder(&mut self, initial: Option<&Path>) -> Option<PathBuf> {
        tt_platform::dialogs::pick_folder(initial)
    }

    fn disk_space(&mut self, dir: &Path) -> Result<DiskSpace, PlatformError> {
        tt_platform::disk_space(dir)
    }

    fn open_path(&mut self, path: &Path) -> Result<(), PlatformError> {
        tt_platform::shell::open_path(path)
    }

    fn persist_window_state(&mut self) -> Result<(), PlacementError> {
        if !self.ready {
            return Err(PlacementError::WindowUnavailable);
        }
        self.window.capture_placement().map(|_| ())
    }
}
