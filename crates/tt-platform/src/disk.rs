//! Disk free-space queries and existing-ancestor resolution.

use std::path::{Path, PathBuf};

use tt_common::PlatformError;

/// Free and total capacity of the volume holding a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskSpace {
    /// Bytes available to the calling user.
    pub free_bytes: u64,
    pub total_bytes: u64,
}

/// Walk up from `candidate` to the nearest existing directory.
///
/// The result is always an existing ancestor-or-self of the input. When
/// the nearest existing entry is a file, its parent directory is used.
/// Returns `None` for an empty input or when no ancestor exists.
pub fn resolve_existing_directory(candidate: &Path) -> Option<PathBuf> {
    if candidate.as_os_str().is_empty() {
        return None;
    }

    let mut dir = candidate.to_path_buf();
    while !dir.as_os_str().is_empty() && !dir.exists() {
        match dir.parent() {
            Some(parent) if parent != dir => dir = parent.to_path_buf(),
            _ => break,
        }
    }

    if dir.as_os_str().is_empty() || !dir.exists() {
        return None;
    }

    if !dir.is_dir() {
        let parent = dir.parent()?;
        if parent.as_os_str().is_empty() {
            return None;
        }
        dir = parent.to_path_buf();
    }

    Some(dir)
}

/// Query free/total bytes for the volume containing `dir`.
#[cfg(windows)]
pub fn disk_space(dir: &Path) -> Result<DiskSpace, PlatformError> {
    use windows::core::HSTRING;
    use windows::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;

    let mut free_bytes = 0u64;
    let mut total_bytes = 0u64;
    let wide = HSTRING::from(dir.as_os_str());
    unsafe {
        GetDiskFreeSpaceExW(
            &wide,
            Some(&mut free_bytes as *mut u64),
            Some(&mut total_bytes as *mut u64),
            None,
        )
    }
    .map_err(|e| PlatformError::DiskQueryError(format!("{}: {e}", dir.display())))?;

    Ok(DiskSpace {
        free_bytes,
        total_bytes,
    })
}

/// Query free/total bytes for the volume containing `dir`.
#[cfg(unix)]
pub fn disk_space(dir: &Path) -> Result<DiskSpace, PlatformError> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(dir.as_os_str().as_bytes())
        .map_err(|e| PlatformError::DiskQueryError(format!("{}: {e}", dir.display())))?;

    // SAFETY: `statvfs` is plain-old-data and fully written on success.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        let err = std::io::Error::last_os_error();
        return Err(PlatformError::DiskQueryError(format!(
            "{}: {err}",
            dir.display()
        )));
    }

    let fragment = stat.f_frsize as u64;
    Ok(DiskSpace {
        free_bytes: (stat.f_bavail as u64).saturating_mul(fragment),
        total_bytes: (stat.f_blocks as u64).saturating_mul(fragment),
    })
}

#[cfg(not(any(windows, unix)))]
pub fn disk_space(_dir: &Path) -> Result<DiskSpace, PlatformError> {
    Err(PlatformError::NotSupported("disk free-space query".into()))
}
