//! File status helpers.
//!
//! The host keeps the source's modification time on every file it writes,
//! so that build systems comparing timestamps see compressed assets as no
//! newer than their sources.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;

/// Copies the modification time of `src` onto `dst`.
///
/// The access time of `dst` is set to now. Fails if `dst` is not a regular
/// file.
pub fn copy_file_time(src: &Path, dst: &Path) -> io::Result<()> {
    if !is_reg_file(dst) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "copy_file_time: not a regular file",
        ));
    }
    let meta = fs::metadata(src)?;
    let mtime = FileTime::from_last_modification_time(&meta);
    let atime = FileTime::from_system_time(SystemTime::now());
    filetime::set_file_times(dst, atime, mtime)
}

/// Returns `true` if `path` exists and is a regular file.
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Returns `true` if `path` exists and is a directory.
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}
