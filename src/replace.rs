// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

use std::io::Write as _;
use std::path::{Path, PathBuf};

use cu::pre::*;

/// Path of the backup kept next to a replaced file
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

/// Error if `path` is write-protected or cannot be opened for writing
pub fn check_writable(path: &Path) -> cu::Result<()> {
    let metadata = std::fs::metadata(path)
        .context(format!("cannot stat '{}'", path.display()))?;
    // checked first, opening succeeds for root regardless of the mode
    if metadata.permissions().readonly() {
        cu::bail!("'{}' is write-protected", path.display());
    }
    if let Err(e) = std::fs::OpenOptions::new().write(true).open(path) {
        cu::bail!("'{}' is not writable: {e}", path.display());
    }
    Ok(())
}

/// Replace the content of an existing file without ever leaving it half
/// written.
///
/// The new content goes to a uniquely named temporary file in the same
/// directory, which is synced and given the permissions of the original.
/// The original is then moved to `<path>.bak` if `backup` is set, and the
/// temporary file is renamed into place.
pub fn replace_file(path: &Path, content: &[u8], backup: bool) -> cu::Result<()> {
    check_writable(path)?;
    let permissions = std::fs::metadata(path)?.permissions();
    let dir = match path.parent() {
        Some(x) if !x.as_os_str().is_empty() => x,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".blurb")
        .suffix(".tmp")
        .tempfile_in(dir)
        .context(format!("cannot create temporary file in '{}'", dir.display()))?;
    cu::trace!("writing '{}'", temp.path().display());
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    std::fs::set_permissions(temp.path(), permissions)?;

    if backup {
        let backup = backup_path(path);
        cu::debug!("backing up '{}' to '{}'", path.display(), backup.display());
        cu::fs::rename(path, &backup)?;
    }
    temp.persist(path)
        .context(format!("cannot replace '{}'", path.display()))?;
    Ok(())
}
