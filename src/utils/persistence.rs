use std::{
    fs::{self, File},
    io::{self, Write},
    path::Path,
};

use super::paths;

/// Replaces `path` with `contents` by staging to a sibling `.tmp` file and
/// renaming it into place. Missing parent directories are created.
///
/// Readers see either the previous file or the new one, never a partial write.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = paths::tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, path)
}
