//! Output file helpers

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Lexically normalize a path (`a/./b/../c` -> `a/c`)
pub fn normalize_path(path: &Path) -> PathBuf {
    path_clean::clean(path)
}

/// Create the parent directory of `path` if it does not exist yet
pub fn ensure_parent_dir(path: &Path) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write `lines` joined by `\n`, without a trailing newline.
///
/// The file is created or truncated. Returns the normalized path written.
pub fn write_lines<I, S>(path: &Path, lines: I) -> crate::Result<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = normalize_path(path);
    if path.is_dir() {
        return Err(crate::UtilError::PathOperation(format!(
            "Output path is a directory: {}",
            path.display()
        )));
    }
    ensure_parent_dir(&path)?;

    let mut writer = std::io::BufWriter::new(fs::File::create(&path)?);
    for (index, line) in lines.into_iter().enumerate() {
        if index > 0 {
            writer.write_all(b"\n")?;
        }
        writer.write_all(line.as_ref().as_bytes())?;
    }
    writer.flush()?;

    Ok(path)
}
