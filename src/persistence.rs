// File: src/persistence.rs
use crate::error::Result;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Writes `path` through a temporary file in the same directory, so the
/// destination is either the old contents or the complete new output.
pub fn write_atomically<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut dyn Write) -> Result<T>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let mut writer = BufWriter::new(&temp_file);
    let value = write(&mut writer)?;
    writer.flush()?;
    drop(writer);

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(value)
}

/// Collects everything `write` produces and hands it to `out` only once
/// `write` has succeeded. A failed run leaves `out` untouched.
pub fn write_buffered<T, F>(out: &mut dyn Write, write: F) -> Result<T>
where
    F: FnOnce(&mut dyn Write) -> Result<T>,
{
    let mut buffer = Vec::new();
    let value = write(&mut buffer)?;
    out.write_all(&buffer)?;
    out.flush()?;
    Ok(value)
}
