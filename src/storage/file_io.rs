//! JSON persistence for the book's data files
//!
//! Files are replaced through a sibling `.tmp` file and a rename, so a reader
//! sees either the old contents or the new ones. All failures surface as
//! [`BookError::Storage`] naming the file involved.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BookError;

/// Build a `map_err` adapter that names the failed action and file
fn storage_error<E: Display>(action: &'static str, path: &Path) -> impl FnOnce(E) -> BookError {
    let path = path.display().to_string();
    move |e| BookError::Storage(format!("Failed to {} {}: {}", action, path, e))
}

/// Load a data file; a missing file yields `T::default()`
pub fn read_json<T, P>(path: P) -> Result<T, BookError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(storage_error("open", path))?;
    serde_json::from_reader(BufReader::new(file)).map_err(storage_error("parse", path))
}

/// Replace a data file with `data` as pretty JSON
///
/// The temp file is synced before the rename and removed if any step fails.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BookError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(storage_error("create directory", parent))?;
    }

    let temp_path = temp_path_for(path);
    let result = write_synced(&temp_path, data)
        .and_then(|()| fs::rename(&temp_path, path).map_err(storage_error("replace", path)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced<T: Serialize>(temp_path: &Path, data: &T) -> Result<(), BookError> {
    let file = File::create(temp_path).map_err(storage_error("create", temp_path))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data).map_err(storage_error("write", temp_path))?;
    writer.flush().map_err(storage_error("flush", temp_path))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(storage_error("sync", temp_path))
}
