//! CSV table read/write with atomic replace.

use super::StorageError;
use crate::normalize::OutputRow;
use std::io::Write;
use std::path::Path;

/// Read all rows from `path`. Returns `Ok(None)` if the file does not exist.
pub(super) fn read_rows(path: &Path) -> Result<Option<Vec<OutputRow>>, StorageError> {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::Open {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let mut reader = csv::Reader::from_reader(file);
    let rows = reader
        .deserialize::<OutputRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| StorageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(rows))
}

/// Directory the temp file is created in: the target's parent, or `.` for a bare file name.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Write header + rows to a temp file beside `path`, fsync, then rename over `path`.
pub(super) fn write_rows_atomic(path: &Path, rows: &[OutputRow]) -> Result<(), StorageError> {
    let dir = parent_dir(path);
    std::fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".dexfetch-")
        .suffix(".csv.tmp")
        .tempfile_in(dir)
        .map_err(|source| StorageError::Open {
            path: dir.to_path_buf(),
            source,
        })?;

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        let encode = |source| StorageError::Encode {
            path: path.to_path_buf(),
            source,
        };
        // Written explicitly so an empty table still carries its header.
        writer
            .write_record(crate::normalize::COLUMNS)
            .map_err(encode)?;
        for row in rows {
            writer.serialize(row).map_err(encode)?;
        }
        writer.flush().map_err(|source| StorageError::Flush {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let flush_err = |source| StorageError::Flush {
        path: path.to_path_buf(),
        source,
    };
    tmp.as_file_mut().flush().map_err(flush_err)?;
    tmp.as_file().sync_all().map_err(flush_err)?;

    tmp.persist(path).map_err(|e| StorageError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
