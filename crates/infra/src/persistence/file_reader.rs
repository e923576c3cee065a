// crates/infra/src/persistence/file_reader.rs
use std::{fs, io, path::Path};

use notestat_shared_kernel::{InfraResult, InfrastructureError};

/// Text reads with the error mapping every adapter shares.
pub struct FileReader;

impl FileReader {
    /// Read a UTF-8 file, dropping a leading BOM.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::FileRead` for I/O failures and invalid UTF-8.
    pub fn read_text(path: &Path) -> InfraResult<String> {
        let bytes = fs::read(path).map_err(|source| InfrastructureError::FileRead { path: path.to_path_buf(), source })?;
        let text = String::from_utf8(bytes).map_err(|err| InfrastructureError::FileRead {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidData, err),
        })?;
        match text.strip_prefix('\u{feff}') {
            Some(stripped) => Ok(stripped.to_owned()),
            None => Ok(text),
        }
    }

    /// Like [`Self::read_text`], but a missing file is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::FileRead` for any failure other than "not found".
    pub fn read_optional(path: &Path) -> InfraResult<Option<String>> {
        match Self::read_text(path) {
            Ok(text) => Ok(Some(text)),
            Err(InfrastructureError::FileRead { source, .. }) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}
