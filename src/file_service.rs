//! Whole-file reads and writes with progress logging.

use crate::error::CommanderError;
use crate::logging::Logger;
use std::fs;
use std::path::Path;

pub struct FileService<'a> {
    logger: &'a Logger,
}

impl<'a> FileService<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        Self { logger }
    }

    /// Reads the whole file into a string.
    ///
    /// # Errors
    ///
    /// Returns [`CommanderError::FileRead`] when the path is missing,
    /// unreadable or not valid UTF-8.
    pub fn read_file(&self, path: &Path) -> Result<String, CommanderError> {
        self.logger.log(&format!("Reading file: {}", path.display()));
        fs::read_to_string(path).map_err(|source| {
            self.logger.log(&format!("Error reading file: {}", source));
            CommanderError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Writes `content` to `path`, replacing anything already there.
    ///
    /// # Errors
    ///
    /// Returns [`CommanderError::FileWrite`] when the file cannot be created,
    /// e.g. permission denied or a missing parent directory.
    pub fn write_file(&self, path: &Path, content: &str) -> Result<(), CommanderError> {
        self.logger.log(&format!("Writing to file: {}", path.display()));
        fs::write(path, content).map_err(|source| {
            self.logger.log(&format!("Error writing file: {}", source));
            CommanderError::FileWrite {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}
