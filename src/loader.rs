//! Program source loading
//!
//! A program is the first line of a `.lc` file. Any further lines are ignored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::SourceSettings;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The provided file doesn't exist: {}", path.display())]
    Missing { path: PathBuf },

    #[error("The provided file is not a .{expected} file: {}", path.display())]
    WrongExtension { path: PathBuf, expected: String },

    #[error("Couldn't read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("The provided file is empty: {}", path.display())]
    Empty { path: PathBuf },
}

/// Read the program line from `path`
pub fn load_source(path: &Path, settings: &SourceSettings) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::Missing {
            path: path.to_path_buf(),
        });
    }

    if settings.require_extension {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if extension != settings.extension {
            return Err(LoadError::WrongExtension {
                path: path.to_path_buf(),
                expected: settings.extension.clone(),
            });
        }
    }

    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let line = text.lines().next().unwrap_or_default();
    if line.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), chars = line.chars().count(), "loaded source");
    Ok(line.to_string())
}
