use std::fs;
use std::path::PathBuf;

use indexmap::IndexMap;
use log::debug;

use crate::GeneratedFile;
use crate::error::SinkError;

/// Receives rendered files. Writes aren't retried.
pub trait FileSink {
    fn write(&mut self, file: &GeneratedFile) -> Result<(), SinkError>;
}

/// Writes files below a root directory, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSink for DirectorySink {
    fn write(&mut self, file: &GeneratedFile) -> Result<(), SinkError> {
        let path = file
            .path
            .split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment));
        let err = |source| SinkError {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(err)?;
        }
        fs::write(&path, &file.content).map_err(err)?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}

/// Keeps files in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: IndexMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }
}

impl FileSink for MemorySink {
    fn write(&mut self, file: &GeneratedFile) -> Result<(), SinkError> {
        self.files.insert(file.path.clone(), file.content.clone());
        Ok(())
    }
}
