use crate::error::SourceError;
use crate::resource::{mock_resources, Collection, Resource};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Supplies the canonical resource collection.
pub trait ResourceSource {
    fn load(&self) -> Result<Vec<Resource>, SourceError>;

    fn describe(&self) -> String;

    fn load_collection(&self) -> Result<Collection, SourceError> {
        Collection::new(self.load()?)
    }
}

/// The built-in sample library.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockSource;

impl ResourceSource for MockSource {
    fn load(&self) -> Result<Vec<Resource>, SourceError> {
        Ok(mock_resources())
    }

    fn describe(&self) -> String {
        "built-in sample library".to_string()
    }
}

/// A JSON array of resources, re-read on every load.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }
}

impl ResourceSource for JsonFileSource {
    fn load(&self) -> Result<Vec<Resource>, SourceError> {
        let content = fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        let resources: Vec<Resource> =
            serde_json::from_str(&content).map_err(|source| SourceError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = resources.len(), "loaded resources");
        Ok(resources)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
