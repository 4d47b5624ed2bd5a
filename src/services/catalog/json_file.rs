use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    services::catalog::CardSource,
};

/// Reads the catalog from a JSON array on disk
///
/// The file is read on every call so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct JsonFileCardSource {
    path: PathBuf,
}

impl JsonFileCardSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl CardSource for JsonFileCardSource {
    async fn load_raw(&self) -> AppResult<Vec<Value>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Error reading card file");
            AppError::Io(e)
        })?;

        match serde_json::from_str::<Value>(&contents)? {
            Value::Array(records) => Ok(records),
            _ => Err(AppError::CardSource(format!(
                "{} does not contain a JSON array",
                self.path.display()
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}
