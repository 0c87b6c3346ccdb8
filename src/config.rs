use std::{fs, path::Path, path::PathBuf, sync::Arc, time::Duration};

use serde::Deserialize;

use crate::{
    Result, StepflowError,
    store::{FilePositionStore, MemPositionStore, PositionStore},
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// grid layout for converted steps
    pub layout: LayoutConfig,
    /// node position persistence
    pub positions: PositionsConfig,
    /// backend api
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// number of grid columns, defaults to 3
    pub columns: usize,
    /// horizontal distance between columns
    pub column_spacing: f64,
    /// vertical distance between rows
    pub row_spacing: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            column_spacing: 300.0,
            row_spacing: 150.0,
            origin_x: 100.0,
            origin_y: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    #[default]
    Mem,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PositionsConfig {
    /// store type
    pub store_type: StoreType,
    /// directory for the file store
    pub dir: Option<PathBuf>,
    /// namespace prefix of the storage key
    pub key_prefix: String,
    /// debounce window in milliseconds, defaults to 500
    pub debounce_ms: u64,
}

impl Default for PositionsConfig {
    fn default() -> Self {
        Self {
            store_type: StoreType::Mem,
            dir: None,
            key_prefix: "workflow-positions".to_string(),
            debounce_ms: 500,
        }
    }
}

impl PositionsConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// backend base url, without a trailing slash
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
        }
    }
}

impl Config {
    pub fn load<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref()).map_err(|e| StepflowError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), e)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.layout.columns == 0 {
            return Err(StepflowError::Config("layout.columns must be at least 1".to_string()));
        }
        if self.positions.store_type == StoreType::File && self.positions.dir.is_none() {
            return Err(StepflowError::Config("positions.dir is required when store type is file".to_string()));
        }
        Ok(())
    }

    /// Build the configured position store.
    pub fn position_store(&self) -> Result<Arc<dyn PositionStore>> {
        let prefix = self.positions.key_prefix.clone();
        match self.positions.store_type {
            StoreType::Mem => Ok(Arc::new(MemPositionStore::new(prefix))),
            StoreType::File => {
                let dir = self.positions.dir.clone().ok_or_else(|| StepflowError::Config("positions.dir is required when store type is file".to_string()))?;
                Ok(Arc::new(FilePositionStore::new(dir, prefix)?))
            }
        }
    }
}
