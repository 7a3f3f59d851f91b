use crate::model::{RepoEntity, sort_entities};
use anyhow::Context;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read repo list {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse repo list {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// The on-disk repo list. A missing file loads as the empty default; the
/// dashboard then simply renders nothing.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RepoConfig {
    #[serde(default)]
    pub repos: Vec<RepoRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub push: bool,
}

impl RepoConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_yaml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Builds the sorted entity list. `pending_check` seeds a full check
    /// pass, which every (re)load wants so the first render reflects reality.
    pub fn into_entities(self, pending_check: bool) -> Vec<RepoEntity> {
        let mut entities: Vec<RepoEntity> = self
            .repos
            .into_iter()
            .map(|record| {
                let mut entity = RepoEntity::new(record.name, record.path, record.push);
                entity.pending_check = pending_check;
                entity
            })
            .collect();
        sort_entities(&mut entities);
        entities
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let dirs = UserDirs::new().context("resolve home directory")?;
    Ok(dirs.home_dir().join(".repos.yaml"))
}
