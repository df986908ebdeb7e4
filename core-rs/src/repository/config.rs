/**
 * config.rs
 * External repository configurations, resolved by alias
 *
 * Every serialized reference names the repository that holds its data
 * via `arf:repositoryAlias`. The actual connection details (SSH host,
 * SPARQL endpoint) live outside the graph, in per-repository config
 * files:
 *
 * ```yaml
 * apiVersion: artifactref/v1
 * kind: Repository
 * metadata:
 *   alias: cluster-store
 *   label: Institute compute cluster
 * spec:
 *   protocol: ssh
 *   host: data.cluster.example.org
 *   basePath: /export/artifacts
 * ```
 */

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::errors::{ArfError, Result};

/// Repository config file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConfig {
    pub api_version: String,
    pub kind: String,
    pub metadata: RepositoryMetadata,
    pub spec: RepositorySpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositoryMetadata {
    pub alias: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Connection details for one external repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySpec {
    /// "ssh" or "sparql"
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

/// A registered repository config plus registration bookkeeping
#[derive(Debug, Clone)]
pub struct RepositoryEntry {
    pub config: RepositoryConfig,
    pub registered_at: String,
    pub source: Option<PathBuf>,
}

/// Alias-keyed registry of repository configurations
///
/// Aliases are exclusive here, unlike processor keys: a reference must
/// resolve to exactly one repository.
pub struct RepositoryConfigRegistry {
    entries: HashMap<String, RepositoryEntry>,
}

impl RepositoryConfigRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register one configuration
    ///
    /// # Errors
    /// `RepositoryAlreadyRegistered` when the alias is taken.
    pub fn register(&mut self, config: RepositoryConfig) -> Result<()> {
        self.register_from(config, None)
    }

    fn register_from(&mut self, config: RepositoryConfig, source: Option<PathBuf>) -> Result<()> {
        let alias = config.metadata.alias.clone();
        if alias.is_empty() {
            return Err(ArfError::ValidationError(
                "repository alias must not be empty".to_string(),
            ));
        }
        if self.entries.contains_key(&alias) {
            return Err(ArfError::RepositoryAlreadyRegistered(alias));
        }

        self.entries.insert(
            alias,
            RepositoryEntry {
                config,
                registered_at: chrono::Utc::now().to_rfc3339(),
                source,
            },
        );
        Ok(())
    }

    /// Resolve an alias to its registered entry
    pub fn resolve(&self, alias: &str) -> Result<&RepositoryEntry> {
        self.entries
            .get(alias)
            .ok_or_else(|| ArfError::RepositoryConfigNotFound(alias.to_string()))
    }

    pub fn aliases(&self) -> Vec<&str> {
        self.entries.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load every `.yaml`/`.yml`/`.json` config under `dir`
    ///
    /// Malformed files are skipped with a warning; a duplicate alias in
    /// a second file is skipped the same way. Returns the number of
    /// configs registered.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            return Err(ArfError::Path(format!(
                "not a config directory: {}",
                dir.display()
            )));
        }

        let mut registered = 0;
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            let config = match path.extension().and_then(|s| s.to_str()) {
                Some("yaml") | Some("yml") => {
                    let content = fs::read_to_string(path)?;
                    match serde_yaml::from_str::<RepositoryConfig>(&content) {
                        Ok(config) => config,
                        Err(e) => {
                            eprintln!(
                                "[RepositoryConfigRegistry] Skipping {}: {}",
                                path.display(),
                                e
                            );
                            continue;
                        }
                    }
                }
                Some("json") => {
                    let content = fs::read_to_string(path)?;
                    match serde_json::from_str::<RepositoryConfig>(&content) {
                        Ok(config) => config,
                        Err(e) => {
                            eprintln!(
                                "[RepositoryConfigRegistry] Skipping {}: {}",
                                path.display(),
                                e
                            );
                            continue;
                        }
                    }
                }
                _ => continue,
            };

            match self.register_from(config, Some(path.to_path_buf())) {
                Ok(()) => registered += 1,
                Err(e) => {
                    eprintln!(
                        "[RepositoryConfigRegistry] Skipping {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }
        Ok(registered)
    }
}

impl Default for RepositoryConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}
