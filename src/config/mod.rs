use crate::errors::{AppError, AppResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_URL: &str = "DUMPRESTORE_URL";
pub const ENV_KEY: &str = "DUMPRESTORE_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file holding the restore journal (log + runs)
    #[serde(default = "default_journal")]
    pub journal: String,
    /// Base URL of the hosted backend (REST target)
    #[serde(default)]
    pub backend_url: String,
    /// Service key sent as `apikey` and bearer token
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_true")]
    pub strip_comments: bool,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Tables replayed first, in this order
    #[serde(default)]
    pub table_order: Vec<String>,
    /// table → tables that must be restored before it
    #[serde(default = "default_dependencies")]
    pub dependencies: IndexMap<String, Vec<String>>,
    /// table → comma separated conflict columns for the upsert
    #[serde(default)]
    pub conflict_keys: IndexMap<String, String>,
}

fn default_journal() -> String {
    Config::journal_file().to_string_lossy().to_string()
}
fn default_chunk_size() -> usize {
    100
}
fn default_true() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

/// Foreign-key order of the staffing data model.
pub fn default_dependencies() -> IndexMap<String, Vec<String>> {
    let graph: &[(&str, &[&str])] = &[
        ("team_members", &["teams"]),
        ("personnel", &["teams"]),
        ("functions", &["teams"]),
        ("personnel_functions", &["personnel", "functions"]),
        ("events", &["teams"]),
        ("event_divisions", &["events"]),
        (
            "personnel_allocations",
            &["personnel", "events", "event_divisions", "functions"],
        ),
        ("work_records", &["personnel", "events", "personnel_allocations"]),
        ("suppliers", &["teams"]),
        ("supplier_items", &["suppliers"]),
        ("event_supplier_costs", &["events", "suppliers", "supplier_items"]),
        ("supplier_ratings", &["suppliers", "events"]),
        ("freelancer_ratings", &["personnel", "events"]),
        ("payroll_sheets", &["teams", "events"]),
        ("payroll_closings", &["teams", "events", "personnel"]),
    ];

    graph
        .iter()
        .map(|(table, deps)| {
            (
                table.to_string(),
                deps.iter().map(|d| d.to_string()).collect(),
            )
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            journal: default_journal(),
            backend_url: String::new(),
            api_key: String::new(),
            chunk_size: default_chunk_size(),
            strip_comments: default_true(),
            timeout_secs: default_timeout(),
            table_order: vec!["teams".to_string()],
            dependencies: default_dependencies(),
            conflict_keys: IndexMap::new(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dumprestore")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("dumprestore.conf")
    }

    /// Return the full path of the journal database
    pub fn journal_file() -> PathBuf {
        Self::config_dir().join("dumprestore.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// Environment overrides are applied on top.
    pub fn load(path: &Path) -> AppResult<Self> {
        let mut cfg = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("cannot read {}: {}", path.display(), e))
            })?;
            serde_yaml::from_str(&content)?
        } else {
            Config::default()
        };

        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var(ENV_URL)
            && !url.trim().is_empty()
        {
            self.backend_url = url.trim().to_string();
        }
        if let Ok(key) = env::var(ENV_KEY)
            && !key.trim().is_empty()
        {
            self.api_key = key.trim().to_string();
        }
    }

    /// Write the configuration as YAML, creating the parent directory.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Conflict columns configured for a table, if any.
    pub fn conflict_key(&self, table: &str) -> Option<Vec<String>> {
        self.conflict_keys.get(table).map(|cols| {
            cols.split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect()
        })
    }

    /// Settings missing only for the REST target; sqlite and dry-run still work.
    pub fn notices(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.backend_url.is_empty() {
            out.push(format!(
                "backend_url is empty (set it or export {ENV_URL}); only sqlite/dry-run targets will work"
            ));
        }
        if self.api_key.is_empty() {
            out.push(format!(
                "api_key is empty (set it or export {ENV_KEY}); only sqlite/dry-run targets will work"
            ));
        }
        out
    }

    /// Problems that would make a restore fail or misbehave.
    pub fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();

        if self.chunk_size == 0 {
            out.push("chunk_size must be greater than 0".to_string());
        }
        if !self.backend_url.is_empty()
            && !self.backend_url.starts_with("http://")
            && !self.backend_url.starts_with("https://")
        {
            out.push(format!(
                "backend_url must start with http:// or https://: {}",
                self.backend_url
            ));
        }

        // all tables named anywhere, so a full cycle check covers the whole graph
        let mut every: Vec<String> = self.table_order.clone();
        for (table, deps) in &self.dependencies {
            every.push(table.clone());
            every.extend(deps.iter().cloned());
        }
        every.dedup();
        if let Err(e) =
            crate::core::order::plan_table_order(&every, &self.table_order, &self.dependencies)
        {
            out.push(e.to_string());
        }

        out
    }
}
