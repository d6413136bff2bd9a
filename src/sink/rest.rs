use super::UpsertSink;
use crate::config::{Config, ENV_KEY, ENV_URL};
use crate::errors::{AppError, AppResult};
use crate::models::Row;
use std::time::Duration;

const PREFER: &str = "resolution=merge-duplicates,missing=default,return=minimal";

/// Upserts through the hosted backend's REST interface
/// (`POST {url}/rest/v1/{table}` with merge-duplicates resolution).
pub struct RestSink {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
    conflict_keys: Vec<(String, String)>,
}

impl RestSink {
    pub fn new(cfg: &Config) -> AppResult<Self> {
        if cfg.backend_url.trim().is_empty() {
            return Err(AppError::Config(format!(
                "backend_url is not set (config file or {ENV_URL})"
            )));
        }
        if cfg.api_key.trim().is_empty() {
            return Err(AppError::Config(format!(
                "api_key is not set (config file or {ENV_KEY})"
            )));
        }

        let timeout = Duration::from_secs(cfg.timeout_secs.max(1));
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();

        Ok(Self {
            agent,
            base_url: cfg.backend_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            conflict_keys: cfg
                .conflict_keys
                .iter()
                .map(|(t, k)| (t.clone(), k.clone()))
                .collect(),
        })
    }

    pub fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn conflict_key(&self, table: &str) -> Option<&str> {
        self.conflict_keys
            .iter()
            .find(|(t, _)| t == table)
            .map(|(_, k)| k.as_str())
    }
}

/// Union of the chunk's columns when the rows do not all share the same keys.
fn mixed_columns(rows: &[Row]) -> Option<String> {
    let first = rows.first()?;
    let uniform = rows
        .iter()
        .all(|r| r.len() == first.len() && r.keys().all(|k| first.contains_key(k)));
    if uniform {
        return None;
    }

    let mut cols: Vec<&str> = Vec::new();
    for key in rows.iter().flat_map(|r| r.keys()) {
        if !cols.contains(&key.as_str()) {
            cols.push(key);
        }
    }
    Some(cols.join(","))
}

impl UpsertSink for RestSink {
    fn label(&self) -> String {
        format!("rest ({})", self.base_url)
    }

    fn upsert(&mut self, table: &str, rows: &[Row]) -> AppResult<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let body = serde_json::to_string(rows)?;
        let mut req = self
            .agent
            .post(&self.endpoint(table))
            .set("apikey", &self.api_key)
            .set("authorization", &format!("Bearer {}", self.api_key))
            .set("content-type", "application/json")
            .set("prefer", PREFER);

        if let Some(key) = self.conflict_key(table) {
            req = req.query("on_conflict", key);
        }
        if let Some(cols) = mixed_columns(rows) {
            req = req.query("columns", &cols);
        }

        match req.send_string(&body) {
            Ok(resp) if (200..=299).contains(&resp.status()) => Ok(rows.len()),
            Ok(resp) => Err(AppError::upsert(
                table,
                format!("http status {}", resp.status()),
            )),
            Err(ureq::Error::Status(code, resp)) => {
                let detail = resp.into_string().unwrap_or_default();
                let detail = detail.trim();
                Err(AppError::upsert(
                    table,
                    if detail.is_empty() {
                        format!("http status {}", code)
                    } else {
                        format!("http status {}: {}", code, detail)
                    },
                ))
            }
            Err(ureq::Error::Transport(err)) => Err(AppError::upsert(
                table,
                format!("transport error: {}", err),
            )),
        }
    }
}
