use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the effective configuration (file + environment) as YAML.
    /// The API key is masked.
    pub fn print(cfg: &Config) -> AppResult<()> {
        let mut shown = cfg.clone();
        if !shown.api_key.is_empty() {
            shown.api_key = mask(&shown.api_key);
        }
        println!("📄 Current configuration:\n");
        println!("{}", serde_yaml::to_string(&shown)?);
        Ok(())
    }

    /// Report configuration problems; returns how many were found.
    /// REST-only gaps are printed as notes and not counted.
    pub fn check(cfg: &Config) -> usize {
        for note in cfg.notices() {
            info(note);
        }

        let problems = cfg.problems();
        if problems.is_empty() {
            success("Configuration looks good.");
        } else {
            for p in &problems {
                warning(p);
            }
        }
        problems.len()
    }
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}
