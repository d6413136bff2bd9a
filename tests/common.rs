#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary with a clean environment (no backend credentials, no colours).
pub fn dr() -> Command {
    let mut cmd = cargo_bin_cmd!("dumprestore");
    cmd.env_remove("DUMPRESTORE_URL")
        .env_remove("DUMPRESTORE_KEY")
        .env("NO_COLOR", "1");
    cmd
}

/// A unique path inside the system temp dir; any existing file is removed.
pub fn temp_path(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_dumprestore.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Global flags pointing config and journal at throwaway files.
pub fn isolated(name: &str) -> Vec<String> {
    vec![
        "--config".to_string(),
        temp_path(&format!("{name}_cfg"), "conf"),
        "--journal".to_string(),
        temp_path(&format!("{name}_journal"), "sqlite"),
    ]
}

pub fn write_dump(name: &str, content: &str) -> String {
    let path = temp_path(name, "sql");
    fs::write(&path, content).expect("write dump");
    path
}

/// Small dump with two tables, a skipped statement and a non-insert.
pub const SAMPLE_DUMP: &str = r#"
--
-- Name: teams; Type: TABLE DATA; Schema: public; Owner: -
--

SET search_path = public;

INSERT INTO "personnel" ("id","team_id","name") VALUES (11,1,'Ana; Souza');
INSERT INTO "teams" ("id","name") VALUES (1,'Acme, Inc.');
INSERT INTO "teams" ("id","name") VALUES (2,'O''Brien Staffing');
INSERT INTO "personnel" ("id","team_id","name") VALUES (10,1);
"#;
