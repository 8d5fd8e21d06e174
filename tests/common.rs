#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ISOLATED_VARS: &[&str] = &[
    "SHEET_NAME",
    "SHEET_ID",
    "WORKSHEET_NAME",
    "POSTGRES_URI",
    "DATABASE_URL",
    "GOOGLE_CREDENTIALS",
    "GOOGLE_APPLICATION_CREDENTIALS",
];

pub const HEADER: &str = "Timestamp,Date,Time,Nappy,Email Address";

/// A scratch directory acting as working dir, config dir and DB location,
/// so no `.env`, settings file or inherited variable leaks into a test.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn db(&self) -> String {
        self.path("nappy.sqlite").to_string_lossy().to_string()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("nappy-sync");
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("XDG_CONFIG_HOME", self.dir.path())
            .env("RUST_LOG", "off")
            .current_dir(self.dir.path());
        cmd
    }

    /// Run `init` against the sandbox database.
    pub fn init_db(&self) {
        self.cmd()
            .args(["--db", &self.db(), "init"])
            .assert()
            .success();
    }

    /// Write a CSV export with the standard header followed by `rows`.
    pub fn csv(&self, name: &str, rows: &[&str]) -> String {
        let mut content = String::from(HEADER);
        content.push('\n');
        for r in rows {
            content.push_str(r);
            content.push('\n');
        }
        self.raw_file(name, &content)
    }

    pub fn raw_file(&self, name: &str, content: &str) -> String {
        let path = self.path(name);
        fs::write(&path, content).expect("write fixture");
        path.to_string_lossy().to_string()
    }

    pub fn sync_csv(&self, csv: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--db", &self.db(), "sync", "--csv", csv]);
        cmd
    }
}

pub fn stored_timestamps(db: &str) -> Vec<String> {
    let conn = rusqlite::Connection::open(Path::new(db)).expect("open db");
    let mut stmt = conn
        .prepare("SELECT timestamp FROM nappy_log ORDER BY timestamp")
        .expect("prepare");
    stmt.query_map([], |row| row.get(0))
        .expect("query")
        .collect::<Result<Vec<String>, _>>()
        .expect("rows")
}
