use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// One line of the diagnostics log.
#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String, // ISO-8601 UTC
    event: &'a str,
    detail: String,
}

/// Per-session diagnostics log.
///
/// The interactive view never shows raw transport errors; they land here,
/// one JSONL file per run under `<home>/logs/`.
pub struct DiagnosticsLog {
    session_id: Uuid,
    path: PathBuf,
    file: File,
}

impl DiagnosticsLog {
    /// Create a new log file in `dir`, named after the start time and a
    /// fresh session id.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).context("Failed to create log directory")?;

        let session_id = Uuid::new_v4();
        let filename = format!(
            "datamind-{}-{}.jsonl",
            Utc::now().format("%Y%m%d-%H%M%S"),
            &session_id.to_string()[..8]
        );
        let path = dir.join(filename);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context("Failed to open diagnostics log")?;

        let mut log = Self {
            session_id,
            path,
            file,
        };
        log.write("session_start", session_id.to_string());
        Ok(log)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record an outbound query.
    pub fn request(&mut self, query: &str) {
        self.write("request", query.to_string());
    }

    /// Record a failed request.
    pub fn error(&mut self, context: &str, err: &anyhow::Error) {
        self.write("error", format!("{}: {:#}", context, err));
    }

    /// Append one entry. Logging never fails the caller.
    fn write(&mut self, event: &str, detail: String) {
        let entry = LogEntry {
            timestamp: Utc::now().to_rfc3339(),
            event,
            detail,
        };
        if let Ok(json) = serde_json::to_string(&entry) {
            let _ = writeln!(self.file, "{}", json);
        }
    }
}
