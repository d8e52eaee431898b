//! Append-only transcript log.
//!
//! Each completed turn is appended as one line of the form
//! `[YYYY-MM-DD HH:MM:SS] SENDER: content`. Write-only and best effort:
//! the file is never read back, failures are logged and ignored, and
//! there is no rotation or size bound.

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::warn;

pub struct Transcript {
    path: PathBuf,
    enabled: bool,
}

impl Transcript {
    pub fn new(path: PathBuf, enabled: bool) -> Self {
        Self { path, enabled }
    }

    /// Append one turn. Best effort; a failed write only logs a warning.
    pub fn append(&self, sender: &str, content: &str) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.try_append(sender, content) {
            warn!("failed to append to transcript {}: {e}", self.path.display());
        }
    }

    fn try_append(&self, sender: &str, content: &str) -> std::io::Result<()> {
        let line = format_line(sender, content, Local::now());
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

fn format_line(sender: &str, content: &str, timestamp: DateTime<Local>) -> String {
    format!("[{}] {sender}: {content}\n", timestamp.format("%Y-%m-%d %H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn line_format_matches_the_log_convention() {
        let timestamp = Local.with_ymd_and_hms(2026, 8, 24, 14, 5, 9).unwrap();
        let line = format_line("PLAYER", "look around", timestamp);
        assert_eq!(line, "[2026-08-24 14:05:09] PLAYER: look around\n");
    }

    #[test]
    fn append_accumulates_lines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_log.txt");
        let transcript = Transcript::new(path.clone(), true);

        transcript.append("PLAYER", "hello");
        transcript.append("GAMEMASTER", "hi there");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("PLAYER: hello"));
        assert!(lines[1].ends_with("GAMEMASTER: hi there"));
        // [YYYY-MM-DD HH:MM:SS] prefix is exactly 21 characters
        assert_eq!(&lines[0][0..1], "[");
        assert_eq!(&lines[0][20..22], "] ");
    }

    #[test]
    fn disabled_transcript_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_log.txt");
        let transcript = Transcript::new(path.clone(), false);

        transcript.append("PLAYER", "hello");
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_path_does_not_panic() {
        // A directory path cannot be opened for append.
        let dir = tempfile::tempdir().unwrap();
        let transcript = Transcript::new(dir.path().to_path_buf(), true);
        transcript.append("PLAYER", "hello");
    }
}
