//! Plain-text transcript export.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use innkeeper_constant::defaults::{EXPORT_FILE_PREFIX, EXPORT_TIMESTAMP_FORMAT};
use serde::Serialize;

use crate::error::{InnkeeperError, Result};
use crate::turn::Turn;

/// A rendered transcript and the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub file_name: String,
    pub body: String,
}

impl Transcript {
    pub fn new(turns: &[Turn], now: DateTime<Local>) -> Self {
        Self {
            file_name: export_file_name(now),
            body: render_transcript(turns),
        }
    }

    /// Write the transcript into `dir`, creating it if needed.
    ///
    /// Never overwrites: a file of the same name is an `Export` error.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(InnkeeperError::Export(format!(
                    "{} already exists, try again in a second",
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(self.body.as_bytes())?;
        Ok(path)
    }
}

/// `<You|Bot>: <content>` per turn, entries separated by one blank line.
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}\n", turn.role.label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `hotel_chat_export_<YYYY-MM-DD_HH-MM-SS>.txt`
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!(
        "{EXPORT_FILE_PREFIX}{}.txt",
        now.format(EXPORT_TIMESTAMP_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
    }

    #[test]
    fn test_render_two_turns() {
        let turns = vec![Turn::user("Hi"), Turn::assistant("Hello")];
        let body = render_transcript(&turns);
        assert_eq!(body, "You: Hi\n\nBot: Hello\n");

        let lines: Vec<_> = body.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["You: Hi", "Bot: Hello"]);
    }

    #[test]
    fn test_render_empty_history() {
        assert_eq!(render_transcript(&[]), "");
    }

    #[test]
    fn test_render_keeps_error_turns_verbatim() {
        let turns = vec![Turn::user("What food is served?"), Turn::assistant_error("401")];
        assert_eq!(
            render_transcript(&turns),
            "You: What food is served?\n\nBot: Error: 401\n"
        );
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(fixed_time()),
            "hotel_chat_export_2024-03-09_07-05-01.txt"
        );
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let turns = vec![Turn::user("Hi"), Turn::assistant("Hello")];
        let transcript = Transcript::new(&turns, fixed_time());

        let path = transcript.write_to(&dir.path().join("exports")).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "hotel_chat_export_2024-03-09_07-05-01.txt"
        );
        assert_eq!(std::fs::read_to_string(path).unwrap(), "You: Hi\n\nBot: Hello\n");
    }

    #[test]
    fn test_write_to_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let first = Transcript::new(&[Turn::user("Hi")], fixed_time());
        let second = Transcript::new(&[Turn::user("Bye")], fixed_time());

        let path = first.write_to(dir.path()).unwrap();
        let err = second.write_to(dir.path()).unwrap_err();

        assert!(matches!(err, InnkeeperError::Export(_)));
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "You: Hi\n");
    }
}
