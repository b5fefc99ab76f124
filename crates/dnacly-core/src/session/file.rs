// File-backed session: lets consecutive CLI runs share one token the way
// consecutive browser requests share a web session.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use dnacly_api::Token;

use super::Session;

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
    stored_at: DateTime<Utc>,
}

/// Session persisted as a small JSON document on disk.
///
/// Unreadable or corrupt files count as an empty session. Write and delete
/// failures are logged and otherwise ignored; the in-memory token stays
/// valid for the rest of the process either way.
#[derive(Debug)]
pub struct FileSession {
    path: PathBuf,
    token: Option<Token>,
    stored_at: Option<DateTime<Utc>>,
}

impl FileSession {
    /// Open (or lazily create) the session stored at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (token, stored_at) = match read_session(&path) {
            Some(file) => (Token::new(file.token), Some(file.stored_at)),
            None => (None, None),
        };
        debug!(path = %path.display(), cached = token.is_some(), "opened session file");
        Self {
            path,
            token,
            stored_at,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the current token was written, if it came from this session.
    pub fn stored_at(&self) -> Option<DateTime<Utc>> {
        self.stored_at
    }

    fn persist(&self, file: &SessionFile) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(file)?;
        let mut out = open_private(&self.path)?;
        out.write_all(json.as_bytes())?;
        out.flush()
    }
}

impl Session for FileSession {
    fn token(&self) -> Option<Token> {
        self.token.clone()
    }

    fn store_token(&mut self, token: Token) {
        let now = Utc::now();
        let file = SessionFile {
            token: token.expose().to_owned(),
            stored_at: now,
        };
        if let Err(e) = self.persist(&file) {
            warn!(path = %self.path.display(), error = %e, "failed to persist session token");
        }
        self.token = Some(token);
        self.stored_at = Some(now);
    }

    fn clear(&mut self) {
        self.token = None;
        self.stored_at = None;
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "session file removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to remove session file");
            }
        }
    }
}

fn read_session(path: &Path) -> Option<SessionFile> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(file) => Some(file),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring corrupt session file");
            None
        }
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn token_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut session = FileSession::open(&path);
        assert!(session.token().is_none());
        session.store_token(Token::new("persisted").unwrap());

        let reopened = FileSession::open(&path);
        assert_eq!(reopened.token().unwrap().expose(), "persisted");
        assert!(reopened.stored_at().is_some());
    }

    #[test]
    fn clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = FileSession::open(&path);
        session.store_token(Token::new("gone-soon").unwrap());
        assert!(path.exists());

        session.clear();
        assert!(!path.exists());
        assert!(FileSession::open(&path).token().is_none());

        // Clearing an already-empty session is a no-op.
        session.clear();
    }

    #[test]
    fn corrupt_file_is_an_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        assert!(FileSession::open(&path).token().is_none());
    }

    #[test]
    fn blank_token_on_disk_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"token":"","stored_at":"2024-01-01T00:00:00Z"}"#).unwrap();

        assert!(FileSession::open(&path).token().is_none());
    }

    #[test]
    fn unwritable_path_keeps_token_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the write fail.
        let path = dir.path().join("session.json");
        fs::create_dir(&path).unwrap();

        let mut session = FileSession::open(&path);
        session.store_token(Token::new("memory-only").unwrap());
        assert_eq!(session.token().unwrap().expose(), "memory-only");
    }
}
