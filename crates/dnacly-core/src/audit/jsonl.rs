// Append-only JSON-lines audit store.
//
// Local stand-in for the MongoDB collection: the connection string names
// the store root, each database is a directory and each collection a
// `.jsonl` file inside it, one document per line.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};
use url::Url;

use super::store::{AuditError, DEFAULT_COLLECTION, DEFAULT_DATABASE, validate_name};
use super::{AuditRecord, AuditSink};

/// Writes each record as one JSON document appended to a collection file.
///
/// `record()` never fails: write errors are logged at `warn` and dropped.
/// Use [`try_record`](Self::try_record) to observe them.
#[derive(Debug)]
pub struct JsonlAuditSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlAuditSink {
    /// Resolve a connection string plus database and collection names.
    ///
    /// Accepts `file:///abs/dir` or a bare filesystem path. Nothing is
    /// created until the first record is written.
    pub fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AuditError> {
        let root = parse_root(uri)?;
        validate_name("database", database)?;
        validate_name("collection", collection)?;

        let path = root.join(database).join(format!("{collection}.jsonl"));
        debug!(path = %path.display(), "audit store resolved");
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Like [`connect`](Self::connect) with the default database and collection.
    pub fn connect_default(uri: &str) -> Result<Self, AuditError> {
        Self::connect(uri, DEFAULT_DATABASE, DEFAULT_COLLECTION)
    }

    /// The collection file records are appended to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, reporting any failure.
    pub fn try_record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Read every document in the collection, oldest first.
    ///
    /// A missing collection is empty. Lines that do not parse are skipped.
    pub fn read_all(&self) -> Result<Vec<AuditRecord>, AuditError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => debug!(error = %e, "skipping unreadable audit document"),
            }
        }
        Ok(records)
    }
}

impl AuditSink for JsonlAuditSink {
    fn record(&self, record: AuditRecord) {
        if let Err(e) = self.try_record(&record) {
            warn!(
                path = %self.path.display(),
                action = %record.action,
                error = %e,
                "dropping audit record"
            );
        }
    }
}

fn parse_root(uri: &str) -> Result<PathBuf, AuditError> {
    let uri = uri.trim();
    let invalid = |reason: &str| AuditError::InvalidUri {
        uri: uri.to_owned(),
        reason: reason.to_owned(),
    };

    if uri.is_empty() {
        return Err(invalid("empty connection string"));
    }

    if !uri.contains("://") {
        return Ok(PathBuf::from(uri));
    }

    let url = Url::parse(uri).map_err(|e| invalid(&e.to_string()))?;
    if url.scheme() != "file" {
        return Err(invalid(&format!(
            "unsupported scheme '{}' for a file store, expected file://",
            url.scheme()
        )));
    }
    url.to_file_path()
        .map_err(|()| invalid("not an absolute local path"))
}
