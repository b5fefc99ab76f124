// Audit store selection from a connection string.

use std::sync::Arc;

use thiserror::Error;

use super::AuditSink;
use super::jsonl::JsonlAuditSink;
use super::mongo::MongoAuditSink;

pub const DEFAULT_DATABASE: &str = "dnacly";
pub const DEFAULT_COLLECTION: &str = "dnac_logs";

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("invalid audit store URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("invalid {kind} name '{name}'")]
    InvalidName { kind: &'static str, name: String },

    #[error("audit store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode audit record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

/// An opened audit store.
///
/// `mongodb://` and `mongodb+srv://` connection strings reach a MongoDB
/// collection; `file://` URIs and bare paths a JSON-lines directory.
#[derive(Debug, Clone)]
pub enum AuditStore {
    Mongo(Arc<MongoAuditSink>),
    Jsonl(Arc<JsonlAuditSink>),
}

impl AuditStore {
    /// Must run inside a tokio runtime: the MongoDB backend spawns its writer.
    pub async fn open(uri: &str, database: &str, collection: &str) -> Result<Self, AuditError> {
        let uri = uri.trim();
        if is_mongo_uri(uri) {
            let sink = MongoAuditSink::connect(uri, database, collection).await?;
            Ok(Self::Mongo(Arc::new(sink)))
        } else {
            let sink = JsonlAuditSink::connect(uri, database, collection)?;
            Ok(Self::Jsonl(Arc::new(sink)))
        }
    }

    /// The sink to hand to a `Controller`.
    pub fn sink(&self) -> Arc<dyn AuditSink> {
        match self {
            Self::Mongo(sink) => sink.clone(),
            Self::Jsonl(sink) => sink.clone(),
        }
    }

    /// Wait until every recorded document has been written or dropped.
    pub async fn close(&self) {
        if let Self::Mongo(sink) = self {
            sink.close().await;
        }
    }
}

pub fn is_mongo_uri(uri: &str) -> bool {
    uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://")
}

/// Database and collection names double as path segments for the file backend.
pub(crate) fn validate_name(kind: &'static str, name: &str) -> Result<(), AuditError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0', '$', ' ', '"']);
    if bad {
        return Err(AuditError::InvalidName {
            kind,
            name: name.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_mongo_schemes() {
        assert!(is_mongo_uri("mongodb://localhost:27017"));
        assert!(is_mongo_uri("mongodb+srv://cluster0.example.net"));
        assert!(!is_mongo_uri("file:///var/lib/dnacly"));
        assert!(!is_mongo_uri("/var/lib/dnacly"));
    }

    #[test]
    fn names_with_mongo_reserved_characters_are_rejected() {
        assert!(validate_name("database", "audit$log").is_err());
        assert!(validate_name("database", "my db").is_err());
        assert!(validate_name("collection", "dnac_logs").is_ok());
    }

    #[tokio::test]
    async fn open_routes_by_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuditStore::open(dir.path().to_str().unwrap(), "db", "logs")
            .await
            .unwrap();
        assert!(matches!(store, AuditStore::Jsonl(_)));

        let store =
            AuditStore::open("mongodb://127.0.0.1:1/", DEFAULT_DATABASE, DEFAULT_COLLECTION)
                .await
                .unwrap();
        assert!(matches!(store, AuditStore::Mongo(_)));
        store.close().await;
    }

    #[tokio::test]
    async fn malformed_mongo_uri_is_invalid() {
        let err = AuditStore::open("mongodb://", "db", "logs").await.unwrap_err();
        assert!(matches!(err, AuditError::InvalidUri { .. }), "got: {err:?}");
    }
}
