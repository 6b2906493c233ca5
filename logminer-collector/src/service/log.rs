//! Log Service
//!
//! Validation and persistence of uploaded logs.

use logminer_core::domain::log::{LogRecord, LogSource};
use logminer_core::dto::log::UploadLog;
use uuid::Uuid;

use crate::repository::{LogStore, StoreError};

/// Service error type
#[derive(Debug)]
pub enum IngestError {
    ValidationError(String),
    StorageError(StoreError),
}

impl From<StoreError> for IngestError {
    fn from(err: StoreError) -> Self {
        IngestError::StorageError(err)
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// Validate an upload and persist it as a new record
///
/// Nothing reaches the store unless validation succeeds.
pub async fn upload_log(store: &dyn LogStore, req: UploadLog) -> Result<LogRecord> {
    let record = validate_upload(req, chrono::Utc::now())?;

    store.insert(&record).await?;

    tracing::debug!(
        "Stored log {} ({} bytes) for {}/{} pipeline {}",
        record.id,
        record.content.len(),
        record.source,
        record.repo,
        record.pipeline_id
    );

    Ok(record)
}

// =============================================================================
// Validation
// =============================================================================

/// Build a record from an upload, enforcing the record schema
///
/// `now` is used as the record timestamp when the upload carries none.
pub fn validate_upload(
    req: UploadLog,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<LogRecord> {
    let source = required("source", req.source)?;
    let repo = identifier("repo", required("repo", req.repo)?)?;
    let pipeline_id = identifier("pipelineId", required("pipelineId", req.pipeline_id)?)?;
    let content = required("content", req.content)?;

    let source = source
        .parse::<LogSource>()
        .map_err(|e| IngestError::ValidationError(e.to_string()))?;

    Ok(LogRecord {
        id: Uuid::new_v4(),
        source,
        repo,
        pipeline_id,
        timestamp: req.timestamp.unwrap_or(now),
        content,
        metadata: req.metadata,
    })
}

/// Empty strings count as missing
fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(IngestError::ValidationError(format!(
            "`{}` is required",
            field
        ))),
    }
}

/// Identifiers are stored as plain text, which cannot carry NUL
fn identifier(field: &str, value: String) -> Result<String> {
    if value.contains('\0') {
        return Err(IngestError::ValidationError(format!(
            "`{}` must not contain NUL characters",
            field
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::{MemoryLogStore, UnavailableLogStore};

    fn valid_upload() -> UploadLog {
        UploadLog {
            source: Some("github".to_string()),
            repo: Some("org/app".to_string()),
            pipeline_id: Some("42".to_string()),
            content: Some("build ok".to_string()),
            metadata: None,
            timestamp: None,
        }
    }

    #[test]
    fn test_validate_upload_valid() {
        let now = chrono::Utc::now();
        let record = validate_upload(valid_upload(), now).unwrap();

        assert_eq!(record.source, LogSource::Github);
        assert_eq!(record.repo, "org/app");
        assert_eq!(record.pipeline_id, "42");
        assert_eq!(record.content, "build ok");
        assert_eq!(record.timestamp, now);
        assert!(record.metadata.is_none());
    }

    #[test]
    fn test_validate_upload_keeps_client_timestamp() {
        let submitted = chrono::DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let req = UploadLog {
            timestamp: Some(submitted),
            ..valid_upload()
        };

        let record = validate_upload(req, chrono::Utc::now()).unwrap();
        assert_eq!(record.timestamp, submitted);
    }

    #[test]
    fn test_validate_upload_missing_fields() {
        let cases = [
            UploadLog {
                source: None,
                ..valid_upload()
            },
            UploadLog {
                repo: None,
                ..valid_upload()
            },
            UploadLog {
                pipeline_id: None,
                ..valid_upload()
            },
            UploadLog {
                content: None,
                ..valid_upload()
            },
            UploadLog {
                content: Some(String::new()),
                ..valid_upload()
            },
        ];

        for req in cases {
            let result = validate_upload(req, chrono::Utc::now());
            assert!(matches!(result, Err(IngestError::ValidationError(_))));
        }
    }

    #[test]
    fn test_validate_upload_unknown_source() {
        let req = UploadLog {
            source: Some("travis".to_string()),
            ..valid_upload()
        };

        match validate_upload(req, chrono::Utc::now()) {
            Err(IngestError::ValidationError(msg)) => assert!(msg.contains("travis")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_upload_nul_in_identifiers() {
        let cases = [
            UploadLog {
                repo: Some("org/\0app".to_string()),
                ..valid_upload()
            },
            UploadLog {
                pipeline_id: Some("4\02".to_string()),
                ..valid_upload()
            },
        ];

        for req in cases {
            let result = validate_upload(req, chrono::Utc::now());
            assert!(matches!(result, Err(IngestError::ValidationError(_))));
        }
    }

    #[test]
    fn test_validate_upload_nul_in_content_kept() {
        let req = UploadLog {
            content: Some("step 1\0step 2".to_string()),
            metadata: Some(serde_json::json!({"raw": "a\u{0}b"})),
            ..valid_upload()
        };

        let record = validate_upload(req, chrono::Utc::now()).unwrap();
        assert_eq!(record.content, "step 1\0step 2");
        assert_eq!(record.metadata, Some(serde_json::json!({"raw": "a\u{0}b"})));
    }

    #[test]
    fn test_validate_upload_assigns_fresh_ids() {
        let now = chrono::Utc::now();
        let a = validate_upload(valid_upload(), now).unwrap();
        let b = validate_upload(valid_upload(), now).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_upload_log_persists_one_record() {
        let store = MemoryLogStore::default();
        let req = UploadLog {
            metadata: Some(serde_json::json!({
                "trigger": "push",
                "steps": [{"name": "test", "ok": true}, {"name": "lint", "ok": false}],
                "duration": 12.5,
                "runner": null
            })),
            ..valid_upload()
        };

        let record = upload_log(&store, req.clone()).await.unwrap();

        assert_eq!(store.len(), 1);
        let stored = store.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(stored, record);
        assert_eq!(stored.metadata, req.metadata);
    }

    #[tokio::test]
    async fn test_upload_log_rejects_before_storage() {
        let store = MemoryLogStore::default();
        let req = UploadLog {
            source: Some("travis".to_string()),
            ..valid_upload()
        };

        let result = upload_log(&store, req).await;
        assert!(matches!(result, Err(IngestError::ValidationError(_))));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_upload_log_storage_failure() {
        let result = upload_log(&UnavailableLogStore, valid_upload()).await;
        assert!(matches!(
            result,
            Err(IngestError::StorageError(StoreError::Unavailable(_)))
        ));
    }
}
