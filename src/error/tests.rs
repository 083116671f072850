//! Tests for error types.

#[cfg(test)]
mod tests {
    use super::super::*;
    use std::path::Path;

    #[test]
    fn test_error_display() {
        let err = Error::config("invalid interval");
        assert_eq!(err.to_string(), "configuration error: invalid interval");
    }

    #[test]
    fn test_root_not_found() {
        let err = WatcherError::root_not_found(Path::new("training_data"));
        assert_eq!(err.to_string(), "watched root 'training_data' not found");
    }

    #[test]
    fn test_watcher_error_conversion() {
        let watch_err = WatcherError::Walk {
            path: "/tmp/test".to_string(),
            reason: "permission denied".to_string(),
        };
        let err: Error = watch_err.into();
        assert!(matches!(err, Error::Watcher(_)));
        assert_eq!(
            err.to_string(),
            "watcher error: failed to walk '/tmp/test': permission denied"
        );
    }

    #[test]
    fn test_ingest_error_conversion() {
        let ingest_err = IngestError::Malformed("expected value at line 1".to_string());
        let err: Error = ingest_err.into();
        assert!(matches!(err, Error::Ingest(_)));
    }

    #[test]
    fn test_ingest_error_timed_out() {
        let err = IngestError::TimedOut(Duration::from_millis(250));
        assert_eq!(err.to_string(), "handler timed out after 250ms");
    }

    #[test]
    fn test_ingest_error_decode() {
        let err = IngestError::Decode("invalid utf-8 sequence".to_string());
        assert_eq!(err.to_string(), "decode error: invalid utf-8 sequence");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(Error::config("test error"))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }

    #[test]
    fn test_scan_task_error() {
        let err = WatcherError::ScanTask("task cancelled".to_string());
        assert_eq!(err.to_string(), "scan task failed: task cancelled");
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<i32> {
            Err(Error::config("inner error"))
        }

        fn outer() -> Result<i32> {
            let _ = inner()?;
            Ok(0)
        }

        let result = outer();
        assert_eq!(
            result.unwrap_err().to_string(),
            "configuration error: inner error"
        );
    }
}
