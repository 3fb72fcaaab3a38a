use std::path::Path;

use chrono::{Local, TimeZone, Utc};

use crate::error::{Error, Result};

pub async fn read_trimmed_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    let contents = tokio::fs::read_to_string(path).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::FileMissing(path.to_path_buf())
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Err(Error::FileEmpty(path.to_path_buf()));
    }

    Ok(trimmed.to_string())
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

// id-ID style: dd/mm/YYYY HH.MM.SS
pub fn format_timestamp(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(time) => time.format("%d/%m/%Y %H.%M.%S").to_string(),
        None => "-".to_string(),
    }
}

pub fn format_optional_timestamp(timestamp_ms: Option<i64>) -> String {
    timestamp_ms.map_or_else(|| "-".to_string(), format_timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trims_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.txt");
        std::fs::write(&path, "\n  cf_clearance=abc; session-token=xyz \n").unwrap();

        let contents = read_trimmed_file(&path).await.unwrap();

        assert_eq!(contents, "cf_clearance=abc; session-token=xyz");
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");

        let err = read_trimmed_file(&path).await.unwrap_err();

        assert!(matches!(err, Error::FileMissing(p) if p == path));
    }

    #[tokio::test]
    async fn blank_file_is_reported_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.txt");
        std::fs::write(&path, "   \n\t").unwrap();

        let err = read_trimmed_file(&path).await.unwrap_err();

        assert!(matches!(err, Error::FileEmpty(_)));
    }

    #[test]
    fn timestamp_format_has_date_and_time() {
        let formatted = format_timestamp(1_700_000_000_000);

        assert_eq!(formatted.len(), "dd/mm/YYYY HH.MM.SS".len());
        assert_eq!(&formatted[2..3], "/");
        assert_eq!(&formatted[13..14], ".");
    }

    #[test]
    fn missing_timestamp_prints_dash() {
        assert_eq!(format_optional_timestamp(None), "-");
        assert_eq!(format_timestamp(i64::MAX), "-");
    }
}
