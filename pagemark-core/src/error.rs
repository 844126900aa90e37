use crate::outline::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagemarkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Outline parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Destination {0} is not in the page label table")]
    UnknownDestination(String),

    #[error("Page {position} is outside the page label table ({len} pages)")]
    PageOutOfRange { position: u32, len: u32 },

    #[error("Page {position} has no numeric label: {label:?}")]
    InvalidPageLabel { position: u32, label: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Article not found: {0}")]
    ArticleNotFound(i64),

    #[error("{path} already holds {count} articles")]
    AlreadySeeded { path: String, count: u64 },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PagemarkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_error_display() {
        let error = PagemarkError::UnknownDestination("12 0 R".to_string());
        assert_eq!(
            error.to_string(),
            "Destination 12 0 R is not in the page label table"
        );

        let error = PagemarkError::PageOutOfRange {
            position: 8,
            len: 7,
        };
        assert_eq!(
            error.to_string(),
            "Page 8 is outside the page label table (7 pages)"
        );

        let error = PagemarkError::AlreadySeeded {
            path: "database.db".to_string(),
            count: 3,
        };
        assert_eq!(error.to_string(), "database.db already holds 3 articles");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let error = PagemarkError::from(io_error);

        match error {
            PagemarkError::Io(ref err) => {
                assert_eq!(err.kind(), ErrorKind::NotFound);
            }
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_error_from_parse_error() {
        let error = PagemarkError::from(ParseError::MissingKey("7 0 R".to_string()));
        assert!(matches!(error, PagemarkError::Parse(_)));
        assert!(error.to_string().contains("7 0 R"));
    }

    #[test]
    fn test_error_debug() {
        let error = PagemarkError::InvalidPageLabel {
            position: 3,
            label: "ii".to_string(),
        };
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("InvalidPageLabel"));
        assert!(debug_str.contains("ii"));
    }
}
