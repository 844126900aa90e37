use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored article row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub start_page: u32,
    pub end_page: u32,
    pub read: bool,
}

impl Article {
    /// Number of pages, both ends inclusive
    pub fn page_count(&self) -> u32 {
        (self.end_page + 1).saturating_sub(self.start_page)
    }
}

/// Article produced by page-range resolution, not yet stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub start_page: u32,
    pub end_page: u32,
}

/// Read and total article counts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    pub read: u64,
    pub total: u64,
}

impl Progress {
    /// Share of articles read, 0.0 for an empty store
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.read as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.read, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let progress = Progress { read: 1, total: 4 };
        assert_eq!(progress.to_string(), "1 / 4");
        assert_eq!(progress.ratio(), 0.25);
        assert_eq!(Progress::default().ratio(), 0.0);
    }

    #[test]
    fn test_page_count() {
        let article = Article {
            id: 1,
            title: "Generics".to_string(),
            start_page: 30,
            end_page: 32,
            read: false,
        };
        assert_eq!(article.page_count(), 3);
    }
}
