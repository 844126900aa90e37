use super::models::{Article, NewArticle, Progress};
use crate::error::{PagemarkError, Result};
use rusqlite::{params, Connection, Row};
use std::path::Path;

pub struct ArticleStore {
    conn: Connection,
    path: String,
}

impl ArticleStore {
    const ARTICLE_COLUMNS: &'static str = "id, title, start_page, end_page, read";

    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let conn = Connection::open(&path)?;
        let store = ArticleStore { conn, path: path_str };
        store.init()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = ArticleStore {
            conn,
            path: ":memory:".to_string(),
        };
        store.init()?;
        Ok(store)
    }

    pub fn get_path(&self) -> &str {
        &self.path
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS Article (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                start_page INTEGER NOT NULL,
                end_page INTEGER NOT NULL,
                read BOOL DEFAULT 0
            );
            ",
        )?;
        Ok(())
    }

    /// Insert articles in one transaction; nothing is written if any insert fails
    pub fn insert_articles(&mut self, articles: &[NewArticle]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO Article (title, start_page, end_page) VALUES (?1, ?2, ?3)")?;
            for article in articles {
                stmt.execute(params![article.title, article.start_page, article.end_page])?;
            }
        }
        tx.commit()?;
        Ok(articles.len())
    }

    pub fn get_article(&self, id: i64) -> Result<Option<Article>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM Article WHERE id = ?1",
            Self::ARTICLE_COLUMNS
        ))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::row_to_article(row)?))
        } else {
            Ok(None)
        }
    }

    /// All articles in id order
    pub fn get_articles(&self) -> Result<Vec<Article>> {
        self.query_articles("")
    }

    /// Unread articles in id order
    pub fn get_unread_articles(&self) -> Result<Vec<Article>> {
        self.query_articles("WHERE read = 0")
    }

    /// First unread article in id order
    pub fn next_unread(&self) -> Result<Option<Article>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM Article WHERE read = 0 ORDER BY id LIMIT 1",
            Self::ARTICLE_COLUMNS
        ))?;

        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::row_to_article(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn mark_read(&self, id: i64) -> Result<()> {
        let updated = self
            .conn
            .execute("UPDATE Article SET read = 1 WHERE id = ?1", params![id])?;
        if updated == 0 {
            return Err(PagemarkError::ArticleNotFound(id));
        }
        Ok(())
    }

    pub fn progress(&self) -> Result<Progress> {
        let (read, total): (i64, i64) = self.conn.query_row(
            "SELECT COALESCE(SUM(read), 0), COUNT(*) FROM Article",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(Progress {
            read: read as u64,
            total: total as u64,
        })
    }

    fn query_articles(&self, filter: &str) -> Result<Vec<Article>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM Article {} ORDER BY id",
            Self::ARTICLE_COLUMNS,
            filter
        ))?;
        let articles = stmt
            .query_map([], Self::row_to_article)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(articles)
    }

    fn row_to_article(row: &Row) -> rusqlite::Result<Article> {
        Ok(Article {
            id: row.get(0)?,
            title: row.get(1)?,
            start_page: row.get(2)?,
            end_page: row.get(3)?,
            read: row.get::<_, Option<bool>>(4)?.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, start_page: u32, end_page: u32) -> NewArticle {
        NewArticle {
            title: title.to_string(),
            start_page,
            end_page,
        }
    }

    fn seeded() -> ArticleStore {
        let mut store = ArticleStore::in_memory().unwrap();
        store
            .insert_articles(&[
                article("Types", 21, 24),
                article("Classes", 25, 30),
                article("Generics", 31, 31),
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_insert_and_read_back() {
        let store = seeded();
        let articles = store.get_articles().unwrap();

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].id, 1);
        assert_eq!(articles[0].title, "Types");
        assert_eq!(articles[1].start_page, 25);
        assert_eq!(articles[1].end_page, 30);
        assert!(articles.iter().all(|a| !a.read));
    }

    #[test]
    fn test_next_unread_follows_id_order() {
        let store = seeded();

        assert_eq!(store.next_unread().unwrap().unwrap().title, "Types");
        store.mark_read(1).unwrap();
        assert_eq!(store.next_unread().unwrap().unwrap().title, "Classes");
        assert_eq!(store.get_unread_articles().unwrap().len(), 2);
        assert!(store.get_article(1).unwrap().unwrap().read);
    }

    #[test]
    fn test_next_unread_when_all_read() {
        let store = seeded();
        for id in 1..=3 {
            store.mark_read(id).unwrap();
        }
        assert!(store.next_unread().unwrap().is_none());
    }

    #[test]
    fn test_mark_read_unknown_article() {
        let store = seeded();
        assert!(matches!(
            store.mark_read(42),
            Err(PagemarkError::ArticleNotFound(42))
        ));
    }

    #[test]
    fn test_progress() {
        let store = seeded();
        assert_eq!(store.progress().unwrap(), Progress { read: 0, total: 3 });

        store.mark_read(2).unwrap();
        assert_eq!(store.progress().unwrap(), Progress { read: 1, total: 3 });

        let empty = ArticleStore::in_memory().unwrap();
        assert_eq!(empty.progress().unwrap(), Progress::default());
    }

    #[test]
    fn test_get_missing_article() {
        let store = seeded();
        assert!(store.get_article(99).unwrap().is_none());
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.db");

        {
            let mut store = ArticleStore::new(&path).unwrap();
            store.insert_articles(&[article("Delegates", 40, 44)]).unwrap();
        }

        let store = ArticleStore::new(&path).unwrap();
        assert_eq!(store.get_path(), path.to_string_lossy());
        assert_eq!(store.get_articles().unwrap().len(), 1);
    }
}
