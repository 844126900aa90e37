//! SQLite storage for articles and their read state

mod models;
mod schema;

pub use models::{Article, NewArticle, Progress};
pub use schema::ArticleStore;
