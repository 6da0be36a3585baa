pub mod article;
pub mod category;
pub mod user;

pub use article::{ArticleStatus, ArticleSummary};
