use crate::models::{article, category, user, ArticleStatus, ArticleSummary};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
};
use tracing::instrument;

/// Read-only access to the tables the homepage is built from.
pub struct NewsRepository<'a> {
    database: &'a DatabaseConnection,
}

impl<'a> NewsRepository<'a> {
    pub fn new(database: &'a DatabaseConnection) -> NewsRepository<'a> {
        NewsRepository { database }
    }

    /// Newest published articles first; equal timestamps fall back to the newest id.
    #[instrument(skip(self))]
    pub async fn list_published_articles(&self, limit: u64) -> Result<Vec<ArticleSummary>, DbErr> {
        published_articles(limit)
            .into_model::<ArticleSummary>()
            .all(self.database)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<category::Model>, DbErr> {
        category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(self.database)
            .await
    }
}

pub fn published_articles(limit: u64) -> Select<article::Entity> {
    article::Entity::find()
        .select_only()
        .columns([
            article::Column::Id,
            article::Column::Title,
            article::Column::Slug,
            article::Column::Content,
            article::Column::Excerpt,
            article::Column::FeaturedImage,
            article::Column::PublishedAt,
        ])
        .column_as(category::Column::Name, "category_name")
        .column_as(category::Column::Slug, "category_slug")
        .column_as(user::Column::Username, "author_name")
        .join(JoinType::LeftJoin, article::Relation::Category.def())
        .join(JoinType::LeftJoin, article::Relation::Author.def())
        .filter(article::Column::Status.eq(ArticleStatus::Published))
        .order_by_desc(article::Column::PublishedAt)
        .order_by_desc(article::Column::Id)
        .limit(limit)
}
