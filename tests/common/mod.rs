#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use cambotimes::config::Config;
use cambotimes::database::Connector;
use cambotimes::models::{article, category, user, ArticleStatus};
use cambotimes::server::router;
use cambotimes::AppState;
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend,
    Schema, Set,
};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_config(pairs: &[(&str, &str)]) -> Config {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| env.get(key).cloned()).unwrap()
}

pub fn app(connector: Connector) -> Router {
    let state = AppState::with_connector(test_config(&[]), connector).unwrap();
    router(Arc::new(state))
}

pub struct Page {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Page {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header("cookie", cookie);
    }
    let response = app
        .clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    Page {
        status,
        headers,
        body: String::from_utf8(body.to_vec()).unwrap(),
    }
}

/// Fresh in-memory SQLite database with the site tables.
pub async fn sqlite_database() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);
    let database = Database::connect(options).await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    for table in [
        schema.create_table_from_entity(category::Entity),
        schema.create_table_from_entity(user::Entity),
        schema.create_table_from_entity(article::Entity),
    ] {
        database
            .execute(database.get_database_backend().build(&table))
            .await
            .unwrap();
    }
    database
}

pub fn day(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .unwrap()
}

pub async fn insert_category(database: &DatabaseConnection, name: &str, slug: &str) -> i32 {
    category::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
        ..Default::default()
    }
    .insert(database)
    .await
    .unwrap()
    .id
}

pub async fn insert_user(database: &DatabaseConnection, username: &str) -> i32 {
    user::ActiveModel {
        username: Set(username.to_string()),
        ..Default::default()
    }
    .insert(database)
    .await
    .unwrap()
    .id
}

pub struct NewArticle<'a> {
    pub title: &'a str,
    pub status: ArticleStatus,
    pub published_at: Option<NaiveDateTime>,
    pub category_id: Option<i32>,
    pub author_id: Option<i32>,
    pub excerpt: Option<&'a str>,
}

impl<'a> NewArticle<'a> {
    pub fn published(title: &'a str, at: NaiveDateTime) -> NewArticle<'a> {
        NewArticle {
            title,
            status: ArticleStatus::Published,
            published_at: Some(at),
            category_id: None,
            author_id: None,
            excerpt: None,
        }
    }

    pub fn draft(title: &'a str, at: NaiveDateTime) -> NewArticle<'a> {
        NewArticle {
            status: ArticleStatus::Draft,
            ..NewArticle::published(title, at)
        }
    }
}

pub async fn insert_article(database: &DatabaseConnection, new: NewArticle<'_>) -> i32 {
    article::ActiveModel {
        title: Set(new.title.to_string()),
        slug: Set(new.title.to_lowercase().replace(' ', "-")),
        content: Set(format!("<p>{} body</p>", new.title)),
        excerpt: Set(new.excerpt.map(str::to_string)),
        featured_image: Set(None),
        status: Set(new.status),
        category_id: Set(new.category_id),
        author_id: Set(new.author_id),
        published_at: Set(new.published_at),
        ..Default::default()
    }
    .insert(database)
    .await
    .unwrap()
    .id
}
