use crate::config::Config;
use crate::homepage::query::NewsRepository;
use crate::homepage::render::{render_homepage, HomepageView};
use crate::models::{category, ArticleSummary};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{Datelike, Local};
use sea_orm::DbErr;
use std::sync::Arc;
use tracing::{error, warn};

pub mod query;
pub mod render;

pub const LATEST_ARTICLES: u64 = 5;

pub async fn homepage(State(state): State<Arc<AppState>>) -> Response {
    let database = match state.database.acquire().await {
        Ok(database) => database,
        Err(why) => return connection_failed(&state.config, why),
    };

    let repository = NewsRepository::new(&database);
    let (articles, categories) = match front_page(&repository).await {
        Ok(found) => found,
        Err(why) => {
            warn!(error = %why, "homepage queries failed, rendering without content");
            (Vec::new(), Vec::new())
        }
    };

    let view = HomepageView::new(
        state.config.site_name(),
        state.config.site_url(),
        Local::now().year(),
        &articles,
        &categories,
    );

    match render_homepage(&state.templates, &view) {
        Ok(html) => Html(html).into_response(),
        Err(why) => {
            error!(error = ?why, "failed to render homepage");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Both result sets, or the first error. A failure in either discards both.
async fn front_page(
    repository: &NewsRepository<'_>,
) -> Result<(Vec<ArticleSummary>, Vec<category::Model>), DbErr> {
    let articles = repository.list_published_articles(LATEST_ARTICLES).await?;
    let categories = repository.list_categories().await?;
    Ok((articles, categories))
}

fn connection_failed(config: &Config, why: DbErr) -> Response {
    error!(error = %why, "database connection failed");
    let body = if config.display_errors() {
        format!("Database connection failed: {why}")
    } else {
        "Database connection failed".to_string()
    };
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
