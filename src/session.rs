use crate::AppState;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "CAMBOSESSID";

// 24 minutes without a request ends a session.
const SESSION_IDLE: Duration = Duration::from_secs(1440);
const SESSION_CAPACITY: u64 = 100_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub started: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionStart {
    Resumed(Session),
    Started(Session),
}

impl SessionStart {
    pub fn session(&self) -> &Session {
        match self {
            SessionStart::Resumed(session) | SessionStart::Started(session) => session,
        }
    }
}

/// Server side session storage. Entries expire after [`SESSION_IDLE`] of inactivity.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, Session>,
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::new()
    }
}

impl SessionStore {
    pub fn new() -> SessionStore {
        let sessions = Cache::builder()
            .max_capacity(SESSION_CAPACITY)
            .time_to_idle(SESSION_IDLE)
            .build();
        SessionStore { sessions }
    }

    pub async fn resume_or_start(&self, presented: Option<&str>) -> SessionStart {
        if let Some(session) = presented.and_then(|id| self.sessions.get(id)) {
            return SessionStart::Resumed(session);
        }

        let session = Session {
            id: Uuid::new_v4().to_string(),
            started: Utc::now(),
        };
        self.sessions
            .insert(session.id.clone(), session.clone())
            .await;
        debug!(session = %session.id, "started session");
        SessionStart::Started(session)
    }
}

fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, id)| id)
}

/// Attaches a [`Session`] to every request and hands out a cookie for new ones.
pub async fn session_layer<B>(
    State(state): State<Arc<AppState>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Response {
    let presented = session_cookie(request.headers()).map(str::to_string);
    let start = state.sessions.resume_or_start(presented.as_deref()).await;
    request.extensions_mut().insert(start.session().clone());

    let mut response = next.run(request).await;

    if let SessionStart::Started(session) = start {
        let cookie = format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            session.id
        );
        match HeaderValue::from_str(&cookie) {
            Ok(cookie) => {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }
            Err(why) => warn!(error = %why, "could not encode session cookie"),
        }
    }

    response
}
