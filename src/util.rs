use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use lol_html::{doc_comments, element, rewrite_str, Settings};
use tracing::warn;

/// Removes every tag and comment, keeping the text in between. Entities are left as
/// they are.
pub fn strip_tags(input: &str) -> String {
    let settings = Settings {
        element_content_handlers: vec![element!("*", |el| {
            el.remove_and_keep_content();
            Ok(())
        })],
        document_content_handlers: vec![doc_comments!(|comment| {
            comment.remove();
            Ok(())
        })],
        ..Settings::default()
    };

    match rewrite_str(input, settings) {
        Ok(text) => text,
        Err(why) => {
            warn!(error = %why, "failed to strip markup, keeping input verbatim");
            input.to_string()
        }
    }
}

/// Makes untrusted text safe to echo into HTML, attributes included.
pub fn sanitize(input: &str) -> String {
    let stripped = strip_tags(input.trim());
    html_escape::encode_quoted_attribute(&stripped).into_owned()
}

/// `302 Found` to `url`. Returning the response ends the handler, so nothing else gets
/// written after it.
pub fn redirect(url: &str) -> Response {
    match HeaderValue::from_str(url) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(why) => {
            warn!(url, error = %why, "refusing to redirect to an invalid location");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
