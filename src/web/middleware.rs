//! Shared state and the auth gate for protected routes.

use crate::web::auth::AuthStore;
use crate::web::content::ContentStore;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use std::path::PathBuf;
use std::sync::Arc;

/// Cookie name for the session ID
pub const SESSION_COOKIE: &str = "bodur_admin_session";

/// State shared by all route handlers
pub struct AppState {
    /// Admin user/session authentication
    pub auth: AuthStore,
    /// Site content rows
    pub content: ContentStore,
    /// Session timeout in seconds
    pub session_timeout_secs: u64,
    /// Directory uploaded images are written to
    pub image_dir: PathBuf,
}

/// Auth gate applied to the protected route subset.
///
/// A valid session is inserted into request extensions for handlers that
/// want the username; anything else redirects to the login form with the
/// originally requested path as `next`.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let session = match jar.get(SESSION_COOKIE) {
        Some(cookie) => state
            .auth
            .validate_session(cookie.value())
            .await
            .ok()
            .flatten(),
        None => None,
    };

    match session {
        Some(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        None => {
            let next_path = req.uri().path().to_string();
            Redirect::to(&format!("/login?next={next_path}")).into_response()
        }
    }
}
