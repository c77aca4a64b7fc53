//! Route handlers.
//!
//! The public routes (home, login) and the auth-gated admin routes (content
//! list, add, edit, logout) are composed into one router; uploaded images
//! and other assets are served under `/static`.

use crate::upload;
use crate::web::auth::AdminSession;
use crate::web::error::WebError;
use crate::web::middleware::{AppState, SESSION_COOKIE, require_auth};
use crate::web::templates::{
    AddContentTemplate, AdminListTemplate, BaseContext, EditContentTemplate, HomeTemplate,
    LoginTemplate,
};
use askama::Template;
use axum::{
    Form, Router,
    body::Body,
    extract::{DefaultBodyLimit, Extension, Multipart, Path, State, multipart::MultipartError},
    http::{StatusCode, header},
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Build the site router.
///
/// The admin subset carries the auth middleware; the add/edit routes accept
/// multipart uploads of unbounded size, matching the original site's lack of
/// an upload limit.
pub fn site_router(state: Arc<AppState>, static_dir: &std::path::Path) -> Router {
    let protected = Router::new()
        .route("/admin", get(admin_list))
        .route("/admin/add", get(add_page).post(add_submit))
        .route("/admin/edit/{id}", get(edit_page).post(edit_submit))
        .route("/logout", get(logout))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(DefaultBodyLimit::disable());

    Router::new()
        .route("/", get(home))
        .route("/login", get(login_page).post(login_submit))
        .merge(protected)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Render a template into an HTML response.
fn render<T: Template>(template: &T) -> Result<Response, WebError> {
    Ok(Html(template.render()?).into_response())
}

/// Public home page: every content row, grouped by section in the template.
async fn home(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let contents = state.content.list_all().await?;
    render(&HomeTemplate { contents })
}

/// Login page handler.
async fn login_page(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, WebError> {
    // Already-authenticated visitors go straight to the admin list
    if let Some(cookie) = jar.get(SESSION_COOKIE)
        && state.auth.validate_session(cookie.value()).await?.is_some()
    {
        return Ok(Redirect::to("/admin").into_response());
    }

    render(&LoginTemplate { error: None })
}

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

/// Login form submission handler.
async fn login_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let session_id = match state
        .auth
        .authenticate(&form.username, &form.password, state.session_timeout_secs)
        .await?
    {
        Some(session_id) => session_id,
        None => {
            return render(&LoginTemplate {
                error: Some("Invalid username or password".to_string()),
            });
        }
    };

    let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Strict");

    Ok(Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(header::LOCATION, "/admin")
        .header(header::SET_COOKIE, cookie)
        .body(Body::empty())
        .unwrap())
}

/// Logout handler.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
) -> Result<Response, WebError> {
    if let Err(e) = state.auth.delete_session(&session.session_id).await {
        error!("Failed to delete session: {e}");
    }

    // Clear cookie by setting it to expire in the past
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0");

    Ok(Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(header::LOCATION, "/")
        .header(header::SET_COOKIE, cookie)
        .body(Body::empty())
        .unwrap())
}

/// Admin content list.
async fn admin_list(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
) -> Result<Response, WebError> {
    let contents = state.content.list_all().await?;
    render(&AdminListTemplate {
        base: BaseContext {
            username: session.username,
        },
        contents,
    })
}

/// Add-content form page.
async fn add_page(Extension(session): Extension<AdminSession>) -> Result<Response, WebError> {
    render(&AddContentTemplate {
        base: BaseContext {
            username: session.username,
        },
    })
}

/// Typed view of the add/edit multipart form.
#[derive(Default)]
struct ContentForm {
    section: Option<String>,
    title: Option<String>,
    content: Option<String>,
    /// Client filename and bytes; only present when the part had a filename.
    image: Option<(String, Vec<u8>)>,
}

fn field_err(field: &'static str) -> impl FnOnce(MultipartError) -> WebError {
    move |e| WebError::Validation(format!("{field}: {e}"))
}

/// Parse the multipart body of the add/edit forms into a typed value.
async fn read_content_form(mut multipart: Multipart) -> Result<ContentForm, WebError> {
    let mut form = ContentForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::Validation(format!("unreadable multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "section" => form.section = Some(field.text().await.map_err(field_err("section"))?),
            "title" => form.title = Some(field.text().await.map_err(field_err("title"))?),
            "content" => form.content = Some(field.text().await.map_err(field_err("content"))?),
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(field_err("image"))?;
                if !filename.is_empty() {
                    form.image = Some((filename, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Sanitize and persist an uploaded image, returning the stored filename.
fn store_image(state: &AppState, filename: &str, bytes: &[u8]) -> Result<String, WebError> {
    let name = upload::sanitize_filename(filename);
    if name.is_empty() {
        return Err(WebError::Validation(
            "image: filename contains no usable characters".to_string(),
        ));
    }
    upload::save(&state.image_dir, &name, bytes)?;
    Ok(name)
}

/// Add-content form submission.
async fn add_submit(
    State(state): State<Arc<AppState>>,
    Extension(_session): Extension<AdminSession>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let form = read_content_form(multipart).await?;

    let section = form
        .section
        .filter(|s| !s.is_empty())
        .ok_or_else(|| WebError::Validation("section is required".to_string()))?;

    let image_path = match &form.image {
        Some((filename, bytes)) => Some(store_image(&state, filename, bytes)?),
        None => None,
    };

    state
        .content
        .insert(
            &section,
            form.title.as_deref(),
            form.content.as_deref(),
            image_path.as_deref(),
        )
        .await?;

    Ok(Redirect::to("/admin").into_response())
}

/// Edit form page, pre-filled from the existing row.
async fn edit_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let content = state.content.get(id).await?.ok_or(WebError::NotFound)?;

    render(&EditContentTemplate {
        base: BaseContext {
            username: session.username,
        },
        content,
    })
}

/// Edit form submission. Updates title, content and optionally the image;
/// the row's section stays whatever it was at creation.
async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Extension(_session): Extension<AdminSession>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    if state.content.get(id).await?.is_none() {
        return Err(WebError::NotFound);
    }

    let form = read_content_form(multipart).await?;

    let image_path = match &form.image {
        Some((filename, bytes)) => Some(store_image(&state, filename, bytes)?),
        None => None,
    };

    state
        .content
        .update(
            id,
            form.title.as_deref(),
            form.content.as_deref(),
            image_path.as_deref(),
        )
        .await?;

    Ok(Redirect::to("/admin").into_response())
}
