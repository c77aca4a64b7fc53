//! HTTP surface of the site.
//!
//! Provides:
//! - Admin user authentication and sessions
//! - The content store backing both the public page and the admin area
//! - Route handlers and the auth middleware

pub mod auth;
pub mod content;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod templates;

pub use auth::AuthStore;
pub use content::ContentStore;
pub use middleware::AppState;
pub use routes::site_router;
