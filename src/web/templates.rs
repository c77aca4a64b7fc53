//! Askama templates for the public page and the admin UI.

use crate::web::content::ContentRow;
use askama::Template;

/// Base data available to all admin templates
pub struct BaseContext {
    pub username: String,
}

/// Public home page
#[derive(Template)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub contents: Vec<ContentRow>,
}

/// Login page template
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Admin content list
#[derive(Template)]
#[template(path = "admin/list.html")]
pub struct AdminListTemplate {
    pub base: BaseContext,
    pub contents: Vec<ContentRow>,
}

/// Add-content form
#[derive(Template)]
#[template(path = "admin/add.html")]
pub struct AddContentTemplate {
    pub base: BaseContext,
}

/// Edit-content form, pre-filled from the existing row
#[derive(Template)]
#[template(path = "admin/edit.html")]
pub struct EditContentTemplate {
    pub base: BaseContext,
    pub content: ContentRow,
}
