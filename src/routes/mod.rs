//! HTTP handlers and the helpers they share.

use actix_web::{HttpResponse, http::header};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;
use crate::views::member_page::Notifier;
use crate::views::navigation::NavigationShell;

pub mod api;
pub mod hairstylists;
pub mod main;
pub mod members;

pub const NOT_ASSIGNED_PATH: &str = "/na";
pub const NOT_ALLOWED_MESSAGE: &str = "You are not allowed to do that.";

/// Maps a flash level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info | Level::Debug => "info",
    }
}

#[derive(Serialize)]
struct Alert<'a> {
    message: &'a str,
    level: &'static str,
}

/// Context shared by every page: alerts, signed-in user, sidebar and the
/// auth service link.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_path: &str,
    auth_service_url: &str,
) -> Context {
    let alerts: Vec<Alert> = flash_messages
        .iter()
        .map(|f| Alert {
            message: f.content(),
            level: alert_level_to_str(&f.level()),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_path", current_path);
    context.insert(
        "navigation",
        &NavigationShell::for_user(user).render(current_path),
    );
    context.insert("home_url", auth_service_url);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// `303 See Other` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Sends notifications as success flash messages shown on the next page.
pub struct FlashNotifier;

impl Notifier for FlashNotifier {
    fn notify(&self, title: &str, description: &str) {
        FlashMessage::success(format!("{title}. {description}")).send();
    }
}

/// Redirect used whenever a service answers `Unauthorized`.
pub fn not_allowed() -> HttpResponse {
    FlashMessage::error(NOT_ALLOWED_MESSAGE).send();
    redirect(NOT_ASSIGNED_PATH)
}
