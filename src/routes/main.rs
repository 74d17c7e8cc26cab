use actix_identity::Identity;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, not_allowed, redirect, render_template};
use crate::services::{ServiceError, main as main_service};
use crate::views::navigation::ROOT_DASHBOARD_PATH;
use crate::views::stat::StatCardView;

#[get("/")]
pub async fn show_dashboard(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match main_service::load_dashboard(repo.get_ref(), &user, Utc::now().naive_utc()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                request.path(),
                &server_config.auth_service_url,
            );
            let stats: Vec<StatCardView> = data.stats.iter().map(|card| card.render()).collect();
            context.insert("stats", &stats);

            render_template(&tera, "main/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => not_allowed(),
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Landing page for signed-in users lacking the required roles.
#[get("/na")]
pub async fn not_assigned(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = match &user {
        Some(user) => base_context(
            &flash_messages,
            user,
            "/na",
            &server_config.auth_service_url,
        ),
        None => {
            let mut context = Context::new();
            context.insert("home_url", &server_config.auth_service_url);
            context
        }
    };

    render_template(&tera, "main/not_assigned.html", &context)
}

/// Hands the visitor over to the external auth service.
#[get("/auth/signin")]
pub async fn signin(server_config: web::Data<ServerConfig>) -> impl Responder {
    redirect(&server_config.auth_service_url)
}

#[post("/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    redirect(ROOT_DASHBOARD_PATH)
}
