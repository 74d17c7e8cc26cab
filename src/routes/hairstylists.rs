use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Serialize;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::hairstylist::Hairstylist;
use crate::forms::hairstylists::AddHairstylistForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, not_allowed, redirect, render_template};
use crate::services::{ServiceError, hairstylists as hairstylists_service};

const HAIRSTYLISTS_PATH: &str = "/hairstylists";

#[derive(Serialize)]
struct HairstylistEntry<'a> {
    hairstylist: &'a Hairstylist,
    members_count: usize,
}

#[get("/hairstylists")]
pub async fn show_hairstylists(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match hairstylists_service::list_hairstylists(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                request.path(),
                &server_config.auth_service_url,
            );
            let entries: Vec<HairstylistEntry> = data
                .hairstylists
                .iter()
                .map(|(hairstylist, members_count)| HairstylistEntry {
                    hairstylist,
                    members_count: *members_count,
                })
                .collect();
            context.insert("hairstylists", &entries);

            render_template(&tera, "hairstylists/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => not_allowed(),
        Err(err) => {
            log::error!("Failed to list hairstylists: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/hairstylists/add")]
pub async fn add_hairstylist(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddHairstylistForm>,
) -> impl Responder {
    match hairstylists_service::add_hairstylist(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Hairstylist saved.").send();
            redirect(HAIRSTYLISTS_PATH)
        }
        Err(ServiceError::Unauthorized) => not_allowed(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(HAIRSTYLISTS_PATH)
        }
        Err(err) => {
            log::error!("Failed to save the hairstylist: {err}");
            FlashMessage::error("Failed to save the hairstylist.").send();
            redirect(HAIRSTYLISTS_PATH)
        }
    }
}
