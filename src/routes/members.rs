use actix_multipart::form::MultipartForm;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use serde::Deserialize;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::members::{AllMembersQuery, MembersPageQuery};
use crate::forms::members::{AddMemberForm, RecordVisitForm, SaveMemberForm, UploadMembersForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{FlashNotifier, base_context, not_allowed, redirect, render_template};
use crate::services::{ServiceError, members as members_service};
use crate::views::member_table::{MEMBER_TABLE_COLUMNS, MemberRow};

const MEMBERS_PATH: &str = "/members";
const ADD_DIALOG_PATH: &str = "/members?add=true";

#[derive(Deserialize)]
struct MembersParams {
    add: Option<bool>,
}

#[derive(Deserialize)]
struct AllMembersParams {
    search: Option<String>,
}

#[get("/members")]
pub async fn show_members(
    request: HttpRequest,
    params: web::Query<MembersParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = MembersPageQuery {
        add: params.add.unwrap_or(false),
    };

    match members_service::load_member_page(repo.get_ref(), &user, query) {
        Ok(page) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                request.path(),
                &server_config.auth_service_url,
            );
            context.insert("page", &page.render());

            render_template(&tera, "members/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => not_allowed(),
        Err(err) => {
            log::error!("Failed to load members page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/members/add")]
pub async fn add_member(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddMemberForm>,
) -> impl Responder {
    match members_service::add_member(repo.get_ref(), &user, &FlashNotifier, form) {
        Ok(_) => redirect(MEMBERS_PATH),
        Err(ServiceError::Unauthorized) => not_allowed(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(ADD_DIALOG_PATH)
        }
        Err(err) => {
            log::error!("Failed to add member: {err}");
            FlashMessage::error("Failed to add the member.").send();
            redirect(ADD_DIALOG_PATH)
        }
    }
}

#[post("/members/upload")]
pub async fn upload_members(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadMembersForm>,
) -> impl Responder {
    let file = match form.open() {
        Ok(file) => file,
        Err(err) => {
            log::error!("Failed to open uploaded file: {err}");
            FlashMessage::error(err.to_string()).send();
            return redirect(MEMBERS_PATH);
        }
    };

    match members_service::upload_members(repo.get_ref(), &user, file) {
        Ok(count) => {
            FlashMessage::success(format!("{count} members imported.")).send();
            redirect(MEMBERS_PATH)
        }
        Err(ServiceError::Unauthorized) => not_allowed(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(MEMBERS_PATH)
        }
        Err(err) => {
            log::error!("Failed to import members: {err}");
            FlashMessage::error("Failed to import members.").send();
            redirect(MEMBERS_PATH)
        }
    }
}

#[get("/members/all")]
pub async fn show_all_members(
    request: HttpRequest,
    params: web::Query<AllMembersParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = AllMembersQuery {
        search: params.into_inner().search,
    };

    match members_service::load_all_members(repo.get_ref(), &user, query) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                request.path(),
                &server_config.auth_service_url,
            );
            context.insert("table", &data.table.render());
            context.insert("search_query", &data.search_query);

            render_template(&tera, "members/all.html", &context)
        }
        Err(ServiceError::Unauthorized) => not_allowed(),
        Err(err) => {
            log::error!("Failed to list members: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/member/{member_id}")]
pub async fn show_member(
    request: HttpRequest,
    member_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match members_service::load_member(repo.get_ref(), &user, member_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                request.path(),
                &server_config.auth_service_url,
            );
            context.insert("member", &data.member);
            context.insert("row", &MemberRow::from(&data.member));
            context.insert("columns", &MEMBER_TABLE_COLUMNS);
            context.insert("owner", &data.owner);

            render_template(&tera, "member/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => not_allowed(),
        Err(ServiceError::NotFound | ServiceError::TypeConstraint(_)) => {
            FlashMessage::error("Member not found.").send();
            redirect(MEMBERS_PATH)
        }
        Err(err) => {
            log::error!("Failed to load member: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/member/save")]
pub async fn save_member(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveMemberForm>,
) -> impl Responder {
    let member_url = format!("/member/{}", form.id);

    match members_service::save_member(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Member updated.").send();
            redirect(&member_url)
        }
        Err(ServiceError::Unauthorized) => not_allowed(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Member not found.").send();
            redirect(MEMBERS_PATH)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&member_url)
        }
        Err(err) => {
            log::error!("Failed to update member: {err}");
            FlashMessage::error("Failed to update the member.").send();
            redirect(&member_url)
        }
    }
}

#[post("/member/visit")]
pub async fn record_visit(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RecordVisitForm>,
) -> impl Responder {
    let member_url = format!("/member/{}", form.id);

    match members_service::record_visit(repo.get_ref(), &user, form, Utc::now().naive_utc()) {
        Ok(member) => {
            FlashMessage::success(format!(
                "Visit recorded. {} has {} visits.",
                member.full_name, member.total_visits
            ))
            .send();
            redirect(&member_url)
        }
        Err(ServiceError::Unauthorized) => not_allowed(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Member not found.").send();
            redirect(MEMBERS_PATH)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&member_url)
        }
        Err(err) => {
            log::error!("Failed to record visit: {err}");
            FlashMessage::error("Failed to record the visit.").send();
            redirect(&member_url)
        }
    }
}
