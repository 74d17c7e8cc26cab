use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::api::MembersQuery;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, api as api_service};

#[derive(Deserialize)]
struct ApiV1MembersParams {
    search: Option<String>,
}

#[get("/v1/members")]
pub async fn api_v1_members(
    params: web::Query<ApiV1MembersParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query = MembersQuery {
        search: params.into_inner().search,
    };

    match api_service::list_members(repo.get_ref(), &user, query) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to list members: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/members/{public_id}")]
pub async fn api_v1_member(
    public_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::get_member(repo.get_ref(), &user, &public_id) {
        Ok(member) => HttpResponse::Ok().json(member),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to get member: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
