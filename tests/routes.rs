use actix_identity::{Identity, IdentityMiddleware};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpMessage, HttpRequest, HttpResponse, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use tera::Tera;

use circle_keeper::auth::encode_token;
use circle_keeper::domain::auth::AuthenticatedUser;
use circle_keeper::domain::hairstylist::NewHairstylist;
use circle_keeper::domain::member::NewMember;
use circle_keeper::domain::types::{MemberName, PhoneNumber};
use circle_keeper::middleware::RedirectUnauthorized;
use circle_keeper::models::config::ServerConfig;
use circle_keeper::repository::{DieselRepository, HairstylistWriter, MemberWriter};
use circle_keeper::routes::alert_level_to_str;
use circle_keeper::routes::api::{api_v1_member, api_v1_members};
use circle_keeper::routes::main::show_dashboard;
use circle_keeper::routes::members::{add_member, show_members};
use circle_keeper::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, SERVICE_HAIRSTYLIST_ROLE};

mod common;

const SECRET: &str = "integration-test-secret-integration-test-secret-0123456789abcdef";

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8080,
        database_url: ":memory:".to_string(),
        templates_dir: "templates/**/*".to_string(),
        secret: SECRET.to_string(),
        auth_service_url: "http://auth.localhost".to_string(),
    }
}

fn user(roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "1".to_string(),
        email: "ana@salon.example".to_string(),
        name: "Ana".to_string(),
        roles: roles.iter().map(|r| (*r).to_string()).collect(),
        exp: 4_102_444_800,
    }
}

/// Stores the token of the user carried in the `roles` query as the identity.
async fn login(req: HttpRequest, query: web::Query<Vec<(String, String)>>) -> HttpResponse {
    let roles: Vec<&str> = query
        .iter()
        .filter(|(key, _)| key == "role")
        .map(|(_, value)| value.as_str())
        .collect();
    let token = encode_token(&user(&roles), SECRET).expect("sign token");
    Identity::login(&req.extensions(), token).expect("log in");
    HttpResponse::Ok().finish()
}

fn session_cookie<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == "id")
        .expect("session cookie")
        .into_owned()
}

macro_rules! test_app {
    ($repo:expr) => {{
        let key = Key::generate();
        let message_store = CookieMessageStore::builder(key.clone()).build();
        test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(message_store).build())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key)
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(web::Data::new($repo))
                .app_data(web::Data::new(server_config()))
                .app_data(web::Data::new(
                    Tera::new("templates/**/*").expect("templates parse"),
                ))
                .route("/test/login", web::get().to(login))
                .service(
                    web::scope("/api")
                        .service(api_v1_members)
                        .service(api_v1_member),
                )
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .service(show_dashboard)
                        .service(show_members)
                        .service(add_member),
                ),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn anonymous_page_visit_redirects_to_signin() {
    let test_db = common::TestDb::new("anonymous_page_visit.db");
    let app = test_app!(DieselRepository::new(test_db.pool()));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/members").to_request()).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/auth/signin");
}

#[actix_web::test]
async fn anonymous_api_call_is_unauthorized() {
    let test_db = common::TestDb::new("anonymous_api_call.db");
    let app = test_app!(DieselRepository::new(test_db.pool()));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/members").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn admin_lists_members_through_api() {
    let test_db = common::TestDb::new("admin_lists_members.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = repo
        .create_or_update_hairstylist(
            &NewHairstylist::try_new("Bea", "bea@salon.example").unwrap(),
        )
        .unwrap();
    repo.create_member(&NewMember::new(
        owner.id,
        MemberName::new("Maria").unwrap(),
        PhoneNumber::new("+79161234567").unwrap(),
        None,
    ))
    .unwrap();
    let app = test_app!(repo);

    let login = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/test/login?role={SERVICE_ACCESS_ROLE}&role={SERVICE_ADMIN_ROLE}"
            ))
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&login);

    let body: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/members?search=mar")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(body["total"], 1);
    assert_eq!(body["members"][0]["full_name"], "Maria");
}

#[actix_web::test]
async fn admin_fetches_member_by_public_id() {
    let test_db = common::TestDb::new("admin_fetches_member.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = repo
        .create_or_update_hairstylist(
            &NewHairstylist::try_new("Bea", "bea@salon.example").unwrap(),
        )
        .unwrap();
    let member = repo
        .create_member(&NewMember::new(
            owner.id,
            MemberName::new("Maria").unwrap(),
            PhoneNumber::new("+79161234567").unwrap(),
            None,
        ))
        .unwrap();
    let app = test_app!(repo);

    let login = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/test/login?role={SERVICE_ACCESS_ROLE}&role={SERVICE_ADMIN_ROLE}"
            ))
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&login);

    let body: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/members/{}", member.public_id))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(body["full_name"], "Maria");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/members/6f1c1f7e-0000-4000-8000-000000000000")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn hairstylist_sees_empty_table_then_added_member() {
    let test_db = common::TestDb::new("hairstylist_member_page.db");
    let app = test_app!(DieselRepository::new(test_db.pool()));

    let login = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/test/login?role={SERVICE_ACCESS_ROLE}&role={SERVICE_HAIRSTYLIST_ROLE}"
            ))
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&login);

    let body = test::call_and_read_body(
        &app,
        test::TestRequest::get()
            .uri("/members")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("No members found."));
    assert!(html.contains("colspan=\"7\""));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/members/add")
            .cookie(cookie.clone())
            .set_form([
                ("full_name", "Maria Silva"),
                ("whatsapp_number", "+79161234567"),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/members");

    let body = test::call_and_read_body(
        &app,
        test::TestRequest::get()
            .uri("/members")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Maria Silva"));
    assert!(!html.contains("No members found."));
}

#[actix_web::test]
async fn admin_without_hairstylist_role_gets_placeholder() {
    let test_db = common::TestDb::new("admin_placeholder.db");
    let app = test_app!(DieselRepository::new(test_db.pool()));

    let login = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/test/login?role={SERVICE_ACCESS_ROLE}&role={SERVICE_ADMIN_ROLE}"
            ))
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&login);

    let body = test::call_and_read_body(
        &app,
        test::TestRequest::get()
            .uri("/members")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("id=\"member-page-placeholder\""));
    assert!(!html.contains("id=\"add-member-trigger\""));
    assert!(!html.contains("<table"));
}
