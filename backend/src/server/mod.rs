//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use voting::Trace;
#[cfg(debug_assertions)]
use voting::doc::ApiDoc;
use voting::inbound::http::configure;
use voting::inbound::http::health::{HealthState, live, ready};
use voting::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Session cookie lifetime.
const SESSION_TTL_HOURS: i64 = 2;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(
            actix_web::cookie::time::Duration::hours(SESSION_TTL_HOURS),
        ))
        .build();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] carrying session, binding and adapter settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Smoke tests for the assembled application.

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};
    use std::net::SocketAddr;

    fn deps() -> AppDependencies {
        let config = ServerConfig::new(
            Key::generate(),
            false,
            SameSite::Lax,
            SocketAddr::from(([127, 0, 0, 1], 0)),
        );
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(build_http_state(&config)),
            key: config.key.clone(),
            cookie_secure: config.cookie_secure,
            same_site: config.same_site,
        }
    }

    #[actix_web::test]
    async fn home_and_probes_are_mounted() {
        let app = test::init_service(build_app(deps())).await;

        let home = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(home.status(), StatusCode::OK);
        let body: Value = test::read_body_json(home).await;
        assert_eq!(body, json!({ "election": null }));

        let ready_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(ready_res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn registration_is_accepted_end_to_end() {
        let app = test::init_service(build_app(deps())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register/")
                .set_form([
                    ("voter_id", "ABC1234567"),
                    ("aadhar_number", "123412341234"),
                    ("phone_number", "9876543210"),
                    ("password1", "correct horse"),
                    ("password2", "correct horse"),
                ])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["next"], "/login/");
    }

    #[actix_web::test]
    async fn ballot_requires_a_session() {
        let app = test::init_service(build_app(deps())).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/vote/").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
