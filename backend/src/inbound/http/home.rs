//! Public landing page.
//!
//! ```text
//! GET / -> {"election": {...} | null}
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Election, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Landing page body.
#[derive(Debug, Serialize, ToSchema)]
pub struct HomePage {
    /// Election open right now, if any.
    pub election: Option<Election>,
}

/// Show the election currently open for voting.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Current election or null", body = HomePage),
        (status = 503, description = "Catalogue unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pages"],
    operation_id = "home",
    security([])
)]
#[get("/")]
pub async fn home(state: web::Data<HttpState>) -> ApiResult<web::Json<HomePage>> {
    let election = state.elections.current_election().await?;
    Ok(web::Json(HomePage { election }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ElectionId, NewElection};
    use crate::inbound::http::test_utils::{MockPorts, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::{Duration, Utc};
    use serde_json::Value;

    #[actix_web::test]
    async fn shows_current_election() {
        let mut ports = MockPorts::default();
        ports.elections.expect_current_election().times(1).returning(|| {
            let now = Utc::now();
            let details = NewElection::try_new("General", "", now, now + Duration::hours(1))
                .expect("valid election");
            Ok(Some(Election::new(ElectionId::new(3), details)))
        });
        let app = test::init_service(test_app(ports.into_state())).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["election"]["id"], 3);
        assert_eq!(body["election"]["name"], "General");
    }

    #[actix_web::test]
    async fn reports_null_between_elections() {
        let mut ports = MockPorts::default();
        ports
            .elections
            .expect_current_election()
            .returning(|| Ok(None));
        let app = test::init_service(test_app(ports.into_state())).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let body: Value = test::read_body_json(res).await;
        assert!(body["election"].is_null());
    }

    #[actix_web::test]
    async fn outage_maps_to_service_unavailable() {
        let mut ports = MockPorts::default();
        ports
            .elections
            .expect_current_election()
            .returning(|| Err(Error::service_unavailable("catalogue down")));
        let app = test::init_service(test_app(ports.into_state())).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
