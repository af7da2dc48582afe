//! Ballot and results handlers.
//!
//! ```text
//! GET  /vote/     -> {"election": {...}, "candidates": [...]}
//! POST /vote/     candidate=12
//! GET  /results/  -> {"election": {...}, "winner": {...}, "totalVotes": 9, ...}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::Ballot;
use crate::domain::{
    CandidateId, CandidateTally, Election, Error, NO_VOTES_MESSAGE, Tally, TallyOutcome,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::transition::Transition;

/// Ballot submission body.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct VoteForm {
    /// Candidate id as submitted; anything that is not an id counts as no choice.
    pub candidate: Option<String>,
}

impl VoteForm {
    fn candidate_id(&self) -> Option<CandidateId> {
        self.candidate
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(CandidateId::new)
    }
}

/// Results page body.
///
/// Either `winner`, `votePercentage` and `totalVotes` are present, or
/// `message` explains that nothing has been cast yet.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultsPage {
    pub election: Election,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<CandidateTally>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_percentage: Option<f64>,
    pub total_votes: u64,
    pub standings: Vec<CandidateTally>,
}

impl From<TallyOutcome> for ResultsPage {
    fn from(outcome: TallyOutcome) -> Self {
        match outcome {
            TallyOutcome::NoVotes { election } => Self {
                election,
                message: Some(NO_VOTES_MESSAGE.to_owned()),
                winner: None,
                vote_percentage: None,
                total_votes: 0,
                standings: Vec::new(),
            },
            TallyOutcome::Counted(tally) => Self::counted(&tally),
        }
    }
}

impl ResultsPage {
    fn counted(tally: &Tally) -> Self {
        Self {
            election: tally.election().clone(),
            message: None,
            winner: tally.leader().cloned(),
            vote_percentage: tally.leader_percentage(),
            total_votes: tally.total_votes(),
            standings: tally.standings().to_vec(),
        }
    }
}

/// Ballot for the active election.
#[utoipa::path(
    get,
    path = "/vote/",
    responses(
        (status = 200, description = "Active election and candidates", body = Ballot),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Voter not verified", body = Error),
        (status = 404, description = "No voter profile or no active election", body = Error),
        (status = 409, description = "Already voted", body = Error)
    ),
    tags = ["ballot"],
    operation_id = "ballot",
    security(("SessionCookie" = []))
)]
#[get("/vote/")]
pub async fn ballot(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Ballot>> {
    let user_id = session.require_user_id()?;
    let ballot = state.ballot.ballot(&user_id).await?;
    Ok(web::Json(ballot))
}

/// Record the voter's choice.
#[utoipa::path(
    post,
    path = "/vote/",
    request_body(content = VoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Vote recorded", body = Transition),
        (status = 400, description = "Invalid candidate", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Voter not verified", body = Error),
        (status = 404, description = "No voter profile or no active election", body = Error),
        (status = 409, description = "Already voted", body = Error)
    ),
    tags = ["ballot"],
    operation_id = "castVote",
    security(("SessionCookie" = []))
)]
#[post("/vote/")]
pub async fn cast_vote(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<VoteForm>,
) -> ApiResult<web::Json<Transition>> {
    let user_id = session.require_user_id()?;
    state
        .ballot_command
        .cast_vote(&user_id, form.candidate_id())
        .await?;
    Ok(web::Json(Transition::new(
        "Your vote has been recorded!",
        "/results/",
    )))
}

/// Tally of the active election.
#[utoipa::path(
    get,
    path = "/results/",
    responses(
        (status = 200, description = "Current standings", body = ResultsPage),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "No voter profile or no active election", body = Error)
    ),
    tags = ["ballot"],
    operation_id = "results",
    security(("SessionCookie" = []))
)]
#[get("/results/")]
pub async fn results(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ResultsPage>> {
    let user_id = session.require_user_id()?;
    let outcome = state.results.results(&user_id).await?;
    Ok(web::Json(ResultsPage::from(outcome)))
}

#[cfg(test)]
#[path = "ballot_tests.rs"]
mod tests;
