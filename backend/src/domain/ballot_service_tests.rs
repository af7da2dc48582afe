//! Tests for the ballot service.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockElectionRepository, MockVoteRepository, MockVoterRepository, VoteRepositoryError,
};
use crate::domain::{
    AadharNumber, Candidate, CandidateTally, ElectionId, ErrorCode, NewElection, PartyId,
    PhoneNumber, VoterDraft, VoterId, VoterPk,
};
use crate::test_support::MutableClock;

type Service = BallotService<MockVoterRepository, MockElectionRepository, MockVoteRepository>;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn election(now: DateTime<Utc>) -> Election {
    let details = NewElection::try_new(
        "General",
        "",
        now - Duration::hours(1),
        now + Duration::hours(1),
    )
    .expect("valid election");
    Election::new(ElectionId::new(3), details)
}

fn voter(is_verified: bool, has_voted: bool) -> Voter {
    Voter::from_draft(VoterDraft {
        pk: VoterPk::new(11),
        user_id: UserId::random(),
        voter_id: VoterId::new("ABC1234567").expect("voter id"),
        aadhar_number: AadharNumber::new("123412341234").expect("aadhar"),
        phone_number: PhoneNumber::new("9876543210").expect("phone"),
        is_verified,
        has_voted,
    })
}

fn candidate(id: i64, election: ElectionId) -> Candidate {
    Candidate {
        id: CandidateId::new(id),
        name: format!("Candidate {id}"),
        photo: String::new(),
        bio: String::new(),
        party_id: PartyId::new(1),
        election_id: election,
    }
}

fn voters_returning(found: Option<Voter>) -> MockVoterRepository {
    let mut voters = MockVoterRepository::new();
    voters.expect_find_by_user().return_once(move |_| Ok(found));
    voters
}

fn elections_returning(found: Option<Election>) -> MockElectionRepository {
    let mut elections = MockElectionRepository::new();
    elections
        .expect_current_election()
        .return_once(move |_| Ok(found));
    elections
}

fn service(
    now: DateTime<Utc>,
    voters: MockVoterRepository,
    elections: MockElectionRepository,
    votes: MockVoteRepository,
) -> Service {
    BallotService::new(
        Arc::new(voters),
        Arc::new(elections),
        Arc::new(votes),
        Arc::new(MutableClock::new(now)),
    )
}

#[rstest]
#[tokio::test]
async fn verified_voter_casts_one_vote(now: DateTime<Utc>, election: Election) {
    let election_id = election.id();
    let mut elections = elections_returning(Some(election));
    elections
        .expect_find_candidate()
        .withf(move |e, c| *e == election_id && *c == CandidateId::new(2))
        .return_once(move |_, c| Ok(Some(candidate(c.get(), election_id))));
    let mut votes = MockVoteRepository::new();
    votes
        .expect_cast_vote()
        .times(1)
        .withf(move |vote| {
            vote.voter_pk == VoterPk::new(11)
                && vote.candidate_id == CandidateId::new(2)
                && vote.election_id == election_id
        })
        .return_once(move |vote| {
            Ok(Vote {
                id: 1,
                voter_pk: vote.voter_pk,
                candidate_id: vote.candidate_id,
                election_id: vote.election_id,
                cast_at: now,
            })
        });

    let svc = service(now, voters_returning(Some(voter(true, false))), elections, votes);
    let user = UserId::random();
    let vote = svc
        .cast_vote(&user, Some(CandidateId::new(2)))
        .await
        .expect("vote recorded");

    assert_eq!(vote.candidate_id, CandidateId::new(2));
}

#[rstest]
#[case(None, true, false, ErrorCode::NotFound, "Voter profile not found", Some("/"))]
#[case(Some(false), true, false, ErrorCode::NotFound, "No active election at this time", Some("/"))]
#[case(Some(true), false, false, ErrorCode::Forbidden, "Please verify your identity first", Some("/login/"))]
#[case(Some(true), true, true, ErrorCode::Conflict, "You have already voted in this election!", Some("/results/"))]
#[tokio::test]
async fn preconditions_are_checked_in_order(
    now: DateTime<Utc>,
    election: Election,
    #[case] active: Option<bool>,
    #[case] is_verified: bool,
    #[case] has_voted: bool,
    #[case] code: ErrorCode,
    #[case] message: &str,
    #[case] redirect: Option<&str>,
) {
    // `active: None` means the voter profile itself is missing.
    let found = active.map(|_| voter(is_verified, has_voted));
    let elections = match active {
        None => MockElectionRepository::new(),
        Some(true) => elections_returning(Some(election)),
        Some(false) => elections_returning(None),
    };
    let mut votes = MockVoteRepository::new();
    votes.expect_cast_vote().times(0);

    let svc = service(now, voters_returning(found), elections, votes);
    let err = svc
        .cast_vote(&UserId::random(), Some(CandidateId::new(1)))
        .await
        .expect_err("precondition fails");

    assert_eq!(err.code(), code);
    assert_eq!(err.message(), message);
    assert_eq!(err.redirect(), redirect);
}

#[rstest]
#[case(None)]
#[case(Some(CandidateId::new(99)))]
#[tokio::test]
async fn invalid_candidate_changes_nothing(
    now: DateTime<Utc>,
    election: Election,
    #[case] submitted: Option<CandidateId>,
) {
    let mut elections = elections_returning(Some(election));
    elections
        .expect_find_candidate()
        .returning(|_, _| Ok(None));
    let mut votes = MockVoteRepository::new();
    votes.expect_cast_vote().times(0);

    let svc = service(now, voters_returning(Some(voter(true, false))), elections, votes);
    let err = svc
        .cast_vote(&UserId::random(), submitted)
        .await
        .expect_err("candidate rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), INVALID_CANDIDATE);
    assert_eq!(err.field(), Some("candidate"));
}

#[rstest]
#[tokio::test]
async fn constraint_violation_reads_as_already_voted(now: DateTime<Utc>, election: Election) {
    let election_id = election.id();
    let mut elections = elections_returning(Some(election));
    elections
        .expect_find_candidate()
        .return_once(move |_, c| Ok(Some(candidate(c.get(), election_id))));
    let mut votes = MockVoteRepository::new();
    votes
        .expect_cast_vote()
        .return_once(|_| Err(VoteRepositoryError::already_voted()));

    let svc = service(now, voters_returning(Some(voter(true, false))), elections, votes);
    let err = svc
        .cast_vote(&UserId::random(), Some(CandidateId::new(1)))
        .await
        .expect_err("second vote rejected");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.redirect(), Some("/results/"));
}

#[rstest]
#[tokio::test]
async fn ballot_lists_candidates_of_active_election(now: DateTime<Utc>, election: Election) {
    let election_id = election.id();
    let mut elections = elections_returning(Some(election));
    elections.expect_ballot_entries().return_once(move |_| {
        Ok(vec![crate::domain::BallotEntry {
            candidate: candidate(1, election_id),
            party_name: "Lotus".to_owned(),
            party_symbol: "symbols/lotus.png".to_owned(),
        }])
    });

    let svc = service(
        now,
        voters_returning(Some(voter(true, false))),
        elections,
        MockVoteRepository::new(),
    );
    let ballot = svc.ballot(&UserId::random()).await.expect("ballot");

    assert_eq!(ballot.election.id(), election_id);
    assert_eq!(ballot.candidates.len(), 1);
}

#[rstest]
#[tokio::test]
async fn results_rank_counts(now: DateTime<Utc>, election: Election) {
    let row = |id: i64, votes: u64| CandidateTally {
        candidate_id: CandidateId::new(id),
        candidate_name: format!("Candidate {id}"),
        party_name: "Party".to_owned(),
        votes,
    };
    let mut votes = MockVoteRepository::new();
    votes
        .expect_tally()
        .return_once(move |_| Ok(vec![row(1, 3), row(2, 5), row(3, 2)]));

    // Results stay visible after voting.
    let svc = service(
        now,
        voters_returning(Some(voter(true, true))),
        elections_returning(Some(election)),
        votes,
    );
    let outcome = svc.results(&UserId::random()).await.expect("results");

    let TallyOutcome::Counted(tally) = outcome else {
        panic!("expected counted tally");
    };
    assert_eq!(
        tally.leader().map(|leader| leader.candidate_id),
        Some(CandidateId::new(2))
    );
    assert_eq!(tally.leader_percentage(), Some(50.0));
}

#[rstest]
#[tokio::test]
async fn results_without_votes(now: DateTime<Utc>, election: Election) {
    let mut votes = MockVoteRepository::new();
    votes.expect_tally().return_once(|_| Ok(Vec::new()));

    let svc = service(
        now,
        voters_returning(Some(voter(false, false))),
        elections_returning(Some(election)),
        votes,
    );
    let outcome = svc.results(&UserId::random()).await.expect("results");

    assert!(matches!(outcome, TallyOutcome::NoVotes { .. }));
}

#[rstest]
#[tokio::test]
async fn results_need_active_election(now: DateTime<Utc>) {
    let svc = service(
        now,
        voters_returning(Some(voter(true, true))),
        elections_returning(None),
        MockVoteRepository::new(),
    );
    let err = svc.results(&UserId::random()).await.expect_err("no election");

    assert_eq!(err.message(), "No active election");
    assert_eq!(err.redirect(), Some("/"));
}
