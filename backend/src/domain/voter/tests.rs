//! Tests for voter identifiers and status flags.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn new_voter() -> NewVoter {
    NewVoter {
        user_id: UserId::random(),
        voter_id: VoterId::new("ABC1234567").expect("voter id"),
        aadhar_number: AadharNumber::new("123412341234").expect("aadhar"),
        phone_number: PhoneNumber::new("9876543210").expect("phone"),
    }
}

#[rstest]
#[case("", VoterValidationError::EmptyVoterId)]
#[case("   ", VoterValidationError::EmptyVoterId)]
#[case("ABC-123", VoterValidationError::VoterIdInvalidCharacters)]
#[case("voter id", VoterValidationError::VoterIdInvalidCharacters)]
#[case("A123456789012345678901", VoterValidationError::VoterIdTooLong { max: VOTER_ID_MAX })]
fn voter_id_rejects_invalid_values(#[case] raw: &str, #[case] expected: VoterValidationError) {
    assert_eq!(VoterId::new(raw), Err(expected));
}

#[rstest]
#[case("12341234123")]
#[case("1234123412345")]
#[case("12341234123a")]
#[case("١٢٣٤٥٦٧٨٩٠١٢")]
#[case("１２３４１２３４１２３４")]
fn aadhar_requires_twelve_digits(#[case] raw: &str) {
    assert_eq!(
        AadharNumber::new(raw),
        Err(VoterValidationError::InvalidAadharNumber)
    );
}

#[rstest]
#[case("987654321")]
#[case("+919876543210")]
#[case("９８７６５４３２１０")]
#[case("९८७६५४३२१०")]
fn phone_requires_ten_digits(#[case] raw: &str) {
    assert_eq!(
        PhoneNumber::new(raw),
        Err(VoterValidationError::InvalidPhoneNumber)
    );
}

#[rstest]
fn identifiers_are_trimmed() {
    let phone = PhoneNumber::new(" 9876543210 ").expect("phone");
    assert_eq!(phone.as_ref(), "9876543210");
}

#[rstest]
#[case(VoterValidationError::VoterIdInvalidCharacters, "voter_id")]
#[case(VoterValidationError::InvalidAadharNumber, "aadhar_number")]
#[case(VoterValidationError::InvalidPhoneNumber, "phone_number")]
fn errors_name_their_field(#[case] error: VoterValidationError, #[case] field: &str) {
    assert_eq!(error.field(), field);
}

#[rstest]
fn registered_voters_start_unverified_without_vote(new_voter: NewVoter) {
    let voter = Voter::registered(VoterPk::new(7), new_voter);
    assert_eq!(voter.pk(), VoterPk::new(7));
    assert!(!voter.is_verified());
    assert!(!voter.has_voted());
}

#[rstest]
fn status_flags_only_move_forward(new_voter: NewVoter) {
    let mut voter = Voter::registered(VoterPk::new(1), new_voter);
    voter.verify();
    voter.record_vote();
    voter.verify();
    assert!(voter.is_verified());
    assert!(voter.has_voted());
}

#[rstest]
fn deserialisation_validates() {
    let result: Result<VoterId, _> = serde_json::from_str("\"bad id\"");
    assert!(result.is_err());
}
