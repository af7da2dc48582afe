//! Voter identity model.
//!
//! Purpose: hold the identifiers a voter registers with and the two status
//! flags the login and ballot flows mutate. Identifier newtypes validate on
//! construction so adapters can only ever store well-formed values.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::UserId;

/// Maximum length of a voter ID.
pub const VOTER_ID_MAX: usize = 20;

/// Validation errors raised by the voter identifier newtypes.
///
/// Display strings are shown to voters as field errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoterValidationError {
    /// Voter ID was blank.
    #[error("This field is required.")]
    EmptyVoterId,
    /// Voter ID exceeded [`VOTER_ID_MAX`].
    #[error("Ensure this value has at most {max} characters.")]
    VoterIdTooLong { max: usize },
    /// Voter ID contained non-alphanumeric characters.
    #[error("Only alphanumeric characters allowed.")]
    VoterIdInvalidCharacters,
    /// Aadhar number was not exactly twelve digits.
    #[error("Enter valid 12-digit Aadhar number.")]
    InvalidAadharNumber,
    /// Phone number was not exactly ten digits.
    #[error("Enter valid 10-digit phone number.")]
    InvalidPhoneNumber,
}

impl VoterValidationError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyVoterId | Self::VoterIdTooLong { .. } | Self::VoterIdInvalidCharacters => {
                "voter_id"
            }
            Self::InvalidAadharNumber => "aadhar_number",
            Self::InvalidPhoneNumber => "phone_number",
        }
    }
}

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern).unwrap_or_else(|error| panic!("regex {pattern} failed to compile: {error}"))
    })
}

static VOTER_ID_RE: OnceLock<Regex> = OnceLock::new();
static AADHAR_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

/// Primary key of a stored voter record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterPk(i64);

impl VoterPk {
    /// Wrap a storage key.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw key value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for VoterPk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public voter ID printed on the voter card.
///
/// ## Invariants
/// - Trimmed, non-empty, at most [`VOTER_ID_MAX`] ASCII alphanumerics.
///
/// # Examples
/// ```
/// use voting::domain::VoterId;
///
/// let id = VoterId::new(" ABC1234567 ").expect("valid voter id");
/// assert_eq!(id.as_ref(), "ABC1234567");
/// assert!(VoterId::new("ABC-123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoterId(String);

impl VoterId {
    /// Validate and construct a voter ID.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, VoterValidationError> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(VoterValidationError::EmptyVoterId);
        }
        if value.chars().count() > VOTER_ID_MAX {
            return Err(VoterValidationError::VoterIdTooLong { max: VOTER_ID_MAX });
        }
        if !compiled(&VOTER_ID_RE, "^[A-Za-z0-9]+$").is_match(value) {
            return Err(VoterValidationError::VoterIdInvalidCharacters);
        }
        Ok(Self(value.to_owned()))
    }
}

/// Twelve-digit Aadhar number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AadharNumber(String);

impl AadharNumber {
    /// Validate and construct an Aadhar number.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, VoterValidationError> {
        let value = raw.as_ref().trim();
        if !compiled(&AADHAR_RE, "^[0-9]{12}$").is_match(value) {
            return Err(VoterValidationError::InvalidAadharNumber);
        }
        Ok(Self(value.to_owned()))
    }
}

/// Ten-digit phone number that receives one-time passcodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a phone number.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, VoterValidationError> {
        let value = raw.as_ref().trim();
        if !compiled(&PHONE_RE, "^[0-9]{10}$").is_match(value) {
            return Err(VoterValidationError::InvalidPhoneNumber);
        }
        Ok(Self(value.to_owned()))
    }
}

macro_rules! string_newtype_conversions {
    ($($name:ident),* $(,)?) => {
        $(
            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> Self {
                    value.0
                }
            }

            impl TryFrom<String> for $name {
                type Error = VoterValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }
        )*
    };
}

string_newtype_conversions!(VoterId, AadharNumber, PhoneNumber);

/// Identifier fields supplied when registering a voter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoter {
    /// Account the voter belongs to.
    pub user_id: UserId,
    /// Unique voter ID.
    pub voter_id: VoterId,
    /// Unique Aadhar number.
    pub aadhar_number: AadharNumber,
    /// Phone number used for OTP delivery.
    pub phone_number: PhoneNumber,
}

/// Stored voter record.
///
/// ## Invariants
/// - New voters start unverified and without a vote.
/// - `has_voted` is never reset once set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voter {
    pk: VoterPk,
    user_id: UserId,
    voter_id: VoterId,
    aadhar_number: AadharNumber,
    phone_number: PhoneNumber,
    is_verified: bool,
    has_voted: bool,
}

/// Parameter object for rebuilding a [`Voter`] from storage.
#[derive(Debug, Clone)]
pub struct VoterDraft {
    pub pk: VoterPk,
    pub user_id: UserId,
    pub voter_id: VoterId,
    pub aadhar_number: AadharNumber,
    pub phone_number: PhoneNumber,
    pub is_verified: bool,
    pub has_voted: bool,
}

impl Voter {
    /// Build a voter from already validated parts.
    pub fn from_draft(draft: VoterDraft) -> Self {
        let VoterDraft {
            pk,
            user_id,
            voter_id,
            aadhar_number,
            phone_number,
            is_verified,
            has_voted,
        } = draft;
        Self {
            pk,
            user_id,
            voter_id,
            aadhar_number,
            phone_number,
            is_verified,
            has_voted,
        }
    }

    /// Build the freshly registered record for `new_voter`.
    pub fn registered(pk: VoterPk, new_voter: NewVoter) -> Self {
        let NewVoter {
            user_id,
            voter_id,
            aadhar_number,
            phone_number,
        } = new_voter;
        Self::from_draft(VoterDraft {
            pk,
            user_id,
            voter_id,
            aadhar_number,
            phone_number,
            is_verified: false,
            has_voted: false,
        })
    }

    pub fn pk(&self) -> VoterPk {
        self.pk
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn voter_id(&self) -> &VoterId {
        &self.voter_id
    }

    pub fn aadhar_number(&self) -> &AadharNumber {
        &self.aadhar_number
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    /// Whether the voter has completed OTP verification at least once.
    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    /// Whether the voter has cast a ballot.
    pub fn has_voted(&self) -> bool {
        self.has_voted
    }

    /// Mark the voter as verified.
    pub fn verify(&mut self) {
        self.is_verified = true;
    }

    /// Mark the voter as having voted. Never reverted.
    pub fn record_vote(&mut self) {
        self.has_voted = true;
    }
}

#[cfg(test)]
mod tests;
