//! Elections, parties and candidates.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! define_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a storage key.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Raw key value.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_key!(
    /// Primary key of an election.
    ElectionId
);
define_key!(
    /// Primary key of a party.
    PartyId
);
define_key!(
    /// Primary key of a candidate.
    CandidateId
);

/// Validation errors for catalogue records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElectionValidationError {
    /// A required name was blank.
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },
    /// The election would end before it starts.
    #[error("election must not end before it starts")]
    EndsBeforeStart,
}

/// Bounded window during which votes may be cast.
///
/// ## Invariants
/// - `name` is non-empty.
/// - `starts_at <= ends_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Election {
    id: ElectionId,
    name: String,
    description: String,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl Election {
    /// Rebuild a stored election.
    pub fn new(id: ElectionId, details: NewElection) -> Self {
        let NewElection {
            name,
            description,
            starts_at,
            ends_at,
        } = details;
        Self {
            id,
            name,
            description,
            starts_at,
            ends_at,
        }
    }

    pub fn id(&self) -> ElectionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// Whether `now` falls within the inclusive `[start, end]` window.
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, Utc};
    /// use voting::domain::{Election, ElectionId, NewElection};
    ///
    /// let now = Utc::now();
    /// let details = NewElection::try_new("General", "", now, now + Duration::hours(1))
    ///     .expect("valid election");
    /// let election = Election::new(ElectionId::new(1), details);
    /// assert!(election.is_active_at(now));
    /// assert!(!election.is_active_at(now + Duration::hours(2)));
    /// ```
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && now <= self.ends_at
    }
}

/// Fields for creating an election.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewElection {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) starts_at: DateTime<Utc>,
    pub(crate) ends_at: DateTime<Utc>,
}

impl NewElection {
    /// Validate election fields.
    pub fn try_new(
        name: impl Into<String>,
        description: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<Self, ElectionValidationError> {
        let name = required_name(name.into(), "election name")?;
        if ends_at < starts_at {
            return Err(ElectionValidationError::EndsBeforeStart);
        }
        Ok(Self {
            name,
            description: description.into(),
            starts_at,
            ends_at,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }
}

fn required_name(value: String, field: &'static str) -> Result<String, ElectionValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ElectionValidationError::EmptyName { field });
    }
    Ok(trimmed.to_owned())
}

/// Political party with a symbol image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub symbol: String,
}

/// Fields for creating a party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParty {
    pub(crate) name: String,
    pub(crate) symbol: String,
}

impl NewParty {
    /// Validate party fields.
    pub fn try_new(name: impl Into<String>, symbol: impl Into<String>) -> Result<Self, ElectionValidationError> {
        Ok(Self {
            name: required_name(name.into(), "party name")?,
            symbol: symbol.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// Candidate standing for one party in one election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub photo: String,
    pub bio: String,
    pub party_id: PartyId,
    pub election_id: ElectionId,
}

/// Fields for creating a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    pub(crate) name: String,
    pub(crate) photo: String,
    pub(crate) bio: String,
    pub(crate) party_id: PartyId,
    pub(crate) election_id: ElectionId,
}

impl NewCandidate {
    /// Validate candidate fields.
    pub fn try_new(
        name: impl Into<String>,
        photo: impl Into<String>,
        bio: impl Into<String>,
        party_id: PartyId,
        election_id: ElectionId,
    ) -> Result<Self, ElectionValidationError> {
        Ok(Self {
            name: required_name(name.into(), "candidate name")?,
            photo: photo.into(),
            bio: bio.into(),
            party_id,
            election_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn photo(&self) -> &str {
        &self.photo
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn party_id(&self) -> PartyId {
        self.party_id
    }

    pub fn election_id(&self) -> ElectionId {
        self.election_id
    }
}

/// Candidate joined with its party, as listed on the ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BallotEntry {
    pub candidate: Candidate,
    pub party_name: String,
    pub party_symbol: String,
}
