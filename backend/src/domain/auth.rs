//! Login and registration inputs.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate raw strings before a handler talks to a service.

use zeroize::Zeroizing;

use super::{AadharNumber, PhoneNumber, VoterId, VoterValidationError};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN: usize = 8;

/// Errors raised while shaping login credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// A required field was blank.
    #[error("This field is required.")]
    MissingField { field: &'static str },
    /// A field was present but cannot belong to any voter.
    #[error("Invalid credentials or voter not registered")]
    Malformed,
}

/// Credentials a voter logs in with.
///
/// Format failures collapse into [`LoginValidationError::Malformed`] so the
/// response never tells which field was wrong.
///
/// # Examples
/// ```
/// use voting::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ABC1234567", "123412341234", "9876543210")
///     .expect("well-formed credentials");
/// assert_eq!(creds.voter_id().as_ref(), "ABC1234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    voter_id: VoterId,
    aadhar_number: AadharNumber,
    phone_number: PhoneNumber,
}

impl LoginCredentials {
    /// Construct credentials from raw form values.
    pub fn try_from_parts(
        voter_id: &str,
        aadhar_number: &str,
        phone_number: &str,
    ) -> Result<Self, LoginValidationError> {
        for (field, value) in [
            ("voter_id", voter_id),
            ("aadhar_number", aadhar_number),
            ("phone_number", phone_number),
        ] {
            if value.trim().is_empty() {
                return Err(LoginValidationError::MissingField { field });
            }
        }

        Ok(Self {
            voter_id: VoterId::new(voter_id).map_err(|_| LoginValidationError::Malformed)?,
            aadhar_number: AadharNumber::new(aadhar_number)
                .map_err(|_| LoginValidationError::Malformed)?,
            phone_number: PhoneNumber::new(phone_number)
                .map_err(|_| LoginValidationError::Malformed)?,
        })
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
}

/// Field-level registration failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// One of the voter identifiers was malformed.
    #[error(transparent)]
    Voter(#[from] VoterValidationError),
    /// Password shorter than [`PASSWORD_MIN`].
    #[error("This password is too short. It must contain at least {min} characters.")]
    PasswordTooShort { min: usize },
    /// Password and confirmation differ.
    #[error("The two password fields didn't match.")]
    PasswordMismatch,
}

impl RegistrationValidationError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Voter(inner) => inner.field(),
            Self::PasswordTooShort { .. } => "password1",
            Self::PasswordMismatch => "password2",
        }
    }
}

/// Raw registration form values.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    pub voter_id: &'a str,
    pub aadhar_number: &'a str,
    pub phone_number: &'a str,
    pub password: &'a str,
    pub password_confirmation: &'a str,
}

/// Validated registration request.
///
/// ## Invariants
/// - Identifiers satisfy their newtype rules.
/// - `password` has at least [`PASSWORD_MIN`] characters and matched its
///   confirmation; it is zeroed on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterRegistration {
    voter_id: VoterId,
    aadhar_number: AadharNumber,
    phone_number: PhoneNumber,
    password: Zeroizing<String>,
}

impl VoterRegistration {
    /// Validate raw form values, reporting the first failing field.
    pub fn try_from_input(input: RegistrationInput<'_>) -> Result<Self, RegistrationValidationError> {
        let voter_id = VoterId::new(input.voter_id)?;
        let aadhar_number = AadharNumber::new(input.aadhar_number)?;
        let phone_number = PhoneNumber::new(input.phone_number)?;

        if input.password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if input.password != input.password_confirmation {
            return Err(RegistrationValidationError::PasswordMismatch);
        }

        Ok(Self {
            voter_id,
            aadhar_number,
            phone_number,
            password: Zeroizing::new(input.password.to_owned()),
        })
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

    /// Plain password, only for hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
