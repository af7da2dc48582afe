//! One-time passcodes used as the second login factor.

use std::fmt;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default lifetime of an issued passcode.
pub const OTP_TTL: Duration = Duration::from_secs(300);

/// Number of digits in a passcode.
pub const OTP_DIGITS: usize = 6;

/// Validation error for submitted passcodes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Enter 6-digit OTP.")]
pub struct OtpFormatError;

/// Six-digit numeric passcode. Leading zeros are significant.
///
/// # Examples
/// ```
/// use voting::domain::OtpCode;
///
/// let code = OtpCode::parse("004217").expect("six digits");
/// assert_eq!(code.as_ref(), "004217");
/// assert!(OtpCode::parse("4217").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OtpCode(String);

impl OtpCode {
    /// Draw a uniformly random code in `000000..=999999`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let value: u32 = rng.gen_range(0..=999_999);
        Self(format!("{value:0width$}", width = OTP_DIGITS))
    }

    /// Validate a submitted code.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, OtpFormatError> {
        let value = raw.as_ref().trim();
        if value.len() != OTP_DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OtpFormatError);
        }
        Ok(Self(value.to_owned()))
    }
}

impl AsRef<str> for OtpCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

impl From<OtpCode> for String {
    fn from(value: OtpCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for OtpCode {
    type Error = OtpFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Verification policy threaded into OTP confirmation.
///
/// `bypass` accepts any well-formed code. It exists for local development
/// only; configuration refuses it in release builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OtpPolicy {
    bypass: bool,
}

impl OtpPolicy {
    /// Policy that always compares codes.
    pub const fn strict() -> Self {
        Self { bypass: false }
    }

    /// Policy that skips the comparison.
    pub const fn bypass() -> Self {
        Self { bypass: true }
    }

    /// Whether comparisons are skipped.
    pub const fn is_bypass(self) -> bool {
        self.bypass
    }

    /// Decide whether `submitted` is accepted.
    ///
    /// Under the strict policy the code must equal both the copy held in the
    /// session and the live entry in the store.
    pub fn accepts(
        self,
        session_code: Option<&OtpCode>,
        stored_code: Option<&OtpCode>,
        submitted: &OtpCode,
    ) -> bool {
        if self.bypass {
            return true;
        }
        matches!(
            (session_code, stored_code),
            (Some(held), Some(live)) if held == submitted && live == submitted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    fn code(raw: &str) -> OtpCode {
        OtpCode::parse(raw).expect("valid code")
    }

    #[rstest]
    fn generated_codes_are_six_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let generated = OtpCode::generate(&mut rng);
            assert!(OtpCode::parse(generated.as_ref()).is_ok());
        }
    }

    #[rstest]
    fn generated_codes_keep_leading_zeros() {
        let mut rng = StdRng::seed_from_u64(11);
        let padded = (0..20_000)
            .map(|_| OtpCode::generate(&mut rng))
            .any(|generated| generated.as_ref().starts_with('0'));
        assert!(padded, "a zero-padded code should appear in 20k draws");
    }

    #[rstest]
    #[case("")]
    #[case("12345")]
    #[case("1234567")]
    #[case("12a456")]
    #[case("１２３４５６")]
    fn parse_rejects_malformed_codes(#[case] raw: &str) {
        assert_eq!(OtpCode::parse(raw), Err(OtpFormatError));
    }

    #[rstest]
    #[case(Some("123456"), Some("123456"), "123456", true)]
    #[case(Some("123456"), Some("123456"), "654321", false)]
    #[case(Some("123456"), None, "123456", false)]
    #[case(None, Some("123456"), "123456", false)]
    #[case(Some("111111"), Some("123456"), "123456", false)]
    fn strict_policy_requires_both_copies(
        #[case] held: Option<&str>,
        #[case] live: Option<&str>,
        #[case] submitted: &str,
        #[case] expected: bool,
    ) {
        let held = held.map(code);
        let live = live.map(code);
        let accepted = OtpPolicy::strict().accepts(held.as_ref(), live.as_ref(), &code(submitted));
        assert_eq!(accepted, expected);
    }

    #[rstest]
    fn bypass_policy_accepts_anything_well_formed() {
        assert!(OtpPolicy::bypass().accepts(None, None, &code("000000")));
    }

    #[rstest]
    fn debug_output_hides_code() {
        assert_eq!(format!("{:?}", code("123456")), "OtpCode(******)");
    }
}
