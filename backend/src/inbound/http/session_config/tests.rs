//! Unit tests for session and login-policy configuration.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

#[fixture]
fn key_file() -> NamedTempFile {
    key_file_of(SESSION_KEY_MIN_LEN)
}

fn key_file_of(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'a'; len]).expect("write key bytes");
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_vars(key_path: String) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_path),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(key_file: NamedTempFile, #[case] missing: &'static str) {
    let mut vars = release_vars(path_of(&key_file));
    vars.remove(missing);

    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_invalid_cookie_secure_is_rejected(key_file: NamedTempFile, #[case] value: &str) {
    let mut vars = release_vars(path_of(&key_file));
    vars.insert(COOKIE_SECURE_ENV, value.to_owned());

    let err = release_error(vars);
    assert!(matches!(
        err,
        SessionConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            ..
        }
    ));
}

#[rstest]
fn release_ephemeral_enabled_is_rejected(key_file: NamedTempFile) {
    let mut vars = release_vars(path_of(&key_file));
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_missing_key_file_is_rejected() {
    let vars = release_vars("/nonexistent/voting/session_key".to_owned());
    assert!(matches!(release_error(vars), SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_short_key_is_rejected() {
    let short = key_file_of(32);
    let err = release_error(release_vars(path_of(&short)));
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length: 32, .. }
    ));
}

#[rstest]
fn release_insecure_none_same_site_is_rejected(key_file: NamedTempFile) {
    let mut vars = release_vars(path_of(&key_file));
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_valid_settings_succeed(key_file: NamedTempFile) {
    let env = mock_env(release_vars(path_of(&key_file)));

    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("expected valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
fn debug_defaults_allow_ephemeral_key() {
    let env = mock_env(HashMap::from([(
        KEY_FILE_ENV,
        "/nonexistent/voting/session_key".to_owned(),
    )]));
    let settings =
        session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults should succeed");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_invalid_values_fall_back_to_defaults(key_file: NamedTempFile) {
    let mut vars = release_vars(path_of(&key_file));
    vars.insert(SAMESITE_ENV, "unexpected".to_owned());
    vars.insert(COOKIE_SECURE_ENV, "perhaps".to_owned());
    let env = mock_env(vars);

    let settings = session_settings_from_env(&env, BuildMode::Debug)
        .expect("debug should fall back to defaults");
    assert_eq!(settings.same_site, SameSite::Lax);
    assert!(settings.cookie_secure);
}

#[rstest]
#[case(false, BuildMode::Debug, Some(false))]
#[case(false, BuildMode::Release, Some(false))]
#[case(true, BuildMode::Debug, Some(true))]
#[case(true, BuildMode::Release, None)]
fn otp_bypass_follows_build_mode(
    #[case] bypass: bool,
    #[case] mode: BuildMode,
    #[case] expected: Option<bool>,
) {
    match (otp_policy(bypass, mode), expected) {
        (Ok(policy), Some(is_bypass)) => assert_eq!(policy.is_bypass(), is_bypass),
        (Err(SessionConfigError::OtpBypassNotAllowed), None) => {}
        (other, _) => panic!("unexpected policy outcome: {:?}", other.map(|p| p.is_bypass())),
    }
}
