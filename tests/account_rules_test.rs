//! End-to-end checks of the account business rules through the public API:
//! validators, password digests, and the token lifecycle working together.

use std::time::Duration;

use uuid::Uuid;

use user_service::domain::{validate_full_name, validate_password, validate_phone, Password};
use user_service::errors::AppError;
use user_service::services::{bearer_token, JwtTokenService, TokenService};

const SECRET: &str = "integration-secret-minimum-32-chars!";

#[test]
fn phone_grammar_is_exact() {
    // +62 followed by 10..=13 digits, nothing else
    for valid in ["+628123456789", "+620000000000", "+621234567890123"] {
        assert!(validate_phone(valid).is_ok(), "{valid} should be valid");
    }
    for invalid in [
        "+62812345678",      // 9 digits
        "+6212345678901234", // 14 digits
        "08123456789",       // local format
        "+62 8123456789",    // embedded space
        "+62812345678x",     // trailing letter
    ] {
        assert!(
            matches!(validate_phone(invalid), Err(AppError::IneligiblePhone)),
            "{invalid} should be rejected"
        );
    }
}

#[test]
fn password_rules_report_first_violation() {
    // (input, expected code) pairs cover the rule ordering
    let cases = [
        ("a!", "PASSWORD_LENGTH"),
        ("abcdef!", "PASSWORD_CAPITAL"),
        ("Abcdef!", "PASSWORD_NUMERIC"),
        ("Abcdef1", "PASSWORD_SPECIAL_CHAR"),
    ];
    for (input, code) in cases {
        let err = validate_password(input).unwrap_err();
        assert_eq!(err.code(), code, "input {input:?}");
        assert_eq!(err.field(), Some("password"));
    }
    assert!(validate_password("5awitPro!").is_ok());
}

#[test]
fn full_name_error_is_tagged_to_its_own_field() {
    let err = validate_full_name("ab").unwrap_err();
    assert_eq!(err.code(), "FULL_NAME_LENGTH");
    assert_eq!(err.field(), Some("full_name"));
}

#[test]
fn password_digest_round_trip() {
    let digest = Password::new("5awitPro!").unwrap();
    assert!(digest.verify("5awitPro!"));
    assert!(!digest.verify("5awitPro"));
    assert!(!digest.verify(""));
}

#[test]
fn token_lifecycle_through_header_extraction() {
    let service = JwtTokenService::new(SECRET);
    let subject = Uuid::new_v4();

    let token = service.issue(subject).unwrap();
    assert_eq!(token.lifetime, Duration::from_secs(3600));

    // A well-formed Authorization header round-trips to the subject
    let header = format!("Bearer {}", token.value);
    let extracted = bearer_token(&header).unwrap();
    let claims = service.verify(extracted).unwrap();
    assert_eq!(claims.sub, subject);

    // A header without the scheme separator fails instead of panicking
    assert!(matches!(
        bearer_token(&token.value),
        Err(AppError::InvalidToken)
    ));
}

#[test]
fn token_from_another_secret_is_rejected() {
    let issuer = JwtTokenService::new(SECRET);
    let verifier = JwtTokenService::new("a-different-secret-minimum-32-chars!");

    let token = issuer.issue(Uuid::new_v4()).unwrap();
    assert!(matches!(
        verifier.verify(&token.value),
        Err(AppError::InvalidToken)
    ));
}
