//! Field rules for the public auth endpoints.

use crate::types::{AppError, LoginRequest, RefreshRequest, RegisterRequest, Result};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});
static UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").expect("valid pattern"));
static LOWER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").expect("valid pattern"));
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").expect("valid pattern"));
static SPECIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]"#).expect("valid pattern")
});

pub const USERNAME_LEN: (usize, usize) = (3, 15);
pub const PASSWORD_LEN: (usize, usize) = (8, 20);

fn check_email(email: &str, errors: &mut Vec<String>) {
    if email.is_empty() {
        errors.push("email is required".to_string());
    } else if !EMAIL.is_match(email) {
        errors.push("email must be a valid email address".to_string());
    }
}

fn check_length(field: &str, value: &str, (min, max): (usize, usize), errors: &mut Vec<String>) {
    let len = value.chars().count();
    if len == 0 {
        errors.push(format!("{} is required", field));
    } else if len < min || len > max {
        errors.push(format!(
            "{} must be between {} and {} characters",
            field, min, max
        ));
    }
}

/// Upper, lower, digit and special character all present.
pub fn is_strong_password(password: &str) -> bool {
    UPPER.is_match(password)
        && LOWER.is_match(password)
        && DIGIT.is_match(password)
        && SPECIAL.is_match(password)
}

fn finish(errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidInput(errors.join("; ")))
    }
}

pub fn validate_register(req: &RegisterRequest) -> Result<()> {
    let mut errors = Vec::new();

    check_email(&req.email, &mut errors);
    check_length("username", &req.username, USERNAME_LEN, &mut errors);
    check_length("password", &req.password, PASSWORD_LEN, &mut errors);
    if !req.password.is_empty() && !is_strong_password(&req.password) {
        errors.push(
            "password must contain an uppercase letter, a lowercase letter, a digit and a special character"
                .to_string(),
        );
    }

    finish(errors)
}

pub fn validate_login(req: &LoginRequest) -> Result<()> {
    let mut errors = Vec::new();

    check_email(&req.email, &mut errors);
    check_length("password", &req.password, PASSWORD_LEN, &mut errors);

    finish(errors)
}

pub fn validate_refresh(req: &RefreshRequest) -> Result<()> {
    if req.refresh_token.trim().is_empty() {
        return Err(AppError::InvalidInput("refresh_token is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn register(email: &str, username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_register(&register("a@x.com", "alice", "Str0ng!Pass")).is_ok());
    }

    #[rstest]
    #[case("", "alice", "Str0ng!Pass")]
    #[case("not-an-email", "alice", "Str0ng!Pass")]
    #[case("a@x", "alice", "Str0ng!Pass")]
    #[case("a@x.com", "al", "Str0ng!Pass")]
    #[case("a@x.com", "a_very_long_username", "Str0ng!Pass")]
    #[case("a@x.com", "alice", "Sh0rt!")]
    #[case("a@x.com", "alice", "Way2Long!Password1234")]
    #[case("a@x.com", "alice", "alllowercase1!")]
    #[case("a@x.com", "alice", "NoDigitsHere!")]
    #[case("a@x.com", "alice", "NoSpecial123")]
    fn test_invalid_registration(#[case] email: &str, #[case] username: &str, #[case] password: &str) {
        let result = validate_register(&register(email, username, password));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_registration_reports_every_problem() {
        let Err(AppError::InvalidInput(details)) = validate_register(&register("", "", "")) else {
            panic!("expected validation failure");
        };

        assert!(details.contains("email is required"));
        assert!(details.contains("username is required"));
        assert!(details.contains("password is required"));
    }

    #[rstest]
    #[case("Str0ng!Pass", true)]
    #[case("Aa1[bcdef", true)]
    #[case("Aa1\\bcdef", true)]
    #[case("Aa1bcdefg", false)]
    #[case("AA1!BCDEF", false)]
    fn test_strong_password(#[case] password: &str, #[case] expected: bool) {
        assert_eq!(is_strong_password(password), expected);
    }

    #[test]
    fn test_login_validation() {
        let ok = LoginRequest {
            email: "a@x.com".to_string(),
            password: "whatever1".to_string(),
        };
        assert!(validate_login(&ok).is_ok());

        let bad = LoginRequest {
            email: "a@x.com".to_string(),
            password: "short".to_string(),
        };
        assert!(validate_login(&bad).is_err());
    }

    #[test]
    fn test_refresh_validation() {
        let empty = RefreshRequest {
            refresh_token: "  ".to_string(),
        };
        assert!(validate_refresh(&empty).is_err());

        let present = RefreshRequest {
            refresh_token: "a.b.c".to_string(),
        };
        assert!(validate_refresh(&present).is_ok());
    }
}
