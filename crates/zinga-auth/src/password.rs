//! Password strength policy and Argon2id verification.

use argon2::{Argon2, PasswordVerifier};

use crate::error::AuthError;

/// Characters accepted as the "special character" class.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Result of a password strength check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordCheck {
    pub valid: bool,
    pub message: String,
}

impl PasswordCheck {
    fn reject(message: &str) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Check `password` against the strength policy.
///
/// Rules are evaluated in order and the first failure is reported:
/// minimum length, an uppercase letter, a lowercase letter, a digit,
/// and one of [`SPECIAL_CHARACTERS`]. Length is measured in UTF-16 code
/// units, matching what browser clients count.
pub fn validate_password(password: &str, min_length: usize) -> PasswordCheck {
    if password.encode_utf16().count() < min_length {
        return PasswordCheck::reject(&format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return PasswordCheck::reject("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return PasswordCheck::reject("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return PasswordCheck::reject("Password must contain at least one number");
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return PasswordCheck::reject("Password must contain at least one special character");
    }
    PasswordCheck {
        valid: true,
        message: "Password is strong".into(),
    }
}

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;

    fn hash_password(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("hashing failed")
            .to_string()
    }

    #[test]
    fn short_password_reports_length() {
        let check = validate_password("abc", 8);
        assert!(!check.valid);
        assert_eq!(check.message, "Password must be at least 8 characters long");
    }

    #[test]
    fn length_counts_utf16_units() {
        // Each emoji is a surrogate pair.
        assert!(validate_password("Ab1!\u{1F600}\u{1F600}", 8).valid);
        assert!(!validate_password("Ab1!\u{1F600}", 8).valid);
    }

    #[test]
    fn strong_password_passes() {
        let check = validate_password("Abcdef1!", 8);
        assert!(check.valid);
        assert_eq!(check.message, "Password is strong");
    }

    #[test]
    fn each_missing_class_is_rejected() {
        let cases = [
            ("abcdef1!", "uppercase"),
            ("ABCDEF1!", "lowercase"),
            ("Abcdefg!", "number"),
            ("Abcdefg1", "special"),
        ];
        for (password, expected) in cases {
            let check = validate_password(password, 8);
            assert!(!check.valid, "{password} should be rejected");
            assert!(
                check.message.contains(expected),
                "{password}: unexpected message {:?}",
                check.message
            );
        }
    }

    #[test]
    fn every_listed_special_character_counts() {
        for c in SPECIAL_CHARACTERS.chars() {
            assert!(validate_password(&format!("Abcdef1{c}"), 8).valid, "{c}");
        }
        assert!(!validate_password("Abcdef1-", 8).valid);
    }

    #[test]
    fn correct_password_matches() {
        let hash = hash_password("Sunshine1!");
        assert!(verify_password("Sunshine1!", &hash).unwrap());
        assert!(!verify_password("Moonlight1!", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_returns_error() {
        assert!(verify_password("pw", "not-a-hash").is_err());
    }
}
