use sha2::{Digest, Sha256};

use crate::error::AccountError;

const HASH_ROUNDS: usize = 256;

/// Hex SHA-256 applied 256 times, each round hashing the previous hex digest.
///
/// Unsalted and fast: this only keeps existing `data.json` files readable and must not be
/// taken for real password storage.
pub fn hash_password(password: &str) -> String {
    let mut digest = password.to_string();
    for _ in 0..HASH_ROUNDS {
        let bytes = Sha256::digest(digest.as_bytes());
        digest = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    }
    digest
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    hash_password(password) == password_hash
}

/// Non-blank, letters, digits and `_` only.
pub fn validate_username(username: &str) -> Result<(), AccountError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AccountError::InvalidUsername("cannot be blank"));
    }
    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(AccountError::InvalidUsername(
            "may only contain letters, numbers and underscores",
        ));
    }
    Ok(())
}

/// Checked only when creating an account.
pub fn validate_password(password: &str) -> Result<(), AccountError> {
    if password.trim().is_empty() {
        return Err(AccountError::InvalidPassword("cannot be blank"));
    }
    if password.chars().count() <= 7 {
        return Err(AccountError::InvalidPassword(
            "must be longer than 7 characters",
        ));
    }
    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_upper && has_lower && has_digit) {
        return Err(AccountError::InvalidPassword(
            "must contain a number, an uppercase and a lowercase letter",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha256_hex(input: &str) -> String {
        Sha256::digest(input.as_bytes())
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    #[test]
    fn test_hash_is_repeated_hex_digest() {
        let mut expected = "Password1".to_string();
        for _ in 0..256 {
            expected = sha256_hex(&expected);
        }
        assert_eq!(hash_password("Password1"), expected);
        assert_eq!(hash_password("Password1").len(), 64);
        assert!(verify_password("Password1", &expected));
        assert!(!verify_password("password1", &expected));
    }

    #[test]
    fn test_single_round_matches_known_vector() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice_99").is_ok());
        assert!(validate_username("   ").is_err());
        assert!(validate_username("alice!").is_err());
        assert!(validate_username("al ice").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("Secret123").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password("Sec123").is_err());
        assert!(validate_password("Secr1234").is_ok());
        assert!(validate_password("secret123").is_err());
        assert!(validate_password("SECRET123").is_err());
        assert!(validate_password("SecretPass").is_err());
    }
}
