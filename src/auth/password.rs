use crate::error::AppError;
use bcrypt::{hash, verify};

/// bcrypt work factor applied to every new hash.
pub const HASH_COST: u32 = 10;

/// Hashes `password` with a freshly generated salt.
///
/// The salt is embedded in the returned string, so hashing the same password
/// twice yields two different hashes that both verify.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, HASH_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a hash produced by [`hash_password`].
///
/// A wrong password is `Ok(false)`; only a malformed stored hash is an error.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "secret1";
        let hashed = hash_password(password).unwrap();

        assert!(hashed.starts_with("$2b$10$"));
        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("secret2", &hashed).unwrap());
        assert!(!verify_password("", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("secret1", &first).unwrap());
        assert!(verify_password("secret1", &second).unwrap());
    }

    #[test]
    fn test_mutated_hash_does_not_verify() {
        let hashed = hash_password("secret1").unwrap();

        // Layout is `$2b$10$` + 22 salt chars + 31 digest chars; flip one digest char.
        let position = 7 + 22 + 10;
        let original = hashed.as_bytes()[position];
        let replacement = if original == b'a' { b'b' } else { b'a' };
        let mut mutated = hashed.clone().into_bytes();
        mutated[position] = replacement;
        let mutated = String::from_utf8(mutated).unwrap();

        assert!(!verify_password("secret1", &mutated).unwrap());
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        match verify_password("secret1", "invalidhashformat") {
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Failed to verify password"));
            }
            Ok(_) => panic!("Malformed hashes must not verify"),
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }
}
