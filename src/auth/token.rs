use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message returned for any token that fails signature or structure checks.
pub const INVALID_TOKEN: &str = "Invalid token.";

/// Represents the claims encoded within an auth token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the user the token was issued to.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
}

/// Issues and verifies HS256-signed auth tokens.
///
/// The signing secret is fixed at construction. Tokens carry no `exp` claim and
/// stay valid until the secret changes.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Generates a token identifying `user_id`.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let claims = Claims {
            id: user_id,
            iat: chrono::Utc::now().timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token's signature and decodes its claims.
    ///
    /// Every failure, whether a bad signature, a malformed token or unexpected
    /// claims, is reported as `AppError::BadRequest(INVALID_TOKEN)`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Rejected auth token: {}", e);
                AppError::BadRequest(INVALID_TOKEN.into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(result: Result<Claims, AppError>) {
        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, INVALID_TOKEN),
            Ok(claims) => panic!("Token should have been rejected, got {:?}", claims),
            Err(e) => panic!("Unexpected error type: {:?}", e),
        }
    }

    #[test]
    fn test_token_generation_and_verification() {
        let tokens = TokenService::new("test_secret_for_gen_verify");
        let user_id = Uuid::new_v4();

        let token = tokens.issue(user_id).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.id, user_id);
        assert!(claims.iat > 0);
    }

    #[test]
    fn test_token_has_no_expiry() {
        let tokens = TokenService::new("test_secret_without_expiry");
        // Issued-at far in the past and no `exp` at all: still accepted.
        let ancient = Claims {
            id: Uuid::new_v4(),
            iat: 0,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &ancient,
            &EncodingKey::from_secret("test_secret_without_expiry".as_bytes()),
        )
        .unwrap();

        assert_eq!(tokens.verify(&token).unwrap(), ancient);
    }

    #[test]
    fn test_invalid_token_signature() {
        let issuer = TokenService::new("one_secret");
        let verifier = TokenService::new("a_completely_different_secret");

        let token = issuer.issue(Uuid::new_v4()).unwrap();
        assert_invalid(verifier.verify(&token));
    }

    #[test]
    fn test_tampering_with_any_byte_invalidates_token() {
        let tokens = TokenService::new("test_secret_for_tampering");
        let token = tokens.issue(Uuid::new_v4()).unwrap();

        for (position, original) in token.char_indices() {
            let replacement = match original {
                '.' => 'x',
                'A' => 'B',
                _ => 'A',
            };
            let mut tampered = token.clone();
            tampered.replace_range(position..position + 1, &replacement.to_string());
            assert_invalid(tokens.verify(&tampered));
        }
    }

    #[test]
    fn test_malformed_tokens() {
        let tokens = TokenService::new("test_secret_for_malformed");
        assert_invalid(tokens.verify(""));
        assert_invalid(tokens.verify("not-a-token"));
        assert_invalid(tokens.verify("a.b.c"));
    }

    #[test]
    fn test_token_with_foreign_claims_is_rejected() {
        // Well-signed, but the payload does not carry an `_id`.
        #[derive(Serialize)]
        struct Other {
            sub: String,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Other { sub: "42".into() },
            &EncodingKey::from_secret("shared_secret".as_bytes()),
        )
        .unwrap();

        assert_invalid(TokenService::new("shared_secret").verify(&token));
    }
}
