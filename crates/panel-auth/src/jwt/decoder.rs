//! Unverified JWT payload decoding for client-side role display.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use panel_core::PanelError;

use super::claims::Claims;

/// Decode the claims payload of a panel session token.
///
/// The signature is deliberately not verified: the client has no
/// signing secret, and the result is used only to display who is
/// logged in and to gate UI affordances. The panel validates the token
/// properly on every request; this is never a security boundary.
///
/// Expired tokens still decode so the caller can report *why* a login
/// is stale; check [`Claims::is_expired`] explicitly.
pub fn decode_claims(token: &str) -> Result<Claims, PanelError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidToken => {
                PanelError::authentication("Invalid token format")
            }
            _ => PanelError::authentication(format!("Token decoding failed: {e}")),
        })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;
    use crate::jwt::claims::Role;

    fn token_for(claims: &Claims) -> String {
        // The decoder ignores signatures, so any secret works here.
        encode(&Header::default(), claims, &EncodingKey::from_secret(b"test")).unwrap()
    }

    #[test]
    fn test_decode_round_trip() {
        let claims = Claims {
            sub: "user-42".to_string(),
            username: "kenji".to_string(),
            role: Role::Admin,
            iat: 1_700_000_000,
            exp: i64::MAX / 2,
        };

        let decoded = decode_claims(&token_for(&claims)).unwrap();
        assert_eq!(decoded.sub, "user-42");
        assert_eq!(decoded.username, "kenji");
        assert!(decoded.is_admin());
        assert!(!decoded.is_expired());
    }

    #[test]
    fn test_expired_token_still_decodes() {
        let claims = Claims {
            sub: "user-42".to_string(),
            username: "kenji".to_string(),
            role: Role::Customer,
            iat: 1_000,
            exp: 2_000,
        };

        let decoded = decode_claims(&token_for(&claims)).unwrap();
        assert!(decoded.is_expired());
        assert!(!decoded.is_admin());
    }

    #[test]
    fn test_garbage_token_is_an_error() {
        let err = decode_claims("not-a-jwt").unwrap_err();
        assert_eq!(err.kind, panel_core::error::ErrorKind::Authentication);
    }
}
