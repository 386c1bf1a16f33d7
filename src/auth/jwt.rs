use crate::models::Claims;
use jsonwebtoken::{DecodingKey, Validation, decode};

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

/// Tokens are issued by the identity service; tests sign their own.
#[cfg(test)]
pub fn generate_access_token(
    user_id: u64,
    role: u8,
    employee_id: Option<u64>,
    secret: &str,
    ttl: usize,
) -> String {
    use crate::models::TokenType;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::time::{SystemTime, UNIX_EPOCH};
    use uuid::Uuid;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        user_id,
        sub: format!("user-{user_id}"),
        role,
        exp: now + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type: TokenType::Access,
        employee_id,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::user::AuthUser;
    use crate::models::Role;

    #[test]
    fn signed_token_round_trips_into_an_auth_user() {
        let token = generate_access_token(9, 3, Some(1000), "secret", 60);
        let user = AuthUser::from_claims(verify_token(&token, "secret").unwrap()).unwrap();

        assert_eq!(user.user_id, 9);
        assert_eq!(user.role, Role::Employee);
        assert_eq!(user.require_employee().unwrap(), 1000);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token(9, 3, None, "secret", 60);
        assert!(verify_token(&token, "other").is_err());
    }

    #[test]
    fn user_without_employee_profile_is_forbidden() {
        let token = generate_access_token(1, 1, None, "secret", 60);
        let user = AuthUser::from_claims(verify_token(&token, "secret").unwrap()).unwrap();
        assert!(user.require_employee().is_err());
    }
}
