use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Role, User};

const TOKEN_VALIDITY_HOURS: i64 = 24;

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub role: Role,
    pub exp: usize,
}

/// Signs and verifies the HS256 session tokens. Stateless: no database
/// access on either path.
pub struct JwtHandler {
    secret: String,
    validity_hours: i64,
}

impl JwtHandler {
    pub fn new(secret: String) -> Self {
        Self::with_validity(secret, TOKEN_VALIDITY_HOURS)
    }

    pub fn with_validity(secret: String, validity_hours: i64) -> Self {
        Self {
            secret,
            validity_hours,
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let exp = Utc::now() + chrono::Duration::hours(self.validity_hours);

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            exp: exp.timestamp() as usize,
        };

        debug!(
            "issuing token for {} (valid {}h)",
            user.username, self.validity_hours
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(decoded.claims)
    }
}
