use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_derive::{Deserialize, Serialize};

use crate::{config::Config, errors::ServerError, utils::bearer_token};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub role: Option<String>,
}

/// Verifies HS256 tokens issued by the identity provider.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str, issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        TokenVerifier {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, &config.jwt_issuer, &config.jwt_audience)
    }

    pub fn verify(&self, token: &str) -> Result<Identity, ServerError> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| ServerError::Unauthorized(e.to_string()))?
            .claims;

        // stand-in for a real permission check
        if claims.sub.trim().is_empty() {
            return Err(ServerError::Unauthorized("empty subject".to_string()));
        }

        Ok(Identity {
            subject: claims.sub,
            issuer: claims.iss,
            audience: claims.aud,
            expires_at: claims.exp,
            role: claims.role,
        })
    }
}

/// The caller behind a verified bearer token. Lives for one request only.
#[derive(Clone, Debug)]
pub struct Identity {
    pub subject: String,
    pub issuer: String,
    pub audience: String,
    pub expires_at: i64,
    pub role: Option<String>,
}

impl FromRequest for Identity {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Identity, ServerError> {
    let verifier = req
        .app_data::<web::Data<TokenVerifier>>()
        .ok_or_else(|| ServerError::EnvironmentError("JWT_SECRET".to_string()))?;

    let result = bearer_token(req)
        .ok_or_else(|| ServerError::Unauthorized("missing bearer token".to_string()))
        .and_then(|token| verifier.verify(token));

    match result {
        Ok(identity) => {
            log::debug!(
                "{} {} as {} (role {:?}, iss {}, aud {}, exp {})",
                req.method(),
                req.path(),
                identity.subject,
                identity.role,
                identity.issuer,
                identity.audience,
                identity.expires_at,
            );
            Ok(identity)
        }
        Err(e) => {
            log::warn!("{} {} rejected: {e}", req.method(), req.path());
            Err(e)
        }
    }
}
