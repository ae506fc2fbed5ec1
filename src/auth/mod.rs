use base64::{engine::general_purpose::URL_SAFE_NO_PAD as b64, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{crypto, decode_header, encode, DecodingKey, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::JwtConfig;

/// Clock skew tolerated on `exp`, in seconds
const EXPIRY_LEEWAY_SECS: i64 = 60;

/// Verified claim set of a bearer token.
///
/// `sub` is kept as raw JSON: the identity provider places an
/// `{id, role}` object there, but nothing guarantees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(sub: Value, lifetime: Duration) -> Self {
        let now = Utc::now();
        let mut extra = Map::new();
        extra.insert("iat".into(), Value::from(now.timestamp()));
        extra.insert("exp".into(), Value::from((now + lifetime).timestamp()));
        Self {
            sub: Some(sub),
            extra,
        }
    }

    /// The `sub` claim, treated as absent when null or empty
    pub fn subject(&self) -> Option<&Value> {
        match &self.sub {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::Object(m)) if m.is_empty() => None,
            Some(v) => Some(v),
        }
    }

    /// `exp` as a unix timestamp, if present and numeric
    pub fn expires_at(&self) -> Option<i64> {
        let exp = self.extra.get("exp")?;
        exp.as_i64().or_else(|| exp.as_f64().map(|v| v as i64))
    }
}

/// Caller identity carried in the `sub` claim
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub id: Option<Value>,
    pub role: Option<String>,
}

impl Identity {
    pub fn from_claims(claims: &Claims) -> Result<Self, AuthError> {
        let sub = claims
            .subject()
            .and_then(Value::as_object)
            .ok_or(AuthError::InvalidStructure)?;

        Ok(Self {
            id: sub.get("id").cloned(),
            role: sub.get("role").and_then(Value::as_str).map(str::to_string),
        })
    }

    /// Numeric user id; accepts integers and integer strings
    pub fn user_id(&self) -> Option<i32> {
        match self.id.as_ref()? {
            Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Authorization header must use Bearer token format")]
    InvalidHeader,

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Invalid token structure")]
    InvalidStructure,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}

/// Verify signature and expiry, returning the claim set.
///
/// The payload is decoded by hand: `sub` carries a JSON object, which
/// `jsonwebtoken::decode` refuses because it expects a string subject.
pub fn validate_jwt(token: &str, config: &JwtConfig) -> Result<Claims, AuthError> {
    let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    if header.alg != config.algorithm {
        return Err(AuthError::InvalidToken("InvalidAlgorithm".to_string()));
    }

    let (message, signature) = token
        .rsplit_once('.')
        .ok_or_else(|| AuthError::InvalidToken("InvalidToken".to_string()))?;
    let payload = match message.split_once('.') {
        Some((_, payload)) if !payload.contains('.') => payload,
        _ => return Err(AuthError::InvalidToken("InvalidToken".to_string())),
    };

    let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
    let verified = crypto::verify(signature, message.as_bytes(), &decoding_key, config.algorithm)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    if !verified {
        return Err(AuthError::InvalidToken("InvalidSignature".to_string()));
    }

    let bytes = b64
        .decode(payload)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    let claims: Claims =
        serde_json::from_slice(&bytes).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    match claims.expires_at() {
        None => Err(AuthError::InvalidToken("Missing required claim: exp".to_string())),
        Some(exp) if exp < Utc::now().timestamp() - EXPIRY_LEEWAY_SECS => {
            Err(AuthError::InvalidToken("ExpiredSignature".to_string()))
        }
        Some(_) => Ok(claims),
    }
}

/// Sign an access token for `sub` with the configured lifetime.
///
/// Token issuance belongs to the identity provider; this exists for local
/// tooling and tests that need a token the server will accept.
pub fn generate_jwt(sub: Value, config: &JwtConfig) -> Result<String, AuthError> {
    let claims = Claims::new(sub, Duration::hours(config.access_token_expires_hours));
    let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());

    encode(&Header::new(config.algorithm), &claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}
