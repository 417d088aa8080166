//! Access tokens issued by `/login` and checked on the mutating planet routes.
//!
//! Tokens are JWTs signed with HMAC-SHA256 over a shared secret. Validity is
//! signature plus expiry only, the subject is the login email and carries no
//! further authorization.
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Access token lifetime in seconds.
pub const TOKEN_EXPIRATION: i64 = 900; // 15 minutes

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessTokenHeader {
    pub alg: String,
    pub typ: String,
}

impl AccessTokenHeader {
    fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessTokenClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl AccessTokenClaims {
    #[must_use]
    pub fn new(sub: impl Into<String>, now_unix_seconds: i64) -> Self {
        Self {
            sub: sub.into(),
            iat: now_unix_seconds,
            exp: now_unix_seconds + TOKEN_EXPIRATION,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("invalid key")]
    Key,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
}

fn b64e_json<T: Serialize>(value: &T) -> Result<String, Error> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, Error> {
    let bytes = Base64UrlUnpadded::decode_vec(s).map_err(|_| Error::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn mac(secret: &str, signing_input: &str) -> Result<HmacSha256, Error> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| Error::Key)?;
    mac.update(signing_input.as_bytes());
    Ok(mac)
}

/// Create an HS256 signed access token (JWT).
///
/// # Errors
///
/// Returns an error if the header/claims JSON cannot be encoded.
pub fn sign_hs256(secret: &str, claims: &AccessTokenClaims) -> Result<String, Error> {
    let header_b64 = b64e_json(&AccessTokenHeader::hs256())?;
    let claims_b64 = b64e_json(claims)?;
    let signing_input = format!("{header_b64}.{claims_b64}");

    let signature = mac(secret, &signing_input)?.finalize().into_bytes();
    let signature_b64 = Base64UrlUnpadded::encode_string(&signature);

    Ok(format!("{signing_input}.{signature_b64}"))
}

/// Verify an HS256 access token (JWT) and return its decoded claims.
///
/// # Errors
///
/// Returns an error if:
/// - the token is malformed or contains invalid base64/json,
/// - the signature does not match the secret,
/// - the token is past its expiry.
pub fn verify_hs256(token: &str, secret: &str, now_unix_seconds: i64) -> Result<AccessTokenClaims, Error> {
    let mut parts = token.split('.');
    let header_b64 = parts.next().ok_or(Error::TokenFormat)?;
    let claims_b64 = parts.next().ok_or(Error::TokenFormat)?;
    let sig_b64 = parts.next().ok_or(Error::TokenFormat)?;
    if parts.next().is_some() {
        return Err(Error::TokenFormat);
    }

    let header: AccessTokenHeader = b64d_json(header_b64)?;
    if header.alg != "HS256" {
        return Err(Error::UnsupportedAlg(header.alg));
    }

    let signing_input = format!("{header_b64}.{claims_b64}");
    let signature_bytes = Base64UrlUnpadded::decode_vec(sig_b64).map_err(|_| Error::Base64)?;
    mac(secret, &signing_input)?
        .verify_slice(&signature_bytes)
        .map_err(|_| Error::InvalidSignature)?;

    let claims: AccessTokenClaims = b64d_json(claims_b64)?;
    if claims.exp <= now_unix_seconds {
        return Err(Error::Expired);
    }

    Ok(claims)
}
