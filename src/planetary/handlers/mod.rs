pub mod health;
pub use self::health::health;

pub mod greeting;
pub use self::greeting::{not_found, parameters, super_simple, url_vars};

pub mod planets;
pub use self::planets::{planet_details, planets};

pub mod add_planet;
pub use self::add_planet::add_planet;

pub mod update_planet;
pub use self::update_planet::update_planet;

pub mod delete_planet;
pub use self::delete_planet::delete_planet;

pub mod user_register;
pub use self::user_register::register;

pub mod user_login;
pub use self::user_login::login;

pub mod retrieve_password;
pub use self::retrieve_password::retrieve_password;

// common types for the handlers
use crate::cli::globals::GlobalArgs;
use crate::token::verify_hs256;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Form, Json, RequestExt,
};
use chrono::Utc;
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

/// Standard `{"message": ...}` response body.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Request body accepted as JSON or form fields, JSON wins when the request
/// declares `Content-Type: application/json`.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("application/json"));

        if is_json {
            let Json(payload) = req
                .extract::<Json<T>, _>()
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(Self(payload));
        }

        let Form(payload) = req
            .extract::<Form<T>, _>()
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(Self(payload))
    }
}

/// Guard for the mutating planet routes: signature and expiry check only,
/// any valid token may mutate any planet.
#[derive(Debug)]
pub struct Bearer(pub crate::token::AccessTokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiMessage>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(globals) = parts.extensions.get::<GlobalArgs>() else {
            error!("GlobalArgs extension not set");

            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiMessage::new("Server misconfigured"),
            ));
        };

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    ApiMessage::new("Missing Authorization header"),
                )
            })?;

        let claims = verify_hs256(
            token,
            globals.token_secret.expose_secret(),
            Utc::now().timestamp(),
        )
        .map_err(|e| {
            debug!("Token verification failed: {e}");

            (
                StatusCode::UNAUTHORIZED,
                ApiMessage::new("Invalid or expired token"),
            )
        })?;

        Ok(Self(claims))
    }
}
