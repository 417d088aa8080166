use crate::cli::globals::GlobalArgs;
use crate::planetary::handlers::{ApiMessage, JsonOrForm};
use crate::planetary::store;
use crate::token::{sign_hs256, AccessTokenClaims};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
}

#[utoipa::path(
    post,
    path= "/login",
    request_body = UserLogin,
    responses (
        (status = 200, description = "Login successful, token in the body", body = [LoginResponse], content_type = "application/json"),
        (status = 401, description = "Unauthorized", body = [ApiMessage]),
    ),
    tag= "login"
)]
#[instrument(skip(pool, globals, payload))]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(globals): Extension<GlobalArgs>,
    payload: JsonOrForm<UserLogin>,
) -> impl IntoResponse {
    let JsonOrForm(user) = payload;

    match store::user_by_credentials(&pool, &user.email, &user.password).await {
        Ok(Some(_)) => {
            let claims = AccessTokenClaims::new(&user.email, Utc::now().timestamp());

            match sign_hs256(globals.token_secret.expose_secret(), &claims) {
                Ok(access_token) => {
                    debug!("Login successful for {}", user.email);

                    (
                        StatusCode::OK,
                        Json(LoginResponse {
                            message: "Login successful!".to_string(),
                            access_token,
                        }),
                    )
                        .into_response()
                }

                Err(e) => {
                    error!("Error signing token: {e}");

                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiMessage::new("Error creating token"),
                    )
                        .into_response()
                }
            }
        }

        Ok(None) => {
            debug!("Bad login for {}", user.email);

            (
                StatusCode::UNAUTHORIZED,
                ApiMessage::new("Bad login or password"),
            )
                .into_response()
        }

        Err(e) => {
            error!("Error fetching user: {e}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiMessage::new("Error fetching user"),
            )
                .into_response()
        }
    }
}
