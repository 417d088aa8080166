use crate::planetary::handlers::{ApiMessage, JsonOrForm};
use crate::planetary::store::{self, UserInput};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse};
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};

#[utoipa::path(
    post,
    path= "/register",
    request_body = UserInput,
    responses (
        (status = 201, description = "Registration successful", body = [ApiMessage], content_type = "application/json"),
        (status = 409, description = "A user with the specified email already exists", body = [ApiMessage]),
    ),
    tag= "register"
)]
#[instrument(skip(pool, payload))]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    payload: JsonOrForm<UserInput>,
) -> impl IntoResponse {
    let JsonOrForm(user) = payload;

    match store::user_by_email(&pool, &user.email).await {
        Ok(Some(_)) => (
            StatusCode::CONFLICT,
            ApiMessage::new("This email is already registered."),
        ),

        Ok(None) => match store::insert_user(&pool, &user).await {
            Ok(id) => {
                debug!("User {} registered with id {id}", user.email);

                (
                    StatusCode::CREATED,
                    ApiMessage::new("User created successfully"),
                )
            }

            Err(e) => {
                error!("Error inserting user: {e}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiMessage::new("Error creating user"),
                )
            }
        },

        Err(e) => {
            error!("Error checking email: {e}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiMessage::new("Error creating user"),
            )
        }
    }
}
