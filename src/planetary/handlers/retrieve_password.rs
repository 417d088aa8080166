use crate::mail::{EmailMessage, EmailSender};
use crate::planetary::handlers::ApiMessage;
use crate::planetary::store;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument};

#[utoipa::path(
    get,
    path= "/retrieve_password/{email}",
    params(
        ("email" = String, Path, description = "Registered email address"),
    ),
    responses (
        (status = 200, description = "Password sent, or an email-not-found message", body = [ApiMessage]),
    ),
    tag= "register"
)]
#[instrument(skip(pool, mailer))]
pub async fn retrieve_password(
    Extension(pool): Extension<SqlitePool>,
    Extension(mailer): Extension<Arc<dyn EmailSender>>,
    Path(email): Path<String>,
) -> impl IntoResponse {
    let user = match store::user_by_email(&pool, &email).await {
        Ok(Some(user)) => user,

        Ok(None) => return (StatusCode::OK, ApiMessage::new("Email not found")),

        Err(e) => {
            error!("Error fetching user: {e}");

            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiMessage::new("Error fetching user"),
            );
        }
    };

    // Mails the stored plaintext password back, source-system behavior
    let message = EmailMessage {
        to_email: user.email,
        subject: "planetary API password recovery".to_string(),
        body: format!("your planetary API password is {}", user.password),
    };

    match mailer.send(&message) {
        Ok(()) => (StatusCode::OK, ApiMessage::new("Password sent")),

        Err(e) => {
            error!("Error sending password mail: {e}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiMessage::new("Error sending mail"),
            )
        }
    }
}
