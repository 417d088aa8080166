use crate::planetary::handlers::{ApiMessage, Bearer};
use crate::planetary::store;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use tracing::{error, instrument};

#[utoipa::path(
    delete,
    path= "/delete_planet/{planet_id}",
    params(
        ("planet_id" = i64, Path, description = "Planet id"),
    ),
    responses (
        (status = 202, description = "Planet deleted", body = [ApiMessage]),
        (status = 200, description = "Planet not registered", body = [ApiMessage]),
        (status = 401, description = "Missing or invalid bearer token", body = [ApiMessage]),
    ),
    security(("bearer" = [])),
    tag= "planets"
)]
#[instrument(skip(pool))]
pub async fn delete_planet(
    _claims: Bearer,
    Extension(pool): Extension<SqlitePool>,
    Path(planet_id): Path<i64>,
) -> impl IntoResponse {
    match store::planet_by_id(&pool, planet_id).await {
        Ok(Some(_)) => match store::delete_planet(&pool, planet_id).await {
            Ok(()) => (
                StatusCode::ACCEPTED,
                ApiMessage::new(format!("Planet {planet_id} has been deleted!")),
            ),

            Err(e) => {
                error!("Error deleting planet {planet_id}: {e}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiMessage::new("Error deleting planet"),
                )
            }
        },

        Ok(None) => (
            StatusCode::OK,
            ApiMessage::new(format!("Planet #{planet_id} not registered!")),
        ),

        Err(e) => {
            error!("Error fetching planet {planet_id}: {e}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiMessage::new("Error deleting planet"),
            )
        }
    }
}
