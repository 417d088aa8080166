use crate::planetary::handlers::ApiMessage;
use crate::planetary::store::{self, Planet};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use sqlx::SqlitePool;
use tracing::{error, instrument};

#[utoipa::path(
    get,
    path= "/planets",
    responses (
        (status = 200, description = "All planets", body = [Planet], content_type = "application/json"),
    ),
    tag= "planets"
)]
#[instrument(skip(pool))]
pub async fn planets(Extension(pool): Extension<SqlitePool>) -> impl IntoResponse {
    match store::planets_all(&pool).await {
        Ok(planets) => (StatusCode::OK, Json(planets)).into_response(),

        Err(e) => {
            error!("Error listing planets: {e}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiMessage::new("Error listing planets"),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path= "/planet_details/{planet_id}",
    params(
        ("planet_id" = i64, Path, description = "Planet id"),
    ),
    responses (
        (status = 200, description = "One planet, or a not-found message", body = Planet),
    ),
    tag= "planets"
)]
#[instrument(skip(pool))]
pub async fn planet_details(
    Extension(pool): Extension<SqlitePool>,
    Path(planet_id): Path<i64>,
) -> impl IntoResponse {
    match store::planet_by_id(&pool, planet_id).await {
        Ok(Some(planet)) => (StatusCode::OK, Json(planet)).into_response(),

        // absent rows answer 200 with a message, as the source API does
        Ok(None) => (StatusCode::OK, ApiMessage::new("Planet not found!")).into_response(),

        Err(e) => {
            error!("Error fetching planet {planet_id}: {e}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiMessage::new("Error fetching planet"),
            )
                .into_response()
        }
    }
}
