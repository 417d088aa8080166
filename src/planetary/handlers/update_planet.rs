use crate::planetary::handlers::{ApiMessage, Bearer, JsonOrForm};
use crate::planetary::store::{self, PlanetInput};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use tracing::{error, instrument};

#[utoipa::path(
    put,
    path= "/update_planet/{planet_id}",
    request_body = PlanetInput,
    params(
        ("planet_id" = i64, Path, description = "Planet id"),
    ),
    responses (
        (status = 202, description = "Planet replaced", body = [ApiMessage]),
        (status = 200, description = "Planet not registered", body = [ApiMessage]),
        (status = 401, description = "Missing or invalid bearer token", body = [ApiMessage]),
    ),
    security(("bearer" = [])),
    tag= "planets"
)]
#[instrument(skip(pool, payload))]
pub async fn update_planet(
    _claims: Bearer,
    Extension(pool): Extension<SqlitePool>,
    Path(planet_id): Path<i64>,
    payload: JsonOrForm<PlanetInput>,
) -> impl IntoResponse {
    let JsonOrForm(planet) = payload;

    // Full replace of all fields, no partial update
    match store::planet_by_id(&pool, planet_id).await {
        Ok(Some(_)) => match store::update_planet(&pool, planet_id, &planet).await {
            Ok(()) => (
                StatusCode::ACCEPTED,
                ApiMessage::new(format!("Planet {} has been updated!", planet.planet_name)),
            ),

            Err(e) => {
                error!("Error updating planet {planet_id}: {e}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiMessage::new("Error updating planet"),
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
                ApiMessage::new("Error updating planet"),
            )
        }
    }
}
