use crate::planetary::handlers::{ApiMessage, Bearer, JsonOrForm};
use crate::planetary::store::{self, PlanetInput};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse};
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};

#[utoipa::path(
    post,
    path= "/add_planet",
    request_body = PlanetInput,
    responses (
        (status = 200, description = "Planet registered, or a duplicate-name message", body = [ApiMessage]),
        (status = 401, description = "Missing or invalid bearer token", body = [ApiMessage]),
    ),
    security(("bearer" = [])),
    tag= "planets"
)]
#[instrument(skip(pool, payload))]
pub async fn add_planet(
    _claims: Bearer,
    Extension(pool): Extension<SqlitePool>,
    payload: JsonOrForm<PlanetInput>,
) -> impl IntoResponse {
    let JsonOrForm(planet) = payload;

    // Name check and insert are separate statements, two concurrent creates
    // with the same name can both succeed
    match store::planet_by_name(&pool, &planet.planet_name).await {
        Ok(Some(_)) => (
            StatusCode::OK,
            ApiMessage::new(format!(
                "Planet {} already registered",
                planet.planet_name
            )),
        ),

        Ok(None) => match store::insert_planet(&pool, &planet).await {
            Ok(planet_id) => {
                debug!("Planet {} registered with id {planet_id}", planet.planet_name);

                (
                    StatusCode::OK,
                    ApiMessage::new(format!(
                        "New planet {} has been registered!",
                        planet.planet_name
                    )),
                )
            }

            Err(e) => {
                error!("Error inserting planet: {e}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiMessage::new("Error registering planet"),
                )
            }
        },

        Err(e) => {
            error!("Error checking planet name: {e}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiMessage::new("Error registering planet"),
            )
        }
    }
}
