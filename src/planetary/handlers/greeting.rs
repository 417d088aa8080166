use crate::planetary::handlers::ApiMessage;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[utoipa::path(
    get,
    path= "/super-simple",
    responses (
        (status = 200, description = "A minimal JSON message", body = [ApiMessage]),
    ),
    tag= "greeting"
)]
pub async fn super_simple() -> impl IntoResponse {
    ApiMessage::new("super simple")
}

#[utoipa::path(
    get,
    path= "/not-found",
    responses (
        (status = 404, description = "Always not found", body = [ApiMessage]),
    ),
    tag= "greeting"
)]
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, ApiMessage::new("NOT FOUND"))
}

#[derive(IntoParams, Deserialize, Debug)]
#[into_params(parameter_in = Query)]
pub struct AgeGateArgs {
    name: String,
    age: i64,
}

#[utoipa::path(
    get,
    path= "/parameters",
    params(AgeGateArgs),
    responses (
        (status = 200, description = "Welcome message", body = [ApiMessage]),
        (status = 401, description = "Under age", body = [ApiMessage]),
    ),
    tag= "greeting"
)]
pub async fn parameters(Query(args): Query<AgeGateArgs>) -> impl IntoResponse {
    age_check(&args.name, args.age)
}

#[utoipa::path(
    get,
    path= "/url_vars/{name}/{age}",
    params(
        ("name" = String, Path, description = "Name to greet"),
        ("age" = i64, Path, description = "Age to gate on"),
    ),
    responses (
        (status = 200, description = "Welcome message", body = [ApiMessage]),
        (status = 401, description = "Under age", body = [ApiMessage]),
    ),
    tag= "greeting"
)]
pub async fn url_vars(Path((name, age)): Path<(String, i64)>) -> impl IntoResponse {
    age_check(&name, age)
}

// Threshold comparison only, not a validation boundary
fn age_check(name: &str, age: i64) -> (StatusCode, Json<ApiMessage>) {
    if age < 18 {
        (
            StatusCode::UNAUTHORIZED,
            ApiMessage::new(format!("Sorry {name}, you are not old enough!")),
        )
    } else {
        (StatusCode::OK, ApiMessage::new(format!("Welcome {name}!")))
    }
}
