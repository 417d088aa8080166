use crate::{cli::globals::GlobalArgs, mail::EmailSender};
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method, Request,
    },
    routing::{delete, get, post, put},
    Extension, Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

pub(crate) mod handlers;
pub mod store;

use self::handlers::{
    add_planet::{__path_add_planet, add_planet},
    delete_planet::{__path_delete_planet, delete_planet},
    greeting::{
        __path_not_found, __path_parameters, __path_super_simple, __path_url_vars, not_found,
        parameters, super_simple, url_vars,
    },
    health::{__path_health, health, Health},
    planets::{__path_planet_details, __path_planets, planet_details, planets},
    retrieve_password::{__path_retrieve_password, retrieve_password},
    update_planet::{__path_update_planet, update_planet},
    user_login::{__path_login, login, LoginResponse, UserLogin},
    user_register::{__path_register, register},
    ApiMessage,
};
use self::store::{Planet, PlanetInput, UserInput};

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        super_simple,
        not_found,
        parameters,
        url_vars,
        planets,
        planet_details,
        add_planet,
        update_planet,
        delete_planet,
        register,
        login,
        retrieve_password
    ),
    components(schemas(
        Health,
        ApiMessage,
        Planet,
        PlanetInput,
        UserInput,
        UserLogin,
        LoginResponse
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "planetary", description = "Planetary bodies REST API")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Build the router: every route plus the middleware stack and the shared
/// context (pool, globals, mailer) injected as extensions.
#[must_use]
pub fn app(pool: SqlitePool, globals: GlobalArgs, mailer: Arc<dyn EmailSender>) -> Router {
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(|| async { "Hello World!" }))
        .route("/health", get(health))
        .route("/super-simple", get(super_simple))
        .route("/not-found", get(not_found))
        .route("/parameters", get(parameters))
        .route("/url_vars/:name/:age", get(url_vars))
        .route("/planets", get(planets))
        .route("/planet_details/:planet_id", get(planet_details))
        .route("/add_planet", post(add_planet))
        .route("/update_planet/:planet_id", put(update_planet))
        .route("/delete_planet/:planet_id", delete(delete_planet))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/retrieve_password/:email", get(retrieve_password))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(globals))
                .layer(Extension(mailer))
                .layer(Extension(pool)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(
    port: u16,
    dsn: &str,
    globals: GlobalArgs,
    mailer: Arc<dyn EmailSender>,
) -> Result<()> {
    // Connect to database
    let pool = store::connect(dsn).await?;

    let app = app(pool, globals, mailer);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
