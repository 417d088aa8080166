//! Integration tests for the planetary API.
//!
//! Each test builds the full router against a seeded in-memory SQLite
//! database and drives it in-process, covering the seeded listing, the
//! login/token flow, the bearer guard on the mutating planet routes and the
//! duplicate/not-registered answers.
use anyhow::Result;
use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    },
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use planetary::{
    cli::globals::GlobalArgs,
    mail::LogSender,
    planetary::{app, store},
    token,
};
use secrecy::SecretString;
use serde_json::{json, Value};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "SECRET";

async fn test_app() -> Result<(Router, SqlitePool)> {
    // A single connection so every request sees the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    store::create_schema(&pool).await?;
    store::seed(&pool).await?;

    let globals = GlobalArgs::new(SecretString::from(SECRET));
    let router = app(pool.clone(), globals, Arc::new(LogSender));

    Ok((router, pool))
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

async fn get(router: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;

    let status = response.status();
    Ok((status, body_json(response).await?))
}

async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    payload: &Value,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    let response = router
        .clone()
        .oneshot(builder.body(Body::from(payload.to_string()))?)
        .await?;

    let status = response.status();
    Ok((status, body_json(response).await?))
}

async fn login_token(router: &Router) -> Result<String> {
    let (status, body) = send_json(
        router,
        "POST",
        "/login",
        None,
        &json!({"email": "test@test.com", "password": "pw"}),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    Ok(body["access_token"]
        .as_str()
        .expect("access_token in body")
        .to_string())
}

fn jupiter() -> Value {
    json!({
        "planet_type": "Class J",
        "planet_name": "Jupiter",
        "home_star": "Sol",
        "mass": 1.898e27,
        "radius": 43441.0,
        "distance": 483.8e6
    })
}

#[tokio::test]
async fn test_root_greeting() -> Result<()> {
    let (router, _pool) = test_app().await?;

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await?.to_bytes();
    assert_eq!(&bytes[..], b"Hello World!");

    Ok(())
}

#[tokio::test]
async fn test_super_simple_and_not_found() -> Result<()> {
    let (router, _pool) = test_app().await?;

    let (status, body) = get(&router, "/super-simple").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "super simple");

    let (status, body) = get(&router, "/not-found").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "NOT FOUND");

    Ok(())
}

#[tokio::test]
async fn test_age_gate() -> Result<()> {
    let (router, _pool) = test_app().await?;

    let (status, body) = get(&router, "/parameters?name=Draco&age=17").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Sorry Draco, you are not old enough!");

    let (status, body) = get(&router, "/parameters?name=Hermione&age=19").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome Hermione!");

    let (status, body) = get(&router, "/url_vars/Ron/17").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Sorry Ron, you are not old enough!");

    let (status, body) = get(&router, "/url_vars/Harry/18").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome Harry!");

    // non-numeric age is rejected by the extractor, not the handler
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/url_vars/Harry/old")
                .body(Body::empty())?,
        )
        .await?;
    assert!(response.status().is_client_error());

    Ok(())
}

#[tokio::test]
async fn test_planets_seeded() -> Result<()> {
    let (router, _pool) = test_app().await?;

    let (status, body) = get(&router, "/planets").await?;
    assert_eq!(status, StatusCode::OK);
    let planets = body.as_array().expect("array of planets");
    assert_eq!(planets.len(), 3);

    let (status, body) = get(&router, "/planet_details/1").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["planet_name"], "Mercury");
    assert_eq!(body["planet_type"], "Class D");
    assert_eq!(body["mass"], 3.258e23);

    // absent rows answer 200 with a message
    let (status, body) = get(&router, "/planet_details/99").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Planet not found!");

    Ok(())
}

#[tokio::test]
async fn test_login_issues_token() -> Result<()> {
    let (router, _pool) = test_app().await?;

    let access_token = login_token(&router).await?;
    assert!(!access_token.is_empty());

    let claims = token::verify_hs256(&access_token, SECRET, Utc::now().timestamp())?;
    assert_eq!(claims.sub, "test@test.com");

    let (status, body) = send_json(
        &router,
        "POST",
        "/login",
        None,
        &json!({"email": "test@test.com", "password": "wrong"}),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Bad login or password");
    assert!(body.get("access_token").is_none());

    Ok(())
}

#[tokio::test]
async fn test_login_accepts_form_body() -> Result<()> {
    let (router, _pool) = test_app().await?;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("email=test%40test.com&password=pw"))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Login successful!");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));

    Ok(())
}

#[tokio::test]
async fn test_mutating_routes_reject_bad_tokens() -> Result<()> {
    let (router, _pool) = test_app().await?;

    // missing header
    let (status, _body) = send_json(&router, "POST", "/add_planet", None, &jupiter()).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // malformed token
    let (status, _body) =
        send_json(&router, "POST", "/add_planet", Some("garbage"), &jupiter()).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // expired token
    let expired = token::sign_hs256(
        SECRET,
        &token::AccessTokenClaims::new("test@test.com", Utc::now().timestamp() - 2 * 900),
    )?;
    let (status, _body) =
        send_json(&router, "POST", "/add_planet", Some(&expired), &jupiter()).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // wrong secret
    let forged = token::sign_hs256(
        "not-the-secret",
        &token::AccessTokenClaims::new("test@test.com", Utc::now().timestamp()),
    )?;
    let (status, _body) = send_json(
        &router,
        "PUT",
        "/update_planet/1",
        Some(&forged),
        &jupiter(),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _body) = send_json(&router, "DELETE", "/delete_planet/1", None, &json!({})).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_add_planet_and_duplicate_name() -> Result<()> {
    let (router, pool) = test_app().await?;
    let access_token = login_token(&router).await?;

    let (status, body) = send_json(
        &router,
        "POST",
        "/add_planet",
        Some(&access_token),
        &jupiter(),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "New planet Jupiter has been registered!");

    // duplicate name answers 200 with a message and no second row
    let (status, body) = send_json(
        &router,
        "POST",
        "/add_planet",
        Some(&access_token),
        &jupiter(),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Planet Jupiter already registered");

    let planets = store::planets_all(&pool).await?;
    let jupiters = planets
        .iter()
        .filter(|p| p.planet_name == "Jupiter")
        .count();
    assert_eq!(jupiters, 1);

    Ok(())
}

#[tokio::test]
async fn test_add_planet_accepts_form_body() -> Result<()> {
    let (router, pool) = test_app().await?;
    let access_token = login_token(&router).await?;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/add_planet")
                .header(AUTHORIZATION, format!("Bearer {access_token}"))
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "planet_type=Class+J&planet_name=Saturn&home_star=Sol\
                     &mass=5.683e26&radius=36184&distance=886e6",
                ))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "New planet Saturn has been registered!");

    let saturn = store::planet_by_name(&pool, "Saturn").await?.expect("row");
    assert_eq!(saturn.mass, 5.683e26);

    Ok(())
}

#[tokio::test]
async fn test_update_planet() -> Result<()> {
    let (router, pool) = test_app().await?;
    let access_token = login_token(&router).await?;

    let replacement = json!({
        "planet_type": "Class M",
        "planet_name": "Mercury",
        "home_star": "Sol",
        "mass": 3.3e23,
        "radius": 1516.0,
        "distance": 35.98e6
    });

    let (status, body) = send_json(
        &router,
        "PUT",
        "/update_planet/1",
        Some(&access_token),
        &replacement,
    )
    .await?;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["message"], "Planet Mercury has been updated!");

    let mercury = store::planet_by_id(&pool, 1).await?.expect("row");
    assert_eq!(mercury.planet_type, "Class M");
    assert_eq!(mercury.mass, 3.3e23);

    // non-existent id leaves the table unchanged
    let before = store::planets_all(&pool).await?;
    let (status, body) = send_json(
        &router,
        "PUT",
        "/update_planet/999",
        Some(&access_token),
        &replacement,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Planet #999 not registered!");
    assert_eq!(store::planets_all(&pool).await?, before);

    Ok(())
}

#[tokio::test]
async fn test_delete_planet_twice() -> Result<()> {
    let (router, pool) = test_app().await?;
    let access_token = login_token(&router).await?;

    let (status, body) = send_json(
        &router,
        "DELETE",
        "/delete_planet/3",
        Some(&access_token),
        &json!({}),
    )
    .await?;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["message"], "Planet 3 has been deleted!");
    assert_eq!(store::planets_all(&pool).await?.len(), 2);

    let (status, body) = send_json(
        &router,
        "DELETE",
        "/delete_planet/3",
        Some(&access_token),
        &json!({}),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Planet #3 not registered!");

    Ok(())
}

#[tokio::test]
async fn test_register_and_duplicate_email() -> Result<()> {
    let (router, pool) = test_app().await?;

    let payload = json!({
        "first_name": "Ginny",
        "last_name": "Weasley",
        "email": "ginny@test.com",
        "password": "horcrux"
    });

    let (status, body) = send_json(&router, "POST", "/register", None, &payload).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");

    let (status, body) = send_json(&router, "POST", "/register", None, &payload).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "This email is already registered.");

    // no second row was created
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind("ginny@test.com")
        .fetch_one(&pool)
        .await?;
    assert_eq!(row.0, 1);

    Ok(())
}

#[tokio::test]
async fn test_retrieve_password() -> Result<()> {
    let (router, _pool) = test_app().await?;

    let (status, body) = get(&router, "/retrieve_password/test@test.com").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password sent");

    let (status, body) = get(&router, "/retrieve_password/nobody@test.com").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Email not found");

    Ok(())
}
