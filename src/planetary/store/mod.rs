//! SQLite persistence: row structs, queries and schema bootstrap.
//!
//! Serialized field order of the row structs is the wire order of the API,
//! so the derives double as the response serializers.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, SqlitePool,
};
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, FromRow, Debug, Clone, PartialEq)]
pub struct Planet {
    pub planet_id: i64,
    pub planet_type: String,
    pub planet_name: String,
    pub home_star: String,
    pub mass: f64,
    pub radius: f64,
    pub distance: f64,
}

#[derive(ToSchema, Serialize, Deserialize, FromRow, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Request body for planet creation and full-replace updates, accepted as
/// JSON or form fields.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PlanetInput {
    pub planet_type: String,
    pub planet_name: String,
    pub home_star: String,
    pub mass: f64,
    pub radius: f64,
    pub distance: f64,
}

/// Request body for `/register`, accepted as JSON or form fields.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Open the pool against a file-backed database, creating the file on
/// first use.
///
/// # Errors
/// Returns an error if the DSN is malformed or the database cannot be opened.
pub async fn connect(dsn: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(dsn)
        .context("invalid database DSN")?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Create both tables. Email uniqueness lives in the schema, planet name
/// uniqueness is checked only by the add handler before insert.
///
/// # Errors
/// Returns an error if a statement fails.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS planets (
            planet_id INTEGER PRIMARY KEY AUTOINCREMENT,
            planet_type TEXT NOT NULL,
            planet_name TEXT NOT NULL,
            home_star TEXT NOT NULL,
            mass REAL NOT NULL,
            radius REAL NOT NULL,
            distance REAL NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Drop both tables.
///
/// # Errors
/// Returns an error if a statement fails.
pub async fn drop_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DROP TABLE IF EXISTS planets").execute(pool).await?;
    sqlx::query("DROP TABLE IF EXISTS users").execute(pool).await?;

    Ok(())
}

/// Insert the sample rows: three planets and one test user. Running it a
/// second time fails on the users email uniqueness constraint.
///
/// # Errors
/// Returns an error if an insert fails.
pub async fn seed(pool: &SqlitePool) -> Result<()> {
    let planets = [
        PlanetInput {
            planet_type: "Class D".to_string(),
            planet_name: "Mercury".to_string(),
            home_star: "Sol".to_string(),
            mass: 3.258e23,
            radius: 1516.0,
            distance: 35.98e6,
        },
        PlanetInput {
            planet_type: "Class K".to_string(),
            planet_name: "Venus".to_string(),
            home_star: "Sol".to_string(),
            mass: 4.86,
            radius: 3760.0,
            distance: 67.24e6,
        },
        PlanetInput {
            planet_type: "Class M".to_string(),
            planet_name: "Earth".to_string(),
            home_star: "Sol".to_string(),
            mass: 5.972e24,
            radius: 3969.0,
            distance: 92.24e6,
        },
    ];

    for planet in &planets {
        insert_planet(pool, planet).await?;
    }

    insert_user(
        pool,
        &UserInput {
            first_name: "Harry".to_string(),
            last_name: "Potter".to_string(),
            email: "test@test.com".to_string(),
            password: "pw".to_string(),
        },
    )
    .await?;

    Ok(())
}

pub async fn planets_all(pool: &SqlitePool) -> sqlx::Result<Vec<Planet>> {
    sqlx::query_as::<_, Planet>(
        "SELECT planet_id, planet_type, planet_name, home_star, mass, radius, distance
         FROM planets",
    )
    .fetch_all(pool)
    .await
}

pub async fn planet_by_id(pool: &SqlitePool, planet_id: i64) -> sqlx::Result<Option<Planet>> {
    sqlx::query_as::<_, Planet>(
        "SELECT planet_id, planet_type, planet_name, home_star, mass, radius, distance
         FROM planets WHERE planet_id = ?",
    )
    .bind(planet_id)
    .fetch_optional(pool)
    .await
}

pub async fn planet_by_name(pool: &SqlitePool, planet_name: &str) -> sqlx::Result<Option<Planet>> {
    sqlx::query_as::<_, Planet>(
        "SELECT planet_id, planet_type, planet_name, home_star, mass, radius, distance
         FROM planets WHERE planet_name = ?",
    )
    .bind(planet_name)
    .fetch_optional(pool)
    .await
}

pub async fn insert_planet(pool: &SqlitePool, planet: &PlanetInput) -> sqlx::Result<i64> {
    let result = sqlx::query(
        "INSERT INTO planets (planet_type, planet_name, home_star, mass, radius, distance)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&planet.planet_type)
    .bind(&planet.planet_name)
    .bind(&planet.home_star)
    .bind(planet.mass)
    .bind(planet.radius)
    .bind(planet.distance)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_planet(
    pool: &SqlitePool,
    planet_id: i64,
    planet: &PlanetInput,
) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE planets
         SET planet_type = ?, planet_name = ?, home_star = ?, mass = ?, radius = ?, distance = ?
         WHERE planet_id = ?",
    )
    .bind(&planet.planet_type)
    .bind(&planet.planet_name)
    .bind(&planet.home_star)
    .bind(planet.mass)
    .bind(planet.radius)
    .bind(planet.distance)
    .bind(planet_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_planet(pool: &SqlitePool, planet_id: i64) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM planets WHERE planet_id = ?")
        .bind(planet_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn user_by_email(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, first_name, last_name, email, password FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Exact email+password equality, no hashing. Plaintext comparison is a
/// property of the source system kept for compatibility.
pub async fn user_by_credentials(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, first_name, last_name, email, password
         FROM users WHERE email = ? AND password = ?",
    )
    .bind(email)
    .bind(password)
    .fetch_optional(pool)
    .await
}

pub async fn insert_user(pool: &SqlitePool, user: &UserInput) -> sqlx::Result<i64> {
    let result = sqlx::query(
        "INSERT INTO users (first_name, last_name, email, password) VALUES (?, ?, ?, ?)",
    )
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.password)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}
