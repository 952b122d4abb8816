//! Shared test infrastructure for model and API tests.
//!
//! Every test gets its own database with the schema applied, so tests never
//! see each other's forms. Most tests use a private in-memory database; tests
//! that need several connections writing at once use a file in a temp dir.

#![allow(dead_code)]

use formbuilder::db::{self, DbPool};
use formbuilder::models::form::{FormRequest, InputDraft, InputType};
use tempfile::TempDir;

/// Owns the pool for one test. Dropping it drops the database.
pub struct TestDb {
    pool: DbPool,
    _dir: Option<TempDir>,
}

impl TestDb {
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Fresh in-memory database with migrations applied.
pub async fn setup_test_db() -> TestDb {
    let pool = db::init_memory_pool()
        .await
        .expect("Failed to open in-memory DB");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    TestDb { pool, _dir: None }
}

/// Fresh file-backed database with a multi-connection pool, configured the
/// way the server opens its own.
pub async fn setup_file_db(max_connections: u32) -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("forms.db").display());
    db::ensure_parent_dir(&url).expect("Failed to create DB dir");
    let pool = db::init_pool(&url, max_connections)
        .await
        .expect("Failed to open file DB");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    TestDb {
        pool,
        _dir: Some(dir),
    }
}

pub async fn count_forms(pool: &DbPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM forms")
        .fetch_one(pool)
        .await
        .expect("count forms")
}

pub async fn count_forms_titled(pool: &DbPool, title: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM forms WHERE title = ?")
        .bind(title)
        .fetch_one(pool)
        .await
        .expect("count forms by title")
}

pub async fn count_responses(pool: &DbPool, form_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM form_responses WHERE form_id = ?")
        .bind(form_id)
        .fetch_one(pool)
        .await
        .expect("count responses")
}

pub fn input(input_type: InputType, title: &str) -> InputDraft {
    InputDraft {
        id: None,
        input_type,
        title: title.to_string(),
        placeholder: None,
        required: false,
    }
}

pub fn form_request(title: &str, inputs: Vec<InputDraft>) -> FormRequest {
    FormRequest {
        title: Some(title.to_string()),
        inputs: Some(inputs),
    }
}
