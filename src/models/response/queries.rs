use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};

use super::snapshot::snapshot_answers;
use super::types::*;
use crate::errors::AppError;
use crate::models::{decode_timestamp, encode_timestamp, form, now_utc};

#[derive(sqlx::FromRow)]
struct ResponseRow {
    id: i64,
    form_id: i64,
    responses: String,
    submitted_at: String,
}

impl TryFrom<ResponseRow> for FormResponse {
    type Error = AppError;

    fn try_from(row: ResponseRow) -> Result<Self, Self::Error> {
        Ok(FormResponse {
            id: row.id,
            form_id: row.form_id,
            responses: serde_json::from_str(&row.responses)?,
            submitted_at: decode_timestamp(&row.submitted_at)?,
        })
    }
}

/// Store one submission for a form. Every call creates a new record.
pub async fn submit(
    pool: &SqlitePool,
    form_id: i64,
    answers: &HashMap<String, String>,
) -> Result<FormResponse, AppError> {
    let form = form::find_by_id(pool, form_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let responses = snapshot_answers(&form.inputs, answers);
    let dropped = answers.len().saturating_sub(responses.len());
    if dropped > 0 {
        log::debug!("Form {form_id}: {dropped} empty or unknown answers not stored");
    }

    let submitted_at = now_utc();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO form_responses (form_id, responses, submitted_at) \
         VALUES (?, ?, ?) RETURNING id",
    )
    .bind(form_id)
    .bind(serde_json::to_string(&responses)?)
    .bind(encode_timestamp(&submitted_at))
    .fetch_one(pool)
    .await?;

    log::info!("Stored response {id} for form {form_id} ({} answers)", responses.len());
    Ok(FormResponse {
        id,
        form_id,
        responses,
        submitted_at,
    })
}

/// Responses for a form, newest first. An unknown form id simply has none.
pub async fn find_for_form(pool: &SqlitePool, form_id: i64) -> Result<Vec<FormResponse>, AppError> {
    let rows = sqlx::query_as::<_, ResponseRow>(
        "SELECT id, form_id, responses, submitted_at FROM form_responses \
         WHERE form_id = ? ORDER BY submitted_at DESC, id DESC",
    )
    .bind(form_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(FormResponse::try_from).collect()
}

/// Remove every response of a form. Runs on the caller's connection so it can
/// share the form delete's transaction.
pub async fn delete_for_form(conn: &mut SqliteConnection, form_id: i64) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM form_responses WHERE form_id = ?")
        .bind(form_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
