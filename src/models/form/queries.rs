use sqlx::SqlitePool;

use super::types::*;
use crate::errors::AppError;
use crate::models::{decode_timestamp, encode_timestamp, now_utc, response};

const SELECT_FORM: &str = "SELECT id, title, inputs, created_at, updated_at FROM forms";

#[derive(sqlx::FromRow)]
struct FormRow {
    id: i64,
    title: String,
    inputs: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<FormRow> for Form {
    type Error = AppError;

    fn try_from(row: FormRow) -> Result<Self, Self::Error> {
        Ok(Form {
            id: row.id,
            title: row.title,
            inputs: serde_json::from_str(&row.inputs)?,
            created_at: decode_timestamp(&row.created_at)?,
            updated_at: decode_timestamp(&row.updated_at)?,
        })
    }
}

/// All forms, most recently updated first.
pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Form>, AppError> {
    let sql = format!("{SELECT_FORM} ORDER BY updated_at DESC, id DESC");
    let rows = sqlx::query_as::<_, FormRow>(&sql).fetch_all(pool).await?;
    rows.into_iter().map(Form::try_from).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Form>, AppError> {
    let sql = format!("{SELECT_FORM} WHERE id = ?");
    let row = sqlx::query_as::<_, FormRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(Form::try_from).transpose()
}

/// Create a form unless another form already has the same title.
///
/// The existence check and the insert are one statement, so concurrent
/// creates with the same title cannot both succeed.
pub async fn create(pool: &SqlitePool, request: &FormRequest) -> Result<Form, AppError> {
    let title = resolve_title(request.title.as_deref());
    let inputs = assign_input_ids(request.inputs.as_deref().unwrap_or_default(), false);
    let inputs_json = serde_json::to_string(&inputs)?;
    let now = now_utc();
    let stamp = encode_timestamp(&now);

    let id: Option<i64> = sqlx::query_scalar(
        "INSERT INTO forms (title, inputs, created_at, updated_at) \
         SELECT ?1, ?2, ?3, ?3 \
         WHERE NOT EXISTS (SELECT 1 FROM forms WHERE title = ?1) \
         RETURNING id",
    )
    .bind(&title)
    .bind(&inputs_json)
    .bind(&stamp)
    .fetch_optional(pool)
    .await?;

    let Some(id) = id else {
        log::info!("Rejected form create: title {title:?} already in use");
        return Err(AppError::DuplicateTitle);
    };

    log::info!("Created form {id} ({title:?}, {} inputs)", inputs.len());
    Ok(Form {
        id,
        title,
        inputs,
        created_at: now,
        updated_at: now,
    })
}

/// Replace a form's title and/or inputs. Parts missing from the request keep
/// their stored value. Title uniqueness is not re-checked.
///
/// One statement, so the write lock is taken up front and concurrent updates
/// wait on the busy timeout instead of failing a read-to-write upgrade.
pub async fn update(pool: &SqlitePool, id: i64, request: &FormRequest) -> Result<Form, AppError> {
    let title = request.title.as_deref().map(|t| resolve_title(Some(t)));
    let inputs_json = match request.inputs.as_deref() {
        Some(drafts) => Some(serde_json::to_string(&assign_input_ids(drafts, true))?),
        None => None,
    };

    let row = sqlx::query_as::<_, FormRow>(
        "UPDATE forms SET title = COALESCE(?1, title), inputs = COALESCE(?2, inputs), \
         updated_at = ?3 WHERE id = ?4 \
         RETURNING id, title, inputs, created_at, updated_at",
    )
    .bind(title)
    .bind(inputs_json)
    .bind(encode_timestamp(&now_utc()))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    log::info!("Updated form {id}");
    Form::try_from(row)
}

/// Delete a form together with every response that references it.
/// Returns the number of responses removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, AppError> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM forms WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if removed == 0 {
        return Err(AppError::NotFound);
    }

    let responses = response::delete_for_form(&mut *tx, id).await?;
    tx.commit().await?;

    log::info!("Deleted form {id} and {responses} responses");
    Ok(responses)
}
