use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Postgres, QueryBuilder};
use validator::Validate;

use crate::database::Database;

const LOG_COLUMNS: &str = "id, member_id, table_name, old_value, new_value, timestamp, changed_by";

/// One audited field change.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub member_id: i64,
    pub table_name: String,
    pub old_value: String,
    pub new_value: String,
    pub timestamp: NaiveDateTime,
    pub changed_by: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewLogEntry {
    pub member_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub table_name: String,
    #[validate(length(max = 255))]
    pub old_value: String,
    #[validate(length(max = 255))]
    pub new_value: String,
    pub timestamp: Option<NaiveDateTime>,
    #[validate(length(min = 1, max = 255))]
    pub changed_by: String,
}

/// Filters of `POST /logs/search`. Empty strings count as "not given".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogSearch {
    pub member_id: Option<i64>,
    pub table_name: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
}

fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl LogSearch {
    pub fn query(&self) -> QueryBuilder<'_, Postgres> {
        let mut builder = QueryBuilder::new(format!("SELECT {LOG_COLUMNS} FROM logging WHERE TRUE"));

        if let Some(member_id) = self.member_id {
            builder.push(" AND member_id = ").push_bind(member_id);
        }
        if let Some(table_name) = given(&self.table_name) {
            builder.push(" AND table_name = ").push_bind(table_name);
        }
        if let Some(new_value) = given(&self.new_value) {
            builder.push(" AND new_value = ").push_bind(new_value);
        }
        if let Some(changed_by) = given(&self.changed_by) {
            builder.push(" AND changed_by = ").push_bind(changed_by);
        }
        if let Some(start) = self.start_time {
            builder.push(" AND timestamp >= ").push_bind(start);
        }
        if let Some(end) = self.end_time {
            builder.push(" AND timestamp <= ").push_bind(end);
        }

        builder.push(" ORDER BY id");
        builder
    }
}

impl LogEntry {
    pub async fn insert(entry: &NewLogEntry, db: &Database) -> Result<LogEntry, sqlx::Error> {
        let timestamp = entry.timestamp.unwrap_or_else(|| Utc::now().naive_utc());

        sqlx::query_as::<_, LogEntry>(&format!(
            "INSERT INTO logging (member_id, table_name, old_value, new_value, timestamp, changed_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {LOG_COLUMNS}"
        ))
        .bind(entry.member_id)
        .bind(&entry.table_name)
        .bind(&entry.old_value)
        .bind(&entry.new_value)
        .bind(timestamp)
        .bind(&entry.changed_by)
        .fetch_one(&db.pool)
        .await
    }

    pub async fn find_all(db: &Database) -> Result<Vec<LogEntry>, sqlx::Error> {
        sqlx::query_as::<_, LogEntry>(&format!("SELECT {LOG_COLUMNS} FROM logging ORDER BY id"))
            .fetch_all(&db.pool)
            .await
    }

    pub async fn find_by_member(member_id: i64, db: &Database) -> Result<Vec<LogEntry>, sqlx::Error> {
        sqlx::query_as::<_, LogEntry>(&format!(
            "SELECT {LOG_COLUMNS} FROM logging WHERE member_id = $1 ORDER BY id"
        ))
        .bind(member_id)
        .fetch_all(&db.pool)
        .await
    }

    pub async fn search(search: &LogSearch, db: &Database) -> Result<Vec<LogEntry>, sqlx::Error> {
        search
            .query()
            .build_query_as::<LogEntry>()
            .fetch_all(&db.pool)
            .await
    }
}
