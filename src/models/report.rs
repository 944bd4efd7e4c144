use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{FromRow, Postgres, QueryBuilder};
use validator::Validate;

use crate::database::Database;

const REPORT_COLUMNS: &str = "id, category, category_id, description, created_at";

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub category: String,
    pub category_id: i64,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReport {
    #[validate(length(min = 1, max = 255))]
    pub category: String,
    pub category_id: i64,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportSearch {
    pub category: Option<String>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "date_or_datetime")]
    pub date_from: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "date_or_datetime")]
    pub date_to: Option<NaiveDateTime>,
}

/// Accepts `2024-01-01T09:00:00` as well as a bare `2024-01-01` (midnight).
fn date_or_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(datetime) = raw.parse::<NaiveDateTime>() {
        return Ok(Some(datetime));
    }
    raw.parse::<NaiveDate>()
        .map(|date| Some(date.and_time(chrono::NaiveTime::MIN)))
        .map_err(serde::de::Error::custom)
}

/// Bounds applied to `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedAtRange {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    /// Upper bound is exclusive (same-day search widened to a full day).
    pub to_exclusive: bool,
}

impl CreatedAtRange {
    pub fn new(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Self {
        match (from, to) {
            (Some(from), Some(to)) if from == to => match from.checked_add_signed(TimeDelta::days(1)) {
                Some(next_day) => Self { from: Some(from), to: Some(next_day), to_exclusive: true },
                None => Self { from: Some(from), to: None, to_exclusive: false },
            },
            _ => Self { from, to, to_exclusive: false },
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let after_start = self.from.map_or(true, |from| at >= from);
        let before_end = match self.to {
            Some(to) if self.to_exclusive => at < to,
            Some(to) => at <= to,
            None => true,
        };
        after_start && before_end
    }
}

impl ReportSearch {
    pub fn created_at_range(&self) -> CreatedAtRange {
        CreatedAtRange::new(self.date_from, self.date_to)
    }

    pub fn query(&self) -> QueryBuilder<'_, Postgres> {
        let mut builder = QueryBuilder::new(format!("SELECT {REPORT_COLUMNS} FROM reports WHERE TRUE"));

        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            builder.push(" AND category = ").push_bind(category);
        }
        // 0 is the admin UI's "any" value.
        if let Some(category_id) = self.category_id.filter(|id| *id != 0) {
            builder.push(" AND category_id = ").push_bind(category_id);
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            builder.push(" AND description = ").push_bind(description);
        }

        let range = self.created_at_range();
        if let Some(from) = range.from {
            builder.push(" AND created_at >= ").push_bind(from);
        }
        if let Some(to) = range.to {
            let op = if range.to_exclusive { " AND created_at < " } else { " AND created_at <= " };
            builder.push(op).push_bind(to);
        }

        builder.push(" ORDER BY id");
        builder
    }
}

impl Report {
    pub async fn insert(report: &NewReport, db: &Database) -> Result<Report, sqlx::Error> {
        sqlx::query_as::<_, Report>(&format!(
            "INSERT INTO reports (category, category_id, description)
             VALUES ($1, $2, $3)
             RETURNING {REPORT_COLUMNS}"
        ))
        .bind(&report.category)
        .bind(report.category_id)
        .bind(&report.description)
        .fetch_one(&db.pool)
        .await
    }

    pub async fn find_by_id(id: i64, db: &Database) -> Result<Option<Report>, sqlx::Error> {
        sqlx::query_as::<_, Report>(&format!("SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"))
            .bind(id)
            .fetch_optional(&db.pool)
            .await
    }

    pub async fn find_all(db: &Database) -> Result<Vec<Report>, sqlx::Error> {
        sqlx::query_as::<_, Report>(&format!("SELECT {REPORT_COLUMNS} FROM reports ORDER BY id"))
            .fetch_all(&db.pool)
            .await
    }

    pub async fn search(search: &ReportSearch, db: &Database) -> Result<Vec<Report>, sqlx::Error> {
        search
            .query()
            .build_query_as::<Report>()
            .fetch_all(&db.pool)
            .await
    }
}
