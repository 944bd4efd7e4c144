use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::database::Database;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Theater {
    pub theater_id: i64,
    pub theater_name: String,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Hall {
    pub hall_id: i64,
    pub hall_name: String,
    pub theater_id: i64,
}

/// Query of `GET /register/theaters`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TheaterSearch {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

/// `%` and `_` in the user's text match literally.
pub fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

impl Theater {
    // Case-insensitive substring match on the name
    pub async fn search_by_name(search: &TheaterSearch, db: &Database) -> Result<Vec<Theater>, sqlx::Error> {
        sqlx::query_as::<_, Theater>(
            "SELECT theater_id, theater_name FROM theater
             WHERE theater_name ILIKE $1
             ORDER BY theater_id
             LIMIT $2 OFFSET $3",
        )
        .bind(like_pattern(&search.name))
        .bind(search.limit)
        .bind(search.skip)
        .fetch_all(&db.pool)
        .await
    }
}

impl Hall {
    pub async fn find_by_theater(theater_id: i64, db: &Database) -> Result<Vec<Hall>, sqlx::Error> {
        sqlx::query_as::<_, Hall>(
            "SELECT hall_id, hall_name, theater_id FROM hall WHERE theater_id = $1 ORDER BY hall_id",
        )
        .bind(theater_id)
        .fetch_all(&db.pool)
        .await
    }
}
