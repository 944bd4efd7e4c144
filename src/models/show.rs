use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use validator::Validate;

use super::enums::{Category, Region, SeatGrade, ShowState};
use super::venue::Theater;

/* ---------- stored rows ---------- */

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ShowDetail {
    pub show_detail_id: i64,
    #[sqlx(rename = "show_detail_api_id")]
    pub api_id: String,
    #[sqlx(rename = "show_detail_area")]
    pub area: Region,
    #[sqlx(rename = "show_detail_cast")]
    pub cast: String,
    #[sqlx(rename = "show_detail_category")]
    pub category: Category,
    #[sqlx(rename = "show_detail_name")]
    pub name: String,
    #[sqlx(rename = "show_detail_poster_image_path")]
    pub poster_image_path: String,
    #[sqlx(rename = "show_detail_runtime")]
    pub runtime: String,
    #[sqlx(rename = "show_detail_state")]
    pub state: ShowState,
    pub hall_id: i64,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PriceBySeatClass {
    pub price_by_seat_class_id: i64,
    pub show_detail_id: i64,
    #[sqlx(rename = "price_by_seat_class_seat_class")]
    pub seat_class: SeatGrade,
    #[sqlx(rename = "price_by_seat_class_price")]
    pub price: i32,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Seat {
    pub seat_id: i64,
    #[sqlx(rename = "seat_col")]
    pub col: i32,
    #[sqlx(rename = "seat_row")]
    pub row: i32,
    pub seat_class: SeatGrade,
    pub show_detail_id: i64,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ShowSchedule {
    pub show_schedule_id: i64,
    #[sqlx(rename = "show_schedule_date_time")]
    pub date_time: NaiveDateTime,
    pub show_detail_id: i64,
}

/* ---------- registration payload ---------- */

// Parent references on prices/seats/schedules are not part of the payload;
// the store stamps them with the generated show_detail_id.

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewShowDetail {
    #[serde(alias = "show_detail_api_id")]
    #[validate(length(min = 1, max = 255))]
    pub api_id: String,
    #[serde(alias = "show_detail_area")]
    pub area: Region,
    #[serde(alias = "show_detail_cast")]
    pub cast: String,
    #[serde(alias = "show_detail_category")]
    pub category: Category,
    #[serde(alias = "show_detail_name")]
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(alias = "show_detail_poster_image_path")]
    pub poster_image_path: String,
    #[serde(alias = "show_detail_runtime")]
    #[validate(length(max = 255))]
    pub runtime: String,
    #[serde(alias = "show_detail_state")]
    pub state: ShowState,
    #[validate(range(min = 1))]
    pub hall_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPrice {
    #[serde(alias = "price_by_seat_class_seat_class")]
    pub seat_class: SeatGrade,
    #[serde(alias = "price_by_seat_class_price")]
    #[validate(range(min = 0))]
    pub price: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSeat {
    #[serde(alias = "seat_col")]
    #[validate(range(min = 0))]
    pub col: i32,
    #[serde(alias = "seat_row")]
    #[validate(range(min = 0))]
    pub row: i32,
    pub seat_class: SeatGrade,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSchedule {
    #[serde(alias = "show_schedule_date_time")]
    pub date_time: NaiveDateTime,
}

/// Body of `POST /register_show`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShowRegistration {
    #[validate(nested)]
    pub show_detail: NewShowDetail,
    #[serde(default)]
    #[validate(nested)]
    pub prices: Vec<NewPrice>,
    #[serde(default)]
    #[validate(nested)]
    pub seats: Vec<NewSeat>,
    #[serde(default)]
    #[validate(nested)]
    pub schedules: Vec<NewSchedule>,
}

/* ---------- composite read ---------- */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallSummary {
    pub hall_id: i64,
    pub hall_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub seat_class: SeatGrade,
    pub price: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatEntry {
    pub seat_id: i64,
    pub col: i32,
    pub row: i32,
    pub seat_class: SeatGrade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date_time: NaiveDateTime,
}

/// Show detail with its hall, theater and every dependent row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullShowDetail {
    pub show_detail: ShowDetail,
    pub theater: Theater,
    pub hall: HallSummary,
    pub prices: Vec<PriceEntry>,
    pub seats: Vec<SeatEntry>,
    pub schedules: Vec<ScheduleEntry>,
}

/// One row of the joined read: parent columns plus child collections
/// aggregated as JSON arrays.
#[derive(Debug, FromRow)]
pub struct FullShowDetailRow {
    #[sqlx(flatten)]
    pub show_detail: ShowDetail,
    pub hall_name: String,
    pub theater_id: i64,
    pub theater_name: String,
    pub prices: Json<Vec<PriceEntry>>,
    pub seats: Json<Vec<SeatEntry>>,
    pub schedules: Json<Vec<ScheduleEntry>>,
}

impl From<FullShowDetailRow> for FullShowDetail {
    fn from(row: FullShowDetailRow) -> Self {
        let hall = HallSummary {
            hall_id: row.show_detail.hall_id,
            hall_name: row.hall_name,
        };

        FullShowDetail {
            show_detail: row.show_detail,
            theater: Theater {
                theater_id: row.theater_id,
                theater_name: row.theater_name,
            },
            hall,
            prices: row.prices.0,
            seats: row.seats.0,
            schedules: row.schedules.0,
        }
    }
}
