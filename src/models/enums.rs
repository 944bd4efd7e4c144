//! Closed enumerations shared by the show tables.
//!
//! Each enum maps to a Postgres `ENUM` type of the same name and serializes
//! to JSON with the same labels the database stores.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Seat class. Emitted as its letter; input also takes the admin UI's
/// numeric code (`0` = B up to `3` = R), as a number or a digit string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[sqlx(type_name = "seat_grade")]
pub enum SeatGrade {
    R,
    S,
    A,
    B,
}

impl SeatGrade {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(SeatGrade::B),
            1 => Some(SeatGrade::A),
            2 => Some(SeatGrade::S),
            3 => Some(SeatGrade::R),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            SeatGrade::B => 0,
            SeatGrade::A => 1,
            SeatGrade::S => 2,
            SeatGrade::R => 3,
        }
    }
}

struct SeatGradeVisitor;

impl<'de> de::Visitor<'de> for SeatGradeVisitor {
    type Value = SeatGrade;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("one of R, S, A, B or a seat class code 0..=3")
    }

    fn visit_u64<E: de::Error>(self, code: u64) -> Result<SeatGrade, E> {
        SeatGrade::from_code(code).ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(code), &self))
    }

    fn visit_i64<E: de::Error>(self, code: i64) -> Result<SeatGrade, E> {
        u64::try_from(code)
            .ok()
            .and_then(SeatGrade::from_code)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(code), &self))
    }

    fn visit_str<E: de::Error>(self, label: &str) -> Result<SeatGrade, E> {
        match label {
            "R" | "3" => Ok(SeatGrade::R),
            "S" | "2" => Ok(SeatGrade::S),
            "A" | "1" => Ok(SeatGrade::A),
            "B" | "0" => Ok(SeatGrade::B),
            _ => Err(E::invalid_value(de::Unexpected::Str(label), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for SeatGrade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SeatGradeVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "show_state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShowState {
    Scheduled,
    Showing,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Play,
    Movie,
    Performance,
    Concert,
    Musical,
    Exhibition,
    Etc,
}

/// Region of a show. Stored and emitted with the Korean administrative name;
/// input also accepts the upper-case romanized alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "region")]
pub enum Region {
    #[serde(rename = "서울특별시", alias = "SEOUL")]
    #[sqlx(rename = "서울특별시")]
    Seoul,
    #[serde(rename = "부산광역시", alias = "BUSAN")]
    #[sqlx(rename = "부산광역시")]
    Busan,
    #[serde(rename = "대구광역시", alias = "DAEGU")]
    #[sqlx(rename = "대구광역시")]
    Daegu,
    #[serde(rename = "인천광역시", alias = "INCHEON")]
    #[sqlx(rename = "인천광역시")]
    Incheon,
    #[serde(rename = "광주광역시", alias = "GWANGJU")]
    #[sqlx(rename = "광주광역시")]
    Gwangju,
    #[serde(rename = "대전광역시", alias = "DAEJEON")]
    #[sqlx(rename = "대전광역시")]
    Daejeon,
    #[serde(rename = "울산광역시", alias = "ULSAN")]
    #[sqlx(rename = "울산광역시")]
    Ulsan,
    #[serde(rename = "세종특별자치시", alias = "SEJONG")]
    #[sqlx(rename = "세종특별자치시")]
    Sejong,
    #[serde(rename = "경기도", alias = "GYEONGGI")]
    #[sqlx(rename = "경기도")]
    Gyeonggi,
    #[serde(rename = "강원특별자치도", alias = "GANGWON")]
    #[sqlx(rename = "강원특별자치도")]
    Gangwon,
    #[serde(rename = "충청북도", alias = "CHUNGBUK")]
    #[sqlx(rename = "충청북도")]
    Chungbuk,
    #[serde(rename = "충청남도", alias = "CHUNGNAM")]
    #[sqlx(rename = "충청남도")]
    Chungnam,
    #[serde(rename = "전라북도", alias = "JEONBUK")]
    #[sqlx(rename = "전라북도")]
    Jeonbuk,
    #[serde(rename = "전라남도", alias = "JEONNAM")]
    #[sqlx(rename = "전라남도")]
    Jeonnam,
    #[serde(rename = "경상북도", alias = "GYEONGBUK")]
    #[sqlx(rename = "경상북도")]
    Gyeongbuk,
    #[serde(rename = "경상남도", alias = "GYEONGNAM")]
    #[sqlx(rename = "경상남도")]
    Gyeongnam,
    #[serde(rename = "제주특별자치도", alias = "JEJU")]
    #[sqlx(rename = "제주특별자치도")]
    Jeju,
    #[serde(rename = "해외 기타 지역", alias = "OVERSEAS")]
    #[sqlx(rename = "해외 기타 지역")]
    Overseas,
}
