// src/common/dates.rs

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;

use crate::common::error::AppError;

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const ADULT_AGE: i32 = 18;

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("regex de data"));

/// Lê uma data `DD/MM/YYYY`. Qualquer outra forma devolve `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Anos completos entre `birth` e `today` (aritmética de calendário).
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Garante maioridade na data `today`; falha com `InvalidField("data_nascimento")`.
pub fn ensure_adult(raw: &str, today: NaiveDate) -> Result<NaiveDate, AppError> {
    let birth = parse_date(raw).ok_or_else(|| AppError::InvalidField("data_nascimento".into()))?;
    if age_on(birth, today) < ADULT_AGE {
        return Err(AppError::InvalidField("data_nascimento".into()));
    }
    Ok(birth)
}

/// Serde para `NaiveDate` como `DD/MM/YYYY`.
pub mod br_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date '{raw}'")))
    }
}
