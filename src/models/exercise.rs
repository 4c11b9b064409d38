use chrono::NaiveDate;
use rusqlite::Row;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

/// Display format for exercise dates, e.g. "Mon Jan 15 2024".
pub const DISPLAY_DATE_FORMAT: &str = "%a %b %d %Y";

pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
}

impl FromSqliteRow for ExerciseEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            description: row.get("description")?,
            duration: row.get("duration")?,
            date: row.get("date")?,
        })
    }
}

/// A submitted field that may arrive as a JSON number, a JSON string or a
/// form value. Anything else is kept as `Other` so the handler can decide.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Other(IgnoredAny),
}

impl FieldValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Other(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Integer(n) => Some(n.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExercise {
    #[serde(default)]
    pub description: Option<FieldValue>,
    #[serde(default)]
    pub duration: Option<FieldValue>,
    #[serde(default)]
    pub date: Option<FieldValue>,
}

impl CreateExercise {
    /// The submitted description, or the message explaining why it is unusable.
    pub fn description(&self) -> Result<String, &'static str> {
        match &self.description {
            None => Err("Description is required"),
            Some(value) => match value.as_text() {
                None => Err("Description must be text"),
                Some(text) if text.trim().is_empty() => Err("Description is required"),
                Some(text) => Ok(text),
            },
        }
    }

    pub fn duration(&self) -> Option<i64> {
        self.duration.as_ref().and_then(FieldValue::as_integer)
    }

    pub fn date(&self) -> Option<String> {
        self.date.as_ref().and_then(FieldValue::as_text)
    }
}
