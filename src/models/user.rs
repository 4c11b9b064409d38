use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{FieldValue, FromSqliteRow};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    #[serde(default)]
    pub username: Option<FieldValue>,
}

impl CreateUser {
    /// The submitted username, if it holds anything besides whitespace.
    /// Numbers are taken as their decimal text.
    pub fn username(&self) -> Option<String> {
        self.username
            .as_ref()
            .and_then(FieldValue::as_text)
            .filter(|name| !name.trim().is_empty())
    }
}
