use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable};
use serde_derive::{Deserialize, Serialize};

use crate::{errors::ServerError, schema::notes};

#[derive(Clone, Debug, PartialEq, Eq, Queryable, Serialize, Deserialize)]
pub struct Note {
    pub id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = notes)]
pub struct InsertNote<'a> {
    pub content: &'a str,
}

/// Body of both create and update requests; update replaces the content wholesale.
#[derive(Clone, Debug, Deserialize)]
pub struct NoteContent {
    pub content: String,
}

impl NoteContent {
    pub fn validate(self) -> Result<String, ServerError> {
        if self.content.trim().is_empty() {
            return Err(ServerError::UserError("content is empty".to_string()));
        }

        Ok(self.content)
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Pagination {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    pub const DEFAULT_LIMIT: i64 = 10;

    pub fn resolve(self) -> Result<(i64, i64), ServerError> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(Self::DEFAULT_LIMIT);
        if skip < 0 {
            return Err(ServerError::UserError("skip must not be negative".to_string()));
        }
        if limit < 0 {
            return Err(ServerError::UserError("limit must not be negative".to_string()));
        }

        Ok((skip, limit))
    }
}
