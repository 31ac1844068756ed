use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{INVITE_CODE_ALPHABET, INVITE_CODE_LENGTH};
use crate::errors::{Error, Result, ValidationError};

/// Database and domain model for a household; fields map directly.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::households)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub id: String,
    pub name: String,
    pub invite_code: String,
    pub created_at: String,
}

/// A member profile, as listed within a household.
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub household_id: Option<String>,
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    Admin,
    Member,
}

impl ProfileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRole::Admin => "admin",
            ProfileRole::Member => "member",
        }
    }
}

pub struct NewHousehold {
    pub name: String,
}

impl NewHousehold {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Household name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Eight characters from an alphabet without 0/O/1/I. The alphabet has 32
/// entries, so masking each byte to five bits keeps the draw uniform.
pub(crate) fn generate_invite_code() -> String {
    Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(INVITE_CODE_LENGTH)
        .map(|b| INVITE_CODE_ALPHABET[(b & 0x1f) as usize] as char)
        .collect()
}

/// Codes are entered by hand; be forgiving about case and whitespace.
pub(crate) fn normalize_invite_code(code: &str) -> String {
    code.trim().to_uppercase()
}
