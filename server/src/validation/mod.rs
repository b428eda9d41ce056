//! Per-resource field validators.
//!
//! Each write endpoint has a pure validator `(payload, is_update) -> Vec<String>`;
//! an empty vec means valid. Rules are field-local and every violation is
//! accumulated so the client sees the full error set in one response.
//! Presence is required only on creation - `is_update` suppresses the
//! "required" checks while constraints still apply to whichever fields are
//! present. Uniqueness against the store is the handlers' job.

pub mod comments;
pub mod ratings;
pub mod recipes;
pub mod users;

use serde::{Deserialize, Deserializer};

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Used with `#[serde(default, deserialize_with = "double_option")]` on an
/// `Option<Option<T>>` field: `None` means the key was omitted, `Some(None)`
/// means the client sent `null` to clear the column.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Push "{field} is required" on creation when the field is absent.
/// Returns true when the field needs no further checks (absent).
fn check_required<T>(errors: &mut Vec<String>, field: &str, value: &Option<T>, is_update: bool) -> bool {
    if value.is_none() {
        if !is_update {
            errors.push(format!("{field} is required"));
        }
        return true;
    }
    false
}
