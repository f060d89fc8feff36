use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directory entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advocate {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    pub specialties: Vec<String>,
    pub years_of_experience: i32,
    pub phone_number: i64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Groups a ten digit number as `(XXX) XXX-XXXX`. Anything else is returned as is.
/// For clients displaying a record; the stored digits are never changed.
pub fn format_phone_number(phone_number: &str) -> String {
    if phone_number.len() != 10 || !phone_number.bytes().all(|b| b.is_ascii_digit()) {
        return phone_number.to_string();
    }
    format!(
        "({}) {}-{}",
        &phone_number[..3],
        &phone_number[3..6],
        &phone_number[6..]
    )
}
