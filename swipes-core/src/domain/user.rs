//! User profile domain model

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// The authenticated user's profile, as returned by `user.retrieve`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub user_name: String,
    pub institution_id: String,
    #[serde(default)]
    pub object_revision: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub stale_profile: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub cashless_media_status: i64,
    #[serde(default)]
    pub guest_user: bool,
    #[serde(default)]
    pub has_cashless_card: bool,
    #[serde(default)]
    pub last_updated_profile: Option<String>,
    #[serde(default)]
    pub last_updated_cashless: Option<String>,
    #[serde(default)]
    pub email_bounce_message: Option<String>,
    #[serde(default)]
    pub email_bounce_status: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub child_user_info_list: Vec<JsonValue>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_notification_info_list: Vec<JsonValue>,
    #[serde(default)]
    pub user_media_info_list: Option<JsonValue>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl UserProfile {
    /// "First Middle Last", skipping blank parts; falls back to the user name
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            self.user_name.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// The backend sends `null` for empty lists
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<JsonValue>>::deserialize(deserializer)?.unwrap_or_default())
}
