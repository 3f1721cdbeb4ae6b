//! Institution domain model

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// An organization (usually a university) configured in the backend
///
/// `short_name` is the path segment used in the browser login URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: String,
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub environment_name: Option<JsonValue>,
    #[serde(default, rename = "type")]
    pub institution_type: i64,
    #[serde(default)]
    pub guest_deposit: i64,
    #[serde(default)]
    pub guest_login: i64,
    #[serde(default)]
    pub guest_login_not_required: i64,
}

/// `institution.retrieveLookupList` payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InstitutionsResponse {
    pub institutions: Vec<Institution>,
}
