//! Institution lookup

use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::{Institution, InstitutionsResponse};
use crate::ports::Endpoint;

use super::api::{ApiClient, SessionMode, NO_PARAMS};

/// Lists the institutions a user can log in to
///
/// Works with a temporary session.
pub struct InstitutionService {
    api: Arc<ApiClient>,
}

impl InstitutionService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list_institutions(&self) -> Result<Vec<Institution>> {
        let response: InstitutionsResponse = self
            .api
            .call(Endpoint::Institution, "retrieveLookupList", NO_PARAMS, SessionMode::Attach)
            .await?;
        Ok(response.institutions)
    }
}

/// Case-insensitive match on short name, name, or id
pub fn find_institution<'a>(institutions: &'a [Institution], query: &str) -> Option<&'a Institution> {
    let query = query.trim();
    institutions.iter().find(|i| {
        i.short_name.eq_ignore_ascii_case(query)
            || i.name.eq_ignore_ascii_case(query)
            || i.id == query
    })
}
