//! User profile

use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::UserProfile;
use crate::ports::Endpoint;

use super::api::{ApiClient, SessionMode, NO_PARAMS};

pub struct UserService {
    api: Arc<ApiClient>,
}

impl UserService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn retrieve_user_profile(&self) -> Result<UserProfile> {
        self.api
            .call(Endpoint::User, "retrieve", NO_PARAMS, SessionMode::Attach)
            .await
    }
}
