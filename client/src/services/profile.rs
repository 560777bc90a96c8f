//! User profile

use crate::api::HealthApi;
use crate::error::ClientResult;
use crate::session::Session;
use tracing::info;
use vitaprev_shared::validation::validate_profile_update;
use vitaprev_shared::{ProfileUpdate, UserProfile};

/// Profile service
pub struct ProfileService;

impl ProfileService {
    pub async fn get(api: &dyn HealthApi, session: &Session) -> ClientResult<UserProfile> {
        api.get_profile(session).await
    }

    /// Apply a partial update and return the refetched profile
    pub async fn update(
        api: &dyn HealthApi,
        session: &Session,
        update: &ProfileUpdate,
    ) -> ClientResult<UserProfile> {
        validate_profile_update(update)?;
        api.update_profile(session, update).await?;
        info!(email = session.email(), "Profile updated");
        api.get_profile(session).await
    }
}
