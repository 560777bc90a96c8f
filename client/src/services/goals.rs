//! Goals: listing, creation and deletion

use crate::api::HealthApi;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use chrono::NaiveDate;
use tracing::info;
use vitaprev_shared::validation::validate_goal_request;
use vitaprev_shared::{filter_by_category, CategoryFilter, GoalRecord, GoalRequest, GoalType};

/// Goals service
pub struct GoalsService;

impl GoalsService {
    /// Goals, optionally of one type
    pub async fn list(
        api: &dyn HealthApi,
        session: &Session,
        filter: CategoryFilter<GoalType>,
    ) -> ClientResult<Vec<GoalRecord>> {
        let goals = api.list_goals(session).await?;
        Ok(filter_by_category(&goals, filter))
    }

    /// Create a goal and return the refreshed list
    pub async fn create(
        api: &dyn HealthApi,
        session: &Session,
        request: &GoalRequest,
        today: NaiveDate,
    ) -> ClientResult<Vec<GoalRecord>> {
        validate_goal_request(request, today)?;
        api.create_goal(session, request).await?;
        info!(goal_type = request.goal_type.label(), target = request.target_value, "Goal created");
        api.list_goals(session).await
    }

    /// Delete a goal that is still in progress and return the refreshed list
    ///
    /// Completed and failed goals are kept as history.
    pub async fn delete(api: &dyn HealthApi, session: &Session, id: i64) -> ClientResult<Vec<GoalRecord>> {
        let goals = api.list_goals(session).await?;
        let goal = goals
            .iter()
            .find(|g| g.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("goal {}", id)))?;

        if !goal.is_deletable() {
            return Err(ClientError::Conflict(format!(
                "goal {} is {} and cannot be deleted",
                id,
                goal.status.label()
            )));
        }

        api.delete_goal(session, id).await?;
        info!(id, "Goal deleted");
        api.list_goals(session).await
    }
}
