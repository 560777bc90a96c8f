//! Dashboard loading

use crate::api::HealthApi;
use crate::error::ClientResult;
use crate::session::Session;
use chrono::NaiveDate;
use tracing::debug;
use vitaprev_shared::DashboardSummary;

/// Dashboard service
pub struct DashboardService;

impl DashboardService {
    /// Fetch everything the dashboard needs concurrently and derive the summary
    ///
    /// Any failed fetch fails the whole load.
    pub async fn load(api: &dyn HealthApi, session: &Session, today: NaiveDate) -> ClientResult<DashboardSummary> {
        let (metrics, meals_today, goals, advice) = tokio::try_join!(
            api.list_metrics(session),
            api.list_meals_on(session, today),
            api.list_goals(session),
            api.latest_advice(session),
        )?;

        debug!(
            metrics = metrics.len(),
            meals = meals_today.len(),
            goals = goals.len(),
            has_advice = advice.is_some(),
            "Dashboard data loaded"
        );

        Ok(DashboardSummary::derive(
            &metrics,
            &meals_today,
            &goals,
            advice.as_ref(),
            today,
        ))
    }
}
