//! Health metrics: history, recording and editing

use crate::api::HealthApi;
use crate::error::ClientResult;
use crate::session::Session;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use vitaprev_shared::validation::validate_metric_request;
use vitaprev_shared::{
    filter_by_date, filter_by_range, paginate, select_latest, sort_newest_first, HealthMetricRecord,
    MetricField, MetricRequest, Page, Pagination, DEFAULT_PAGE_SIZE,
};

/// Filters and paging for the metrics history table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Only records on this calendar day
    pub date: Option<NaiveDate>,
    /// Weight bounds as typed by the user
    pub weight_min: Option<String>,
    pub weight_max: Option<String>,
    pub page: usize,
    pub per_page: usize,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            date: None,
            weight_min: None,
            weight_max: None,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Metrics service
pub struct MetricsService;

impl MetricsService {
    /// All metrics, newest first
    pub async fn list(api: &dyn HealthApi, session: &Session) -> ClientResult<Vec<HealthMetricRecord>> {
        Ok(sort_newest_first(api.list_metrics(session).await?))
    }

    /// Most recent metrics snapshot
    pub async fn latest(api: &dyn HealthApi, session: &Session) -> ClientResult<Option<HealthMetricRecord>> {
        let metrics = api.list_metrics(session).await?;
        Ok(select_latest(&metrics).cloned())
    }

    /// One page of the filtered history, newest first
    pub async fn history(
        api: &dyn HealthApi,
        session: &Session,
        query: &HistoryQuery,
    ) -> ClientResult<Page<HealthMetricRecord>> {
        let metrics = api.list_metrics(session).await?;
        Ok(history_page(metrics, query))
    }

    /// Record a new snapshot and return the refreshed history
    pub async fn record(
        api: &dyn HealthApi,
        session: &Session,
        request: &MetricRequest,
    ) -> ClientResult<Vec<HealthMetricRecord>> {
        validate_metric_request(request)?;
        api.create_metric(session, request).await?;
        info!(weight = request.weight, height = request.height, "Metrics recorded");
        Self::list(api, session).await
    }

    /// Edit a snapshot and return the refreshed history
    pub async fn update(
        api: &dyn HealthApi,
        session: &Session,
        id: i64,
        request: &MetricRequest,
    ) -> ClientResult<Vec<HealthMetricRecord>> {
        validate_metric_request(request)?;
        api.update_metric(session, id, request).await?;
        info!(id, "Metrics updated");
        Self::list(api, session).await
    }
}

/// Filter by day, then by weight, then sort and slice out the page
fn history_page(metrics: Vec<HealthMetricRecord>, query: &HistoryQuery) -> Page<HealthMetricRecord> {
    let metrics = match query.date {
        Some(date) => filter_by_date(&metrics, date),
        None => metrics,
    };
    let filtered = filter_by_range(
        &metrics,
        MetricField::Weight,
        query.weight_min.as_deref(),
        query.weight_max.as_deref(),
    );
    paginate(
        &sort_newest_first(filtered),
        Pagination {
            page: query.page,
            per_page: query.per_page,
        },
    )
}
