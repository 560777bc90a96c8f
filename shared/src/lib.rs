//! VitaPrev Shared Library
//!
//! Wire types, validation rules and the pure derivations behind every
//! screen: date normalization, BMI classification, latest-record selection,
//! nutrition totals, filtering and pagination. Used by the HTTP client and
//! the WASM bindings.

pub mod aggregate;
pub mod bmi;
pub mod dates;
pub mod errors;
pub mod filter;
pub mod latest;
pub mod models;
pub mod pagination;
pub mod summary;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use aggregate::{aggregate, count_by_status, count_risky_meals, GoalStatusCounts, NutritionTotals};
pub use bmi::{calculate_bmi, classify_bmi, classify_bmi_text, BmiCategory, BmiClassification};
pub use dates::{
    format_date_for_display, format_time_for_display, parse_date, time_ago, time_ago_label,
    to_backend_date, to_iso_date, Dated, TimeAgo, DATE_PLACEHOLDER,
};
pub use errors::*;
pub use filter::{
    filter_by_category, filter_by_date, filter_by_range, CategoryFilter, MetricField, NutrientField,
    ValueRange,
};
pub use latest::{select_latest, sort_newest_first};
pub use models::*;
pub use pagination::{paginate, Page, Pagination, DEFAULT_PAGE_SIZE};
pub use summary::{AdviceSummary, DashboardSummary};
pub use types::*;
