//! Client services
//!
//! Each service validates input, calls the backend through [`HealthApi`]
//! and hands the raw records to the shared derivations. Mutations return
//! the freshly refetched collection.
//!
//! [`HealthApi`]: crate::api::HealthApi

pub mod auth;
pub mod dashboard;
pub mod goals;
pub mod meals;
pub mod metrics;
pub mod profile;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use goals::GoalsService;
pub use meals::{MealDay, MealsService};
pub use metrics::{HistoryQuery, MetricsService};
pub use profile::ProfileService;
