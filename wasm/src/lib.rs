//! VitaPrev WASM Module
//!
//! WebAssembly bindings that let the browser UI run the same summary
//! derivations as the native client. Record lists cross the boundary as
//! JSON strings in the backend's wire format.

use serde::de::DeserializeOwned;
use serde::Serialize;
use vitaprev_shared::{
    filter_by_category, filter_by_range, paginate, parse_date, sort_newest_first, AdviceRecord,
    CategoryFilter, DashboardSummary, FoodType, GoalRecord, HealthMetricRecord, MealRecord,
    MetricField, Pagination,
};
use wasm_bindgen::prelude::*;

fn from_json<T: DeserializeOwned>(raw: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(raw).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn into_js<T>(result: Result<T, String>) -> Result<T, JsValue> {
    result.map_err(|e| JsValue::from_str(&e))
}

/// Calculate BMI from weight (kg) and height (cm); 0 when height is not positive
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    vitaprev_shared::calculate_bmi(weight_kg, height_cm).unwrap_or(0.0)
}

/// BMI band label ("Healthy", "Overweight", ...); "No data" for a missing value
#[wasm_bindgen]
pub fn bmi_label(bmi: Option<f64>) -> String {
    vitaprev_shared::classify_bmi(bmi).label
}

/// Relative label for a wire date, e.g. "3 days ago"
#[wasm_bindgen]
pub fn time_ago_label(raw: &str, today: &str) -> Result<String, JsValue> {
    into_js(time_ago_label_impl(raw, today))
}

fn time_ago_label_impl(raw: &str, today: &str) -> Result<String, String> {
    let today = parse_date(today).map_err(|e| e.to_string())?;
    Ok(vitaprev_shared::time_ago_label(raw, today))
}

/// `dd-MM-yyyy` display form of a wire date
#[wasm_bindgen]
pub fn format_date_for_display(raw: &str) -> String {
    vitaprev_shared::format_date_for_display(raw)
}

/// Full dashboard summary as JSON
///
/// `advice_json` may be empty or `null` when there is no advice.
#[wasm_bindgen]
pub fn dashboard_summary(
    metrics_json: &str,
    meals_today_json: &str,
    goals_json: &str,
    advice_json: &str,
    today: &str,
) -> Result<String, JsValue> {
    into_js(dashboard_summary_impl(
        metrics_json,
        meals_today_json,
        goals_json,
        advice_json,
        today,
    ))
}

fn dashboard_summary_impl(
    metrics_json: &str,
    meals_today_json: &str,
    goals_json: &str,
    advice_json: &str,
    today: &str,
) -> Result<String, String> {
    let metrics: Vec<HealthMetricRecord> = from_json(metrics_json, "metrics")?;
    let meals: Vec<MealRecord> = from_json(meals_today_json, "meals")?;
    let goals: Vec<GoalRecord> = from_json(goals_json, "goals")?;
    let advice: Option<AdviceRecord> = if advice_json.trim().is_empty() {
        None
    } else {
        from_json(advice_json, "advice")?
    };
    let today = parse_date(today).map_err(|e| e.to_string())?;

    let summary = DashboardSummary::derive(&metrics, &meals, &goals, advice.as_ref(), today);
    to_json(&summary)
}

/// Meals of one food type (`"TODOS"` or `"ALL"` keeps every meal)
#[wasm_bindgen]
pub fn filter_meals_by_type(meals_json: &str, food_type: &str) -> Result<String, JsValue> {
    into_js(filter_meals_by_type_impl(meals_json, food_type))
}

fn filter_meals_by_type_impl(meals_json: &str, food_type: &str) -> Result<String, String> {
    let meals: Vec<MealRecord> = from_json(meals_json, "meals")?;
    let filter: CategoryFilter<FoodType> = food_type.parse()?;
    to_json(&filter_by_category(&meals, filter))
}

/// Metrics whose `field` lies within the user-entered bounds
#[wasm_bindgen]
pub fn filter_metrics_by_range(
    metrics_json: &str,
    field: &str,
    min: Option<String>,
    max: Option<String>,
) -> Result<String, JsValue> {
    into_js(filter_metrics_by_range_impl(
        metrics_json,
        field,
        min.as_deref(),
        max.as_deref(),
    ))
}

fn filter_metrics_by_range_impl(
    metrics_json: &str,
    field: &str,
    min: Option<&str>,
    max: Option<&str>,
) -> Result<String, String> {
    let metrics: Vec<HealthMetricRecord> = from_json(metrics_json, "metrics")?;
    let field: MetricField = field.parse()?;
    to_json(&filter_by_range(&metrics, field, min, max))
}

/// One page of the metrics history, newest first
#[wasm_bindgen]
pub fn metrics_history_page(metrics_json: &str, page: usize, per_page: usize) -> Result<String, JsValue> {
    into_js(metrics_history_page_impl(metrics_json, page, per_page))
}

fn metrics_history_page_impl(metrics_json: &str, page: usize, per_page: usize) -> Result<String, String> {
    let metrics: Vec<HealthMetricRecord> = from_json(metrics_json, "metrics")?;
    let history = sort_newest_first(metrics);
    to_json(&paginate(&history, Pagination { page, per_page }))
}
