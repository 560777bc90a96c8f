//! Dashboard summary derived from the raw record lists
//!
//! Pure composition of the other core modules. The caller supplies `today`
//! so the result depends only on its inputs.

use crate::aggregate::{aggregate, count_by_status, count_risky_meals, GoalStatusCounts, NutritionTotals};
use crate::bmi::{classify_bmi, BmiClassification};
use crate::dates::{time_ago, to_backend_date, Dated, DATE_PLACEHOLDER};
use crate::latest::select_latest;
use crate::models::{AdviceRecord, GoalRecord, HealthMetricRecord, MealRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Latest advice as the dashboard shows it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceSummary {
    pub message: String,
    /// Date part of `createdAt`, or the placeholder
    pub received_on: String,
    pub risk_level: Option<String>,
}

impl From<&AdviceRecord> for AdviceSummary {
    fn from(advice: &AdviceRecord) -> Self {
        let received_on = advice
            .calendar_date()
            .map(crate::dates::to_iso_date)
            .unwrap_or_else(|| DATE_PLACEHOLDER.to_string());
        Self {
            message: advice.message.clone(),
            received_on,
            risk_level: advice.risk_level.clone(),
        }
    }
}

/// Everything the dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub latest_metric: Option<HealthMetricRecord>,
    pub current_weight: Option<f64>,
    pub current_bmi: Option<f64>,
    pub bmi: BmiClassification,
    /// `dd-MM-yyyy` of the latest metric, or the placeholder
    pub last_update: String,
    /// "Today", "3 days ago", ... or the placeholder
    pub last_update_ago: String,
    pub nutrition_today: NutritionTotals,
    pub risky_meals_today: usize,
    pub goals: GoalStatusCounts,
    pub advice: Option<AdviceSummary>,
}

impl DashboardSummary {
    /// Build the summary from freshly fetched lists
    ///
    /// `meals_today` is expected to be already restricted to today's date.
    pub fn derive(
        metrics: &[HealthMetricRecord],
        meals_today: &[MealRecord],
        goals: &[GoalRecord],
        advice: Option<&AdviceRecord>,
        today: NaiveDate,
    ) -> Self {
        let latest = select_latest(metrics);
        let current_bmi = latest.and_then(|m| m.bmi);

        let (last_update, last_update_ago) = match latest.and_then(|m| m.calendar_date()) {
            Some(date) => (to_backend_date(date), time_ago(date, today).to_string()),
            None => (DATE_PLACEHOLDER.to_string(), DATE_PLACEHOLDER.to_string()),
        };

        Self {
            latest_metric: latest.cloned(),
            current_weight: latest.map(|m| m.weight),
            current_bmi,
            bmi: classify_bmi(current_bmi),
            last_update,
            last_update_ago,
            nutrition_today: aggregate(meals_today),
            risky_meals_today: count_risky_meals(meals_today),
            goals: count_by_status(goals),
            advice: advice.map(AdviceSummary::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::BmiCategory;
    use crate::models::{FoodType, GoalStatus};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn metric(id: i64, weight: f64, bmi: f64, date: &str) -> HealthMetricRecord {
        HealthMetricRecord {
            id,
            weight,
            height: 170.0,
            bmi: Some(bmi),
            glucose_level: None,
            blood_pressure: None,
            record_date: date.to_string(),
        }
    }

    fn meal(calories: Option<f64>, apto_diabetico: bool) -> MealRecord {
        MealRecord {
            id: 1,
            name_food: "Arroz".to_string(),
            date: "2024-02-10".to_string(),
            hour: "13:00:00".to_string(),
            food_type: FoodType::Lunch,
            description: None,
            calories,
            protein: Some(10.0),
            carbs: None,
            fats: None,
            apto_diabetico,
            apto_hipertenso: true,
        }
    }

    #[test]
    fn test_full_dashboard() {
        let metrics = vec![
            metric(1, 80.0, 27.7, "2024-01-01"),
            metric(2, 78.0, 27.0, "2024-02-01"),
        ];
        let meals = vec![meal(Some(300.0), true), meal(None, false)];
        let goals = vec![GoalRecord {
            id: 5,
            current_value: Some(78.0),
            target_value: 72.0,
            progress: 40.0,
            deadline: "30-06-2024".to_string(),
            status: GoalStatus::InProgress,
            direction: None,
            goal_type: None,
        }];
        let advice = AdviceRecord {
            id: 1,
            message: "Bebe más agua".to_string(),
            created_at: Some("2024-02-09T18:00:00".to_string()),
            risk_level: None,
        };

        let summary = DashboardSummary::derive(&metrics, &meals, &goals, Some(&advice), ymd(2024, 2, 10));

        assert_eq!(summary.latest_metric.as_ref().map(|m| m.id), Some(2));
        assert_eq!(summary.current_weight, Some(78.0));
        assert_eq!(summary.bmi.category, BmiCategory::Overweight);
        assert_eq!(summary.last_update, "01-02-2024");
        assert_eq!(summary.last_update_ago, "1 week ago");
        assert_eq!(summary.nutrition_today.total_calories, 300.0);
        assert_eq!(summary.nutrition_today.total_protein, 20.0);
        assert_eq!(summary.nutrition_today.count, 2);
        assert_eq!(summary.risky_meals_today, 1);
        assert_eq!(summary.goals.active, 1);
        assert_eq!(summary.advice.unwrap().received_on, "2024-02-09");
    }

    #[test]
    fn test_empty_dashboard() {
        let summary = DashboardSummary::derive(&[], &[], &[], None, ymd(2024, 2, 10));

        assert!(summary.latest_metric.is_none());
        assert_eq!(summary.bmi.category, BmiCategory::Unknown);
        assert_eq!(summary.last_update, DATE_PLACEHOLDER);
        assert_eq!(summary.last_update_ago, DATE_PLACEHOLDER);
        assert_eq!(summary.nutrition_today, NutritionTotals::default());
        assert_eq!(summary.goals, GoalStatusCounts::default());
        assert!(summary.advice.is_none());
    }

    #[test]
    fn test_advice_without_timestamp() {
        let advice = AdviceRecord {
            id: 2,
            message: "Camina 30 minutos".to_string(),
            created_at: None,
            risk_level: Some("BAJO".to_string()),
        };
        let summary = AdviceSummary::from(&advice);
        assert_eq!(summary.received_on, DATE_PLACEHOLDER);
        assert_eq!(summary.risk_level.as_deref(), Some("BAJO"));
    }
}
