//! Meal log: daily view, logging and recommendations

use crate::api::HealthApi;
use crate::error::ClientResult;
use crate::session::Session;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use vitaprev_shared::validation::validate_meal_request;
use vitaprev_shared::{
    aggregate, count_risky_meals, filter_by_category, CategoryFilter, FoodType, MealRecord, MealRequest,
    NutritionTotals, RecommendationsResponse,
};

/// Meals of one day with their totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealDay {
    pub date: NaiveDate,
    pub meals: Vec<MealRecord>,
    /// Totals over the shown meals
    pub totals: NutritionTotals,
    /// Meals unsuitable for diabetics or hypertensives
    pub risky: usize,
}

impl MealDay {
    fn from_meals(date: NaiveDate, meals: &[MealRecord], filter: CategoryFilter<FoodType>) -> Self {
        let meals = filter_by_category(meals, filter);
        Self {
            date,
            totals: aggregate(&meals),
            risky: count_risky_meals(&meals),
            meals,
        }
    }
}

/// Meals service
pub struct MealsService;

impl MealsService {
    /// Meals logged on `date`, optionally of one food type
    pub async fn day(
        api: &dyn HealthApi,
        session: &Session,
        date: NaiveDate,
        filter: CategoryFilter<FoodType>,
    ) -> ClientResult<MealDay> {
        let meals = api.list_meals_on(session, date).await?;
        Ok(MealDay::from_meals(date, &meals, filter))
    }

    /// Log a meal and return the refreshed meal list
    pub async fn log(
        api: &dyn HealthApi,
        session: &Session,
        request: &MealRequest,
    ) -> ClientResult<Vec<MealRecord>> {
        validate_meal_request(request)?;
        api.create_meal(session, request).await?;
        info!(name = %request.name_food, food_type = %request.food_type, "Meal logged");
        api.list_meals(session).await
    }

    /// Delete a meal and return the refreshed meal list
    pub async fn delete(api: &dyn HealthApi, session: &Session, id: i64) -> ClientResult<Vec<MealRecord>> {
        api.delete_meal(session, id).await?;
        info!(id, "Meal deleted");
        api.list_meals(session).await
    }

    /// Dishes suggested for a food type
    pub async fn recommendations(
        api: &dyn HealthApi,
        session: &Session,
        food_type: FoodType,
    ) -> ClientResult<RecommendationsResponse> {
        api.recommendations(session, food_type).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(id: i64, food_type: FoodType, calories: Option<f64>, apto_hipertenso: bool) -> MealRecord {
        MealRecord {
            id,
            name_food: format!("meal-{id}"),
            date: "2024-02-10".to_string(),
            hour: "12:00:00".to_string(),
            food_type,
            description: None,
            calories,
            protein: None,
            carbs: None,
            fats: None,
            apto_diabetico: true,
            apto_hipertenso,
        }
    }

    #[test]
    fn test_day_totals_follow_filter() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let meals = vec![
            meal(1, FoodType::Breakfast, Some(300.0), true),
            meal(2, FoodType::Dinner, Some(700.0), false),
        ];

        let all = MealDay::from_meals(date, &meals, CategoryFilter::All);
        assert_eq!(all.totals.total_calories, 1000.0);
        assert_eq!(all.risky, 1);

        let dinner = MealDay::from_meals(date, &meals, CategoryFilter::Only(FoodType::Dinner));
        assert_eq!(dinner.meals.len(), 1);
        assert_eq!(dinner.totals.total_calories, 700.0);
        assert_eq!(dinner.risky, 1);
    }
}
