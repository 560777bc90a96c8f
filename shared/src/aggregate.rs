//! Sums and counts over meal and goal lists

use crate::models::{GoalRecord, GoalStatus, MealRecord};
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Nutrient totals over a set of meals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
    pub count: usize,
}

impl NutritionTotals {
    /// Field-wise sum of two partial results
    pub fn combine(self, other: Self) -> Self {
        Self {
            total_calories: self.total_calories + other.total_calories,
            total_protein: self.total_protein + other.total_protein,
            total_carbs: self.total_carbs + other.total_carbs,
            total_fats: self.total_fats + other.total_fats,
            count: self.count + other.count,
        }
    }
}

impl Add for NutritionTotals {
    type Output = NutritionTotals;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

/// Sum nutrients over `meals`; a missing value counts as 0
pub fn aggregate(meals: &[MealRecord]) -> NutritionTotals {
    meals.iter().fold(NutritionTotals::default(), |acc, meal| NutritionTotals {
        total_calories: acc.total_calories + meal.calories.unwrap_or(0.0),
        total_protein: acc.total_protein + meal.protein.unwrap_or(0.0),
        total_carbs: acc.total_carbs + meal.carbs.unwrap_or(0.0),
        total_fats: acc.total_fats + meal.fats.unwrap_or(0.0),
        count: acc.count + 1,
    })
}

/// Goals per status bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalStatusCounts {
    pub active: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Partition goals by status; unknown statuses are not counted
pub fn count_by_status(goals: &[GoalRecord]) -> GoalStatusCounts {
    goals
        .iter()
        .fold(GoalStatusCounts::default(), |mut counts, goal| {
            match goal.status {
                GoalStatus::InProgress => counts.active += 1,
                GoalStatus::Completed => counts.completed += 1,
                GoalStatus::Failed => counts.failed += 1,
                GoalStatus::Unknown => {}
            }
            counts
        })
}

/// Meals flagged unsuitable for diabetics or hypertensives
pub fn count_risky_meals(meals: &[MealRecord]) -> usize {
    meals.iter().filter(|m| m.is_risky()).count()
}
