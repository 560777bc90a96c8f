//! Predicate filters used by the history and meal views
//!
//! Bounds and categories arrive as text typed into a form, so every filter
//! here accepts loose input and falls back to "no constraint" rather than
//! failing.

use crate::dates::Dated;
use crate::models::{FoodType, GoalRecord, GoalType, HealthMetricRecord, MealRecord};
use chrono::NaiveDate;
use std::str::FromStr;

// ============================================================================
// Date filter
// ============================================================================

/// Records whose normalized date equals `target`
pub fn filter_by_date<T: Dated + Clone>(records: &[T], target: NaiveDate) -> Vec<T> {
    records
        .iter()
        .filter(|r| r.calendar_date() == Some(target))
        .cloned()
        .collect()
}

// ============================================================================
// Numeric range filter
// ============================================================================

/// Records exposing numeric fields for range filtering
pub trait NumericFields {
    type Field: Copy;

    fn numeric_value(&self, field: Self::Field) -> Option<f64>;
}

/// Filterable fields of a health metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    Weight,
    Height,
    Bmi,
    GlucoseLevel,
}

impl FromStr for MetricField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weight" | "peso" => Ok(MetricField::Weight),
            "height" | "altura" => Ok(MetricField::Height),
            "bmi" | "imc" => Ok(MetricField::Bmi),
            "glucoselevel" | "glucose" => Ok(MetricField::GlucoseLevel),
            _ => Err(format!("Unknown metric field: {}", s)),
        }
    }
}

impl NumericFields for HealthMetricRecord {
    type Field = MetricField;

    fn numeric_value(&self, field: MetricField) -> Option<f64> {
        match field {
            MetricField::Weight => Some(self.weight),
            MetricField::Height => Some(self.height),
            MetricField::Bmi => self.bmi,
            MetricField::GlucoseLevel => self.glucose_level,
        }
    }
}

/// Filterable nutrient fields of a meal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutrientField {
    Calories,
    Protein,
    Carbs,
    Fats,
}

impl FromStr for NutrientField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calories" => Ok(NutrientField::Calories),
            "protein" => Ok(NutrientField::Protein),
            "carbs" => Ok(NutrientField::Carbs),
            "fats" => Ok(NutrientField::Fats),
            _ => Err(format!("Unknown nutrient field: {}", s)),
        }
    }
}

impl NumericFields for MealRecord {
    type Field = NutrientField;

    fn numeric_value(&self, field: NutrientField) -> Option<f64> {
        match field {
            NutrientField::Calories => self.calories,
            NutrientField::Protein => self.protein,
            NutrientField::Carbs => self.carbs,
            NutrientField::Fats => self.fats,
        }
    }
}

/// Inclusive numeric range after clamping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

fn parse_bound(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}

impl ValueRange {
    /// Build the effective range from user-entered bounds
    ///
    /// Missing min is 0 and a given min is floored at 0. Missing max is
    /// unbounded; a max below min is raised to min.
    pub fn from_inputs(min: Option<&str>, max: Option<&str>) -> Self {
        let min = parse_bound(min).map(|v| v.max(0.0)).unwrap_or(0.0);
        let max = parse_bound(max)
            .map(|v| v.max(min))
            .unwrap_or(f64::INFINITY);
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Records whose `field` lies within the clamped `[min, max]`
///
/// Records with no value for `field` are dropped.
pub fn filter_by_range<T: NumericFields + Clone>(
    records: &[T],
    field: T::Field,
    min: Option<&str>,
    max: Option<&str>,
) -> Vec<T> {
    let range = ValueRange::from_inputs(min, max);
    records
        .iter()
        .filter(|r| r.numeric_value(field).is_some_and(|v| range.contains(v)))
        .cloned()
        .collect()
}

// ============================================================================
// Category filter
// ============================================================================

/// Either every category or exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter<C> {
    All,
    Only(C),
}

impl<C> Default for CategoryFilter<C> {
    fn default() -> Self {
        CategoryFilter::All
    }
}

impl<C: FromStr<Err = String>> FromStr for CategoryFilter<C> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "" | "ALL" | "TODOS" => Ok(CategoryFilter::All),
            _ => C::from_str(s).map(CategoryFilter::Only),
        }
    }
}

/// Records carrying a type/category tag
pub trait Categorized {
    type Category: Copy + PartialEq;

    fn category(&self) -> Option<Self::Category>;
}

impl Categorized for MealRecord {
    type Category = FoodType;

    fn category(&self) -> Option<FoodType> {
        Some(self.food_type)
    }
}

impl Categorized for GoalRecord {
    type Category = GoalType;

    fn category(&self) -> Option<GoalType> {
        self.goal_type
    }
}

/// Records matching `filter`; `All` returns the input as is
pub fn filter_by_category<T: Categorized + Clone>(
    records: &[T],
    filter: CategoryFilter<T::Category>,
) -> Vec<T> {
    match filter {
        CategoryFilter::All => records.to_vec(),
        CategoryFilter::Only(wanted) => records
            .iter()
            .filter(|r| r.category() == Some(wanted))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GoalStatus;
    use proptest::prelude::*;
    use rstest::rstest;

    fn metric(id: i64, weight: f64, date: &str) -> HealthMetricRecord {
        HealthMetricRecord {
            id,
            weight,
            height: 170.0,
            bmi: None,
            glucose_level: if id % 2 == 0 { Some(95.0) } else { None },
            blood_pressure: None,
            record_date: date.to_string(),
        }
    }

    fn meal(id: i64, food_type: FoodType) -> MealRecord {
        MealRecord {
            id,
            name_food: format!("meal {}", id),
            date: "2024-01-01".to_string(),
            hour: "12:00:00".to_string(),
            food_type,
            description: None,
            calories: Some(100.0 * id as f64),
            protein: None,
            carbs: None,
            fats: None,
            apto_diabetico: true,
            apto_hipertenso: true,
        }
    }

    fn weights() -> Vec<HealthMetricRecord> {
        vec![
            metric(1, 60.0, "2024-01-01"),
            metric(2, 65.5, "2024-01-02"),
            metric(3, 70.0, "2024-01-03"),
            metric(4, 82.0, "2024-01-04"),
        ]
    }

    fn ids<T, F: Fn(&T) -> i64>(records: &[T], id: F) -> Vec<i64> {
        records.iter().map(id).collect()
    }

    #[test]
    fn test_filter_by_date_normalizes_encodings() {
        let records = vec![
            metric(1, 60.0, "2024-01-05"),
            metric(2, 61.0, "05-01-2024"),
            metric(3, 62.0, "2024-01-06"),
            metric(4, 63.0, "bad"),
        ];
        let target = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let found = filter_by_date(&records, target);
        assert_eq!(ids(&found, |m| m.id), vec![1, 2]);
    }

    #[test]
    fn test_range_clamps_max_up_to_min() {
        let found = filter_by_range(&weights(), MetricField::Weight, Some("70"), Some("60"));
        assert_eq!(ids(&found, |m| m.id), vec![3]);
    }

    #[rstest]
    #[case(None, None, vec![1, 2, 3, 4])]
    #[case(Some(""), Some("  "), vec![1, 2, 3, 4])]
    #[case(Some("65"), None, vec![2, 3, 4])]
    #[case(None, Some("70"), vec![1, 2, 3])]
    #[case(Some("-20"), Some("60"), vec![1])]
    #[case(Some("abc"), Some("65.5"), vec![1, 2])]
    #[case(Some("60"), Some("70"), vec![1, 2, 3])]
    fn test_range_bounds(
        #[case] min: Option<&str>,
        #[case] max: Option<&str>,
        #[case] expected: Vec<i64>,
    ) {
        let found = filter_by_range(&weights(), MetricField::Weight, min, max);
        assert_eq!(ids(&found, |m| m.id), expected);
    }

    #[test]
    fn test_range_drops_missing_values() {
        let found = filter_by_range(&weights(), MetricField::GlucoseLevel, None, None);
        assert_eq!(ids(&found, |m| m.id), vec![2, 4]);
    }

    #[test]
    fn test_range_on_meal_nutrients() {
        let meals = vec![meal(1, FoodType::Lunch), meal(3, FoodType::Dinner)];
        let found = filter_by_range(&meals, NutrientField::Calories, Some("200"), None);
        assert_eq!(ids(&found, |m| m.id), vec![3]);
    }

    #[test]
    fn test_effective_range() {
        assert_eq!(
            ValueRange::from_inputs(Some("70"), Some("60")),
            ValueRange { min: 70.0, max: 70.0 }
        );
        assert_eq!(ValueRange::from_inputs(None, None).max, f64::INFINITY);
    }

    #[test]
    fn test_category_only() {
        let meals = vec![
            meal(1, FoodType::Breakfast),
            meal(2, FoodType::Snack),
            meal(3, FoodType::Breakfast),
        ];
        let found = filter_by_category(&meals, CategoryFilter::Only(FoodType::Breakfast));
        assert_eq!(ids(&found, |m| m.id), vec![1, 3]);
    }

    #[test]
    fn test_category_on_goals_skips_untyped() {
        let goal = |id: i64, goal_type: Option<GoalType>| GoalRecord {
            id,
            current_value: None,
            target_value: 1.0,
            progress: 0.0,
            deadline: "2024-01-01".to_string(),
            status: GoalStatus::InProgress,
            direction: None,
            goal_type,
        };
        let goals = vec![goal(1, Some(GoalType::Weight)), goal(2, None)];
        let found = filter_by_category(&goals, CategoryFilter::Only(GoalType::Weight));
        assert_eq!(ids(&found, |g| g.id), vec![1]);
        assert_eq!(filter_by_category(&goals, CategoryFilter::All).len(), 2);
    }

    #[rstest]
    #[case("TODOS", CategoryFilter::All)]
    #[case("all", CategoryFilter::All)]
    #[case("CENA", CategoryFilter::Only(FoodType::Dinner))]
    #[case("breakfast", CategoryFilter::Only(FoodType::Breakfast))]
    fn test_category_filter_parsing(#[case] raw: &str, #[case] expected: CategoryFilter<FoodType>) {
        assert_eq!(raw.parse::<CategoryFilter<FoodType>>().unwrap(), expected);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: the ALL sentinel is the identity
        #[test]
        fn prop_all_is_identity(kinds in prop::collection::vec(0usize..4, 0..20)) {
            let meals: Vec<MealRecord> = kinds
                .iter()
                .enumerate()
                .map(|(i, k)| meal(i as i64, FoodType::ALL[*k]))
                .collect();
            prop_assert_eq!(filter_by_category(&meals, CategoryFilter::All), meals);
        }

        /// Property: every kept record lies within the effective range
        #[test]
        fn prop_range_respected(
            values in prop::collection::vec(0.0f64..300.0, 0..20),
            min in 0.0f64..200.0,
            max in 0.0f64..200.0
        ) {
            let records: Vec<HealthMetricRecord> = values
                .iter()
                .enumerate()
                .map(|(i, w)| metric(i as i64, *w, "2024-01-01"))
                .collect();
            let (min_s, max_s) = (min.to_string(), max.to_string());
            let kept = filter_by_range(&records, MetricField::Weight, Some(&min_s), Some(&max_s));
            let effective_max = max.max(min);
            for r in &kept {
                prop_assert!(r.weight >= min && r.weight <= effective_max);
            }
            let expected = records.iter().filter(|r| r.weight >= min && r.weight <= effective_max).count();
            prop_assert_eq!(kept.len(), expected);
        }
    }
}
