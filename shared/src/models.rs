//! Domain records as the backend returns them
//!
//! Date fields are kept as the raw wire string and normalized on demand via
//! [`Dated`], so one malformed date never poisons a whole list.

use crate::dates::Dated;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Enumerations
// ============================================================================

/// Meal slot of a food record
///
/// Serialized with the backend's names; the English names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    #[serde(rename = "DESAYUNO", alias = "BREAKFAST")]
    Breakfast,
    #[serde(rename = "ALMUERZO", alias = "LUNCH")]
    Lunch,
    #[serde(rename = "CENA", alias = "DINNER")]
    Dinner,
    #[serde(rename = "SNACK")]
    Snack,
}

impl FoodType {
    pub const ALL: [FoodType; 4] = [
        FoodType::Breakfast,
        FoodType::Lunch,
        FoodType::Dinner,
        FoodType::Snack,
    ];

    /// Identifier used by the backend (path segments, query params)
    pub fn wire_name(&self) -> &'static str {
        match self {
            FoodType::Breakfast => "DESAYUNO",
            FoodType::Lunch => "ALMUERZO",
            FoodType::Dinner => "CENA",
            FoodType::Snack => "SNACK",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            FoodType::Breakfast => "Breakfast",
            FoodType::Lunch => "Lunch",
            FoodType::Dinner => "Dinner",
            FoodType::Snack => "Snack",
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for FoodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DESAYUNO" | "BREAKFAST" => Ok(FoodType::Breakfast),
            "ALMUERZO" | "LUNCH" => Ok(FoodType::Lunch),
            "CENA" | "DINNER" => Ok(FoodType::Dinner),
            "SNACK" => Ok(FoodType::Snack),
            _ => Err(format!("Unknown food type: {}", s)),
        }
    }
}

/// Goal lifecycle status
///
/// Statuses this client does not know deserialize to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    InProgress,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl GoalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::InProgress => "In progress",
            GoalStatus::Completed => "Completed",
            GoalStatus::Failed => "Failed",
            GoalStatus::Unknown => "Unknown",
        }
    }
}

/// Whether a goal aims to raise or lower its metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalDirection {
    #[serde(rename = "AUMENTO", alias = "INCREASE")]
    Increase,
    #[serde(rename = "DISMINUCION", alias = "DECREASE")]
    Decrease,
}

impl FromStr for GoalDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AUMENTO" | "INCREASE" => Ok(GoalDirection::Increase),
            "DISMINUCION" | "DECREASE" => Ok(GoalDirection::Decrease),
            _ => Err(format!("Unknown goal direction: {}", s)),
        }
    }
}

/// Metric a goal tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalType {
    #[serde(rename = "PESO", alias = "WEIGHT")]
    Weight,
    #[serde(rename = "GLUCOSA", alias = "GLUCOSE")]
    Glucose,
    #[serde(rename = "PRESION", alias = "BLOOD_PRESSURE")]
    BloodPressure,
}

impl GoalType {
    pub fn label(&self) -> &'static str {
        match self {
            GoalType::Weight => "Weight",
            GoalType::Glucose => "Glucose",
            GoalType::BloodPressure => "Blood pressure",
        }
    }
}

impl FromStr for GoalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PESO" | "WEIGHT" => Ok(GoalType::Weight),
            "GLUCOSA" | "GLUCOSE" => Ok(GoalType::Glucose),
            "PRESION" | "BLOOD_PRESSURE" => Ok(GoalType::BloodPressure),
            _ => Err(format!("Unknown goal type: {}", s)),
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// Treat an explicit JSON `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One health metrics snapshot (`/metricas`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetricRecord {
    pub id: i64,
    /// Weight in kg
    pub weight: f64,
    /// Height in cm
    pub height: f64,
    /// Server-computed BMI, treated as opaque
    #[serde(default)]
    pub bmi: Option<f64>,
    /// mg/dL
    #[serde(default)]
    pub glucose_level: Option<f64>,
    /// Free text, "systolic/diastolic"
    #[serde(default)]
    pub blood_pressure: Option<String>,
    pub record_date: String,
}

impl Dated for HealthMetricRecord {
    fn raw_date(&self) -> &str {
        &self.record_date
    }
}

/// A logged meal (`/registro-comida`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecord {
    pub id: i64,
    pub name_food: String,
    /// yyyy-MM-dd
    pub date: String,
    /// HH:mm:ss
    #[serde(default, deserialize_with = "null_as_default")]
    pub hour: String,
    pub food_type: FoodType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fats: Option<f64>,
    /// A missing or null flag reads as not suitable
    #[serde(default, deserialize_with = "null_as_default")]
    pub apto_diabetico: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apto_hipertenso: bool,
}

impl MealRecord {
    /// Unsuitable for diabetics or for hypertensives
    pub fn is_risky(&self) -> bool {
        !self.apto_diabetico || !self.apto_hipertenso
    }
}

impl Dated for MealRecord {
    fn raw_date(&self) -> &str {
        &self.date
    }
}

/// A health goal (`/metas`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub id: i64,
    #[serde(default)]
    pub current_value: Option<f64>,
    pub target_value: f64,
    /// Server-computed percentage, 0 when absent
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: f64,
    pub deadline: String,
    pub status: GoalStatus,
    #[serde(default)]
    pub direction: Option<GoalDirection>,
    #[serde(rename = "type", default)]
    pub goal_type: Option<GoalType>,
}

impl GoalRecord {
    /// Only goals still in progress may be deleted
    pub fn is_deletable(&self) -> bool {
        self.status == GoalStatus::InProgress
    }

    /// Progress clamped to 0..=100 for display
    pub fn clamped_progress(&self) -> f64 {
        if self.progress.is_nan() {
            return 0.0;
        }
        self.progress.clamp(0.0, 100.0)
    }
}

impl Dated for GoalRecord {
    fn raw_date(&self) -> &str {
        &self.deadline
    }
}

/// Latest advice from the external advice generator (`/consejos/ultimo`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRecord {
    pub id: i64,
    #[serde(rename = "mensaje", alias = "message")]
    pub message: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "riesgo", alias = "riskLevel", default)]
    pub risk_level: Option<String>,
}

impl Dated for AdviceRecord {
    fn raw_date(&self) -> &str {
        self.created_at.as_deref().unwrap_or_default()
    }
}
