//! BMI calculation and classification
//!
//! Bands are half-open with the lower bound inclusive, so the boundary values
//! 18.5, 25 and 30 belong to the upper band.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BMI band shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    /// No value, or a value that is not a number
    Unknown,
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// BMI range covered by this band, `None` for `Unknown`
    pub fn range(&self) -> Option<(f64, f64)> {
        match self {
            BmiCategory::Unknown => None,
            BmiCategory::Underweight => Some((f64::NEG_INFINITY, 18.5)),
            BmiCategory::Healthy => Some((18.5, 25.0)),
            BmiCategory::Overweight => Some((25.0, 30.0)),
            BmiCategory::Obese => Some((30.0, f64::INFINITY)),
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Unknown => "No data",
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Healthy => "Healthy",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of classifying a BMI value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BmiClassification {
    pub label: String,
    pub category: BmiCategory,
}

impl From<BmiCategory> for BmiClassification {
    fn from(category: BmiCategory) -> Self {
        Self {
            label: category.label().to_string(),
            category,
        }
    }
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)². Returns `None` for a non-positive
/// or non-finite height.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

/// Map a BMI value to its band
pub fn bmi_category(bmi: Option<f64>) -> BmiCategory {
    match bmi {
        None => BmiCategory::Unknown,
        Some(b) if b.is_nan() => BmiCategory::Unknown,
        Some(b) if b < 18.5 => BmiCategory::Underweight,
        Some(b) if b < 25.0 => BmiCategory::Healthy,
        Some(b) if b < 30.0 => BmiCategory::Overweight,
        Some(_) => BmiCategory::Obese,
    }
}

/// Classify a BMI value, never failing
pub fn classify_bmi(bmi: Option<f64>) -> BmiClassification {
    bmi_category(bmi).into()
}

/// Classify BMI typed as free text; anything non-numeric is `Unknown`
pub fn classify_bmi_text(raw: &str) -> BmiClassification {
    classify_bmi(raw.trim().parse::<f64>().ok())
}
