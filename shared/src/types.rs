//! API request and response types

use crate::dates::to_backend_date;
use crate::models::{FoodType, GoalDirection, GoalType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Authentication
// ============================================================================

/// Sign-in request (`POST /auth/signin`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token returned by sign-in and sign-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Registration request (`POST /auth/signup`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: String,
    pub genre: String,
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    pub weight: f64,
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height: f64,
    /// dd-MM-yyyy
    pub birth_date: String,
    pub allergies: Option<String>,
    pub diabetic: bool,
    pub hypertensive: bool,
    pub glucose_level: Option<f64>,
    pub blood_pressure: Option<String>,
    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,
}

impl SignupRequest {
    /// Apply the submission rules the backend expects
    ///
    /// Blank allergies become null; glucose is only sent for diabetics and
    /// blood pressure only for hypertensives.
    pub fn normalized(mut self) -> Self {
        self.allergies = self
            .allergies
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        if !self.diabetic {
            self.glucose_level = None;
        }
        self.blood_pressure = if self.hypertensive {
            self.blood_pressure
                .map(|bp| bp.trim().to_string())
                .filter(|bp| !bp.is_empty())
        } else {
            None
        };
        self.email = self.email.trim().to_string();
        self
    }

    /// Set the birth date in the backend's `dd-MM-yyyy` form
    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = to_backend_date(date);
        self
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Profile as returned by `GET /user/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub diabetic: bool,
    #[serde(default)]
    pub hypertensive: bool,
    #[serde(default)]
    pub glucose_level: Option<f64>,
    #[serde(default)]
    pub blood_pressure: Option<String>,
}

/// Partial profile update (`PATCH /user/me`); absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// dd-MM-yyyy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diabetic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypertensive: Option<bool>,
}

// ============================================================================
// Health metrics, meals, goals
// ============================================================================

/// Create or edit a metrics snapshot (`POST /metricas`, `PUT /metricas/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MetricRequest {
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    pub weight: f64,
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height: f64,
    #[validate(range(min = 20.0, max = 600.0, message = "Glucose must be between 20 and 600 mg/dL"))]
    pub glucose_level: Option<f64>,
    pub blood_pressure: Option<String>,
}

/// Log a meal (`POST /registro-comida`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    #[validate(length(min = 1, max = 120, message = "Food name is required"))]
    pub name_food: String,
    pub food_type: FoodType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 0.0, max = 50000.0, message = "Calories must be between 0 and 50000"))]
    pub calories: Option<f64>,
    #[validate(range(min = 0.0, max = 5000.0, message = "Protein cannot be negative"))]
    pub protein: Option<f64>,
    #[validate(range(min = 0.0, max = 5000.0, message = "Carbs cannot be negative"))]
    pub carbs: Option<f64>,
    #[validate(range(min = 0.0, max = 5000.0, message = "Fats cannot be negative"))]
    pub fats: Option<f64>,
}

/// Create a goal (`POST /metas`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    pub current_value: Option<f64>,
    #[validate(range(min = 0.0, message = "Target must be positive"))]
    pub target_value: f64,
    pub direction: GoalDirection,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    /// dd-MM-yyyy
    pub deadline: String,
}

impl GoalRequest {
    pub fn new(
        goal_type: GoalType,
        direction: GoalDirection,
        target_value: f64,
        current_value: Option<f64>,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            current_value,
            target_value,
            direction,
            goal_type,
            deadline: to_backend_date(deadline),
        }
    }
}

// ============================================================================
// Recommendations
// ============================================================================

/// One suggested dish from the recommendation service
///
/// Every field is free text as produced upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecommendation {
    #[serde(default)]
    pub tipo: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub calorias: Option<String>,
    #[serde(default)]
    pub ingredientes: Option<String>,
    #[serde(default)]
    pub categoria_salud: Option<String>,
    #[serde(default)]
    pub condiciones_restringidas: Option<String>,
    #[serde(default)]
    pub apto_diabetico: Option<String>,
    #[serde(default)]
    pub apto_hipertenso: Option<String>,
    #[serde(default)]
    pub apto_intolerante: Option<String>,
}

impl FoodRecommendation {
    pub fn suitable_for_diabetics(&self) -> Option<bool> {
        parse_bool_flag(self.apto_diabetico.as_deref())
    }

    pub fn suitable_for_hypertensives(&self) -> Option<bool> {
        parse_bool_flag(self.apto_hipertenso.as_deref())
    }

    pub fn suitable_for_intolerants(&self) -> Option<bool> {
        parse_bool_flag(self.apto_intolerante.as_deref())
    }
}

/// `GET /recomendaciones?tipo=...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(rename = "vitaAI", default)]
    pub vita_ai: Option<serde_json::Value>,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub cantidad: usize,
    #[serde(default)]
    pub recomendaciones: Vec<FoodRecommendation>,
}

/// Normalize the loose yes/no strings of the recommendation service
///
/// Case-insensitive and trimmed; unknown or empty input is `None`.
pub fn parse_bool_flag(raw: Option<&str>) -> Option<bool> {
    let value = raw?.trim().to_lowercase();
    match value.as_str() {
        "false" | "0" | "no" | "no apto" | "no-apto" | "n" | "falso" => Some(false),
        "true" | "1" | "si" | "sí" | "apto" | "s" | "verdadero" => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn signup() -> SignupRequest {
        SignupRequest {
            name: "Ana".to_string(),
            last_name: "Pérez".to_string(),
            email: " ana@example.com ".to_string(),
            phone: "999888777".to_string(),
            genre: "F".to_string(),
            weight: 62.0,
            height: 165.0,
            birth_date: String::new(),
            allergies: Some("   ".to_string()),
            diabetic: false,
            hypertensive: true,
            glucose_level: Some(110.0),
            blood_pressure: Some(" 130/85 ".to_string()),
            password: "secret-pass".to_string(),
        }
    }

    #[test]
    fn test_signup_normalization() {
        let req = signup()
            .with_birth_date(NaiveDate::from_ymd_opt(1990, 7, 4).unwrap())
            .normalized();
        assert_eq!(req.birth_date, "04-07-1990");
        assert_eq!(req.allergies, None);
        assert_eq!(req.glucose_level, None);
        assert_eq!(req.blood_pressure.as_deref(), Some("130/85"));
        assert_eq!(req.email, "ana@example.com");

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["lastName"], "Pérez");
        assert_eq!(body["glucoseLevel"], serde_json::Value::Null);
    }

    #[test]
    fn test_goal_request_wire_shape() {
        let req = GoalRequest::new(
            GoalType::Weight,
            GoalDirection::Decrease,
            70.0,
            Some(78.0),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        );
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({
                "currentValue": 78.0,
                "targetValue": 70.0,
                "direction": "DISMINUCION",
                "type": "PESO",
                "deadline": "01-03-2025"
            })
        );
    }

    #[test]
    fn test_profile_update_omits_absent_fields() {
        let update = ProfileUpdate {
            weight: Some(70.0),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "weight": 70.0 }));
    }

    #[test]
    fn test_metric_request_range_validation() {
        let req = MetricRequest {
            weight: 10.0,
            height: 170.0,
            glucose_level: None,
            blood_pressure: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_recommendations_response() {
        let res: RecommendationsResponse = serde_json::from_value(json!({
            "vitaAI": {"modelo": "x"},
            "tipo": "CENA",
            "cantidad": 1,
            "recomendaciones": [{
                "tipo": "CENA",
                "nombre": "Sopa de verduras",
                "apto_diabetico": "Sí",
                "apto_hipertenso": "no apto"
            }]
        }))
        .unwrap();

        let dish = &res.recomendaciones[0];
        assert_eq!(dish.suitable_for_diabetics(), Some(true));
        assert_eq!(dish.suitable_for_hypertensives(), Some(false));
        assert_eq!(dish.suitable_for_intolerants(), None);
    }

    #[rstest]
    #[case(Some("FALSE"), Some(false))]
    #[case(Some(" no-apto "), Some(false))]
    #[case(Some("falso"), Some(false))]
    #[case(Some("1"), Some(true))]
    #[case(Some("Verdadero"), Some(true))]
    #[case(Some("S"), Some(true))]
    #[case(Some("quizás"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn test_parse_bool_flag(#[case] raw: Option<&str>, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool_flag(raw), expected);
    }
}
