//! Input validation functions
//!
//! Field checks return `Result<(), String>`; the submission-level checks wrap
//! them into [`ValidationError`] with the field name attached. Range and
//! format rules declared on the request types run through the `validator`
//! derive first.

use crate::errors::ValidationError;
use crate::types::{GoalRequest, MealRequest, MetricRequest, ProfileUpdate, SigninRequest, SignupRequest};
use chrono::NaiveDate;
use regex_lite::Regex;
use std::sync::OnceLock;
use validator::Validate;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn blood_pressure_regex() -> &'static Regex {
    static BP: OnceLock<Regex> = OnceLock::new();
    BP.get_or_init(|| Regex::new(r"^\s*(\d{2,3})\s*/\s*(\d{2,3})\s*$").expect("valid blood pressure regex"))
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email_regex().is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate a glucose reading (mg/dL)
pub fn validate_glucose(mg_dl: f64) -> Result<(), String> {
    if mg_dl.is_nan() || mg_dl.is_infinite() {
        return Err("Glucose must be a valid number".to_string());
    }
    if !(20.0..=600.0).contains(&mg_dl) {
        return Err("Glucose must be between 20 and 600 mg/dL".to_string());
    }
    Ok(())
}

/// Validate a "systolic/diastolic" blood pressure reading
pub fn validate_blood_pressure(raw: &str) -> Result<(), String> {
    let caps = blood_pressure_regex()
        .captures(raw)
        .ok_or_else(|| "Blood pressure must look like 120/80".to_string())?;

    let systolic: u32 = caps[1].parse().map_err(|_| "Invalid systolic value".to_string())?;
    let diastolic: u32 = caps[2].parse().map_err(|_| "Invalid diastolic value".to_string())?;
    if systolic <= diastolic {
        return Err("Systolic must be higher than diastolic".to_string());
    }
    Ok(())
}

/// Validate a goal deadline against today's date
pub fn validate_deadline(deadline: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if deadline < today {
        return Err("Deadline cannot be in the past".to_string());
    }
    Ok(())
}

// ============================================================================
// Submission checks
// ============================================================================

fn check(field: &str, result: Result<(), String>) -> Result<(), ValidationError> {
    result.map_err(|message| ValidationError::field(field, message))
}

/// Validate a sign-in form
pub fn validate_signin(req: &SigninRequest) -> Result<(), ValidationError> {
    req.validate()?;
    check("email", validate_email(req.email.trim()))
}

/// Validate a registration form, including the password confirmation
pub fn validate_signup(req: &SignupRequest, confirm_password: &str) -> Result<(), ValidationError> {
    if req.password != confirm_password {
        return Err(ValidationError::field("confirmPassword", "Passwords do not match"));
    }
    if req.birth_date.trim().is_empty() {
        return Err(ValidationError::field("birthDate", "Birth date is required"));
    }
    if crate::dates::parse_date(&req.birth_date).is_err() {
        return Err(ValidationError::field("birthDate", "Birth date must be dd-MM-yyyy"));
    }
    if req.diabetic && req.glucose_level.is_none() {
        return Err(ValidationError::field(
            "glucoseLevel",
            "Enter your latest glucose reading",
        ));
    }
    let pressure = req.blood_pressure.as_deref().map(str::trim).unwrap_or_default();
    if req.hypertensive && pressure.is_empty() {
        return Err(ValidationError::field(
            "bloodPressure",
            "Enter your latest blood pressure reading",
        ));
    }

    req.validate()?;
    check("email", validate_email(req.email.trim()))?;
    check("password", validate_password(&req.password))?;
    if let Some(glucose) = req.glucose_level.filter(|_| req.diabetic) {
        check("glucoseLevel", validate_glucose(glucose))?;
    }
    if req.hypertensive {
        check("bloodPressure", validate_blood_pressure(pressure))?;
    }
    Ok(())
}

/// Validate a metrics snapshot before create/edit
pub fn validate_metric_request(req: &MetricRequest) -> Result<(), ValidationError> {
    req.validate()?;
    check("weight", validate_weight(req.weight))?;
    check("height", validate_height_cm(req.height))?;
    if let Some(bp) = req.blood_pressure.as_deref() {
        check("bloodPressure", validate_blood_pressure(bp))?;
    }
    Ok(())
}

/// Validate a meal before it is logged
pub fn validate_meal_request(req: &MealRequest) -> Result<(), ValidationError> {
    if req.name_food.trim().is_empty() {
        return Err(ValidationError::field("nameFood", "Food name is required"));
    }
    req.validate()?;
    Ok(())
}

/// Validate a new goal
pub fn validate_goal_request(req: &GoalRequest, today: NaiveDate) -> Result<(), ValidationError> {
    req.validate()?;
    if req.target_value <= 0.0 {
        return Err(ValidationError::field("targetValue", "Target must be positive"));
    }
    let deadline = crate::dates::parse_date(&req.deadline)
        .map_err(|e| ValidationError::field("deadline", e.to_string()))?;
    check("deadline", validate_deadline(deadline, today))
}

/// Validate a partial profile update
pub fn validate_profile_update(update: &ProfileUpdate) -> Result<(), ValidationError> {
    update.validate()?;
    if let Some(raw) = update.birth_date.as_deref() {
        crate::dates::parse_date(raw)
            .map_err(|_| ValidationError::field("birthDate", "Birth date must be dd-MM-yyyy"))?;
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map wire field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "email" => "Email",
        "password" => "Password",
        "confirmPassword" => "Password Confirmation",
        "name" => "Name",
        "lastName" | "last_name" => "Last Name",
        "weight" => "Weight",
        "height" => "Height",
        "birthDate" | "birth_date" => "Birth Date",
        "glucoseLevel" | "glucose_level" => "Glucose Level",
        "bloodPressure" | "blood_pressure" => "Blood Pressure",
        "nameFood" | "name_food" => "Food Name",
        "calories" => "Calories",
        "protein" => "Protein",
        "carbs" => "Carbohydrates",
        "fats" => "Fats",
        "targetValue" | "target_value" => "Target Value",
        "deadline" => "Deadline",
        _ => field_name,
    }
}
