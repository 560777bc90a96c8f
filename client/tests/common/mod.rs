//! Common test utilities for integration tests
//!
//! Provides a wiremock-backed client, session helpers and an in-memory
//! [`HealthApi`] for service tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::sync::Mutex;
use vitaprev_client::api::{HealthApi, ReqwestHealthApi};
use vitaprev_client::error::{ClientError, ClientResult};
use vitaprev_client::session::Session;
use vitaprev_shared::{
    AdviceRecord, FoodType, GoalRecord, GoalRequest, GoalStatus, HealthMetricRecord, MealRecord,
    MealRequest, MetricRequest, ProfileUpdate, RecommendationsResponse, SigninRequest, SignupRequest,
    UserProfile,
};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token";

/// Client pointed at a mock server
pub fn api_for(server: &MockServer) -> ReqwestHealthApi {
    ReqwestHealthApi::new(&server.uri(), std::time::Duration::from_secs(5)).unwrap()
}

pub fn active_session() -> Session {
    Session::new(
        "ana@vitaprev.app",
        SecretString::new(TEST_TOKEN.to_string()),
        Duration::minutes(15),
        Utc::now(),
    )
}

pub fn expired_session() -> Session {
    Session::new(
        "ana@vitaprev.app",
        SecretString::new(TEST_TOKEN.to_string()),
        Duration::minutes(15),
        Utc::now() - Duration::minutes(20),
    )
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn metric_json(id: i64, weight: f64, bmi: f64, date: &str) -> Value {
    json!({
        "id": id,
        "weight": weight,
        "height": 170.0,
        "bmi": bmi,
        "glucoseLevel": null,
        "bloodPressure": null,
        "recordDate": date
    })
}

pub fn meal_json(id: i64, food_type: &str, calories: Option<f64>, apto_diabetico: bool) -> Value {
    json!({
        "id": id,
        "nameFood": format!("meal-{}", id),
        "date": "2024-02-10",
        "hour": "13:00:00",
        "foodType": food_type,
        "description": null,
        "calories": calories,
        "protein": 10.0,
        "carbs": null,
        "fats": null,
        "aptoDiabetico": apto_diabetico,
        "aptoHipertenso": true
    })
}

pub fn goal_json(id: i64, status: &str, goal_type: &str) -> Value {
    json!({
        "id": id,
        "currentValue": 80.0,
        "targetValue": 72.0,
        "progress": 35.0,
        "deadline": "30-06-2024",
        "status": status,
        "direction": "DISMINUCION",
        "type": goal_type
    })
}

pub fn metric(id: i64, weight: f64, bmi: f64, date: &str) -> HealthMetricRecord {
    serde_json::from_value(metric_json(id, weight, bmi, date)).unwrap()
}

pub fn meal(id: i64, food_type: &str, calories: Option<f64>, apto_diabetico: bool) -> MealRecord {
    serde_json::from_value(meal_json(id, food_type, calories, apto_diabetico)).unwrap()
}

pub fn goal(id: i64, status: &str, goal_type: &str) -> GoalRecord {
    serde_json::from_value(goal_json(id, status, goal_type)).unwrap()
}

// ============================================================================
// In-memory backend
// ============================================================================

/// Backend double that keeps records in memory and logs every call
#[derive(Default)]
pub struct FakeHealthApi {
    pub metrics: Mutex<Vec<HealthMetricRecord>>,
    pub meals: Mutex<Vec<MealRecord>>,
    pub goals: Mutex<Vec<GoalRecord>>,
    pub advice: Mutex<Option<AdviceRecord>>,
    pub profile: Mutex<Option<UserProfile>>,
    pub calls: Mutex<Vec<String>>,
    /// Every authenticated call fails with 401 when set
    pub reject_token: bool,
}

impl FakeHealthApi {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, session: &Session, call: &str) -> ClientResult<()> {
        self.record(call);
        if session.is_expired() {
            return Err(ClientError::SessionExpired);
        }
        if self.reject_token {
            return Err(ClientError::Unauthorized("invalid token".to_string()));
        }
        Ok(())
    }

    fn next_id<T>(items: &[T], id: impl Fn(&T) -> i64) -> i64 {
        items.iter().map(id).max().unwrap_or(0) + 1
    }
}

#[async_trait]
impl HealthApi for FakeHealthApi {
    async fn signin(&self, request: &SigninRequest) -> ClientResult<Session> {
        self.record("signin");
        Ok(Session::new(
            request.email.clone(),
            SecretString::new(TEST_TOKEN.to_string()),
            Duration::minutes(15),
            Utc::now(),
        ))
    }

    async fn signup(&self, request: &SignupRequest) -> ClientResult<Session> {
        self.record(format!("signup:{}", serde_json::to_string(request).unwrap()));
        Ok(Session::new(
            request.email.clone(),
            SecretString::new(TEST_TOKEN.to_string()),
            Duration::minutes(15),
            Utc::now(),
        ))
    }

    async fn list_goals(&self, session: &Session) -> ClientResult<Vec<GoalRecord>> {
        self.check(session, "list_goals")?;
        Ok(self.goals.lock().unwrap().clone())
    }

    async fn create_goal(&self, session: &Session, request: &GoalRequest) -> ClientResult<()> {
        self.check(session, "create_goal")?;
        let mut goals = self.goals.lock().unwrap();
        let id = Self::next_id(&goals, |g| g.id);
        goals.push(GoalRecord {
            id,
            current_value: request.current_value,
            target_value: request.target_value,
            progress: 0.0,
            deadline: request.deadline.clone(),
            status: GoalStatus::InProgress,
            direction: Some(request.direction),
            goal_type: Some(request.goal_type),
        });
        Ok(())
    }

    async fn delete_goal(&self, session: &Session, id: i64) -> ClientResult<()> {
        self.check(session, &format!("delete_goal:{}", id))?;
        self.goals.lock().unwrap().retain(|g| g.id != id);
        Ok(())
    }

    async fn list_meals(&self, session: &Session) -> ClientResult<Vec<MealRecord>> {
        self.check(session, "list_meals")?;
        Ok(self.meals.lock().unwrap().clone())
    }

    async fn list_meals_on(&self, session: &Session, date: NaiveDate) -> ClientResult<Vec<MealRecord>> {
        self.check(session, &format!("list_meals_on:{}", date))?;
        Ok(vitaprev_shared::filter_by_date(&self.meals.lock().unwrap(), date))
    }

    async fn create_meal(&self, session: &Session, request: &MealRequest) -> ClientResult<()> {
        self.check(session, "create_meal")?;
        let mut meals = self.meals.lock().unwrap();
        let id = Self::next_id(&meals, |m| m.id);
        meals.push(MealRecord {
            id,
            name_food: request.name_food.clone(),
            date: "2024-02-10".to_string(),
            hour: "12:00:00".to_string(),
            food_type: request.food_type,
            description: request.description.clone(),
            calories: request.calories,
            protein: request.protein,
            carbs: request.carbs,
            fats: request.fats,
            apto_diabetico: true,
            apto_hipertenso: true,
        });
        Ok(())
    }

    async fn delete_meal(&self, session: &Session, id: i64) -> ClientResult<()> {
        self.check(session, &format!("delete_meal:{}", id))?;
        self.meals.lock().unwrap().retain(|m| m.id != id);
        Ok(())
    }

    async fn list_metrics(&self, session: &Session) -> ClientResult<Vec<HealthMetricRecord>> {
        self.check(session, "list_metrics")?;
        Ok(self.metrics.lock().unwrap().clone())
    }

    async fn create_metric(&self, session: &Session, request: &MetricRequest) -> ClientResult<()> {
        self.check(session, "create_metric")?;
        let mut metrics = self.metrics.lock().unwrap();
        let id = Self::next_id(&metrics, |m| m.id);
        metrics.push(HealthMetricRecord {
            id,
            weight: request.weight,
            height: request.height,
            bmi: vitaprev_shared::calculate_bmi(request.weight, request.height),
            glucose_level: request.glucose_level,
            blood_pressure: request.blood_pressure.clone(),
            record_date: "2024-02-10".to_string(),
        });
        Ok(())
    }

    async fn update_metric(&self, session: &Session, id: i64, request: &MetricRequest) -> ClientResult<()> {
        self.check(session, &format!("update_metric:{}", id))?;
        let mut metrics = self.metrics.lock().unwrap();
        let metric = metrics
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ClientError::Api {
                status: 404,
                message: "not found".to_string(),
            })?;
        metric.weight = request.weight;
        metric.height = request.height;
        Ok(())
    }

    async fn latest_advice(&self, session: &Session) -> ClientResult<Option<AdviceRecord>> {
        self.check(session, "latest_advice")?;
        Ok(self.advice.lock().unwrap().clone())
    }

    async fn recommendations(
        &self,
        session: &Session,
        food_type: FoodType,
    ) -> ClientResult<RecommendationsResponse> {
        self.check(session, &format!("recommendations:{}", food_type.wire_name()))?;
        Ok(RecommendationsResponse {
            vita_ai: None,
            tipo: food_type.wire_name().to_string(),
            cantidad: 0,
            recomendaciones: Vec::new(),
        })
    }

    async fn get_profile(&self, session: &Session) -> ClientResult<UserProfile> {
        self.check(session, "get_profile")?;
        self.profile.lock().unwrap().clone().ok_or_else(|| ClientError::Api {
            status: 404,
            message: "no profile".to_string(),
        })
    }

    async fn update_profile(&self, session: &Session, update: &ProfileUpdate) -> ClientResult<()> {
        self.check(session, "update_profile")?;
        let mut profile = self.profile.lock().unwrap();
        if let Some(p) = profile.as_mut() {
            if let Some(name) = &update.name {
                p.name = name.clone();
            }
            if update.weight.is_some() {
                p.weight = update.weight;
            }
        }
        Ok(())
    }
}
