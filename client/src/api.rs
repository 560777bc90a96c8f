//! HTTP client for the VitaPrev backend
//!
//! [`HealthApi`] is the seam the services depend on; [`ReqwestHealthApi`]
//! is the reqwest implementation. Collection endpoints answer 404 when the
//! user has no records yet, which is reported as an empty list.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::{default_ttl, Session};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use vitaprev_shared::{
    to_iso_date, AdviceRecord, AuthResponse, FoodType, GoalRecord, GoalRequest, HealthMetricRecord,
    MealRecord, MealRequest, MetricRequest, ProfileUpdate, RecommendationsResponse, SigninRequest,
    SignupRequest, UserProfile,
};

/// Backend operations used by the services
#[async_trait]
pub trait HealthApi: Send + Sync {
    async fn signin(&self, request: &SigninRequest) -> ClientResult<Session>;
    async fn signup(&self, request: &SignupRequest) -> ClientResult<Session>;

    async fn list_goals(&self, session: &Session) -> ClientResult<Vec<GoalRecord>>;
    async fn create_goal(&self, session: &Session, request: &GoalRequest) -> ClientResult<()>;
    async fn delete_goal(&self, session: &Session, id: i64) -> ClientResult<()>;

    async fn list_meals(&self, session: &Session) -> ClientResult<Vec<MealRecord>>;
    async fn list_meals_on(&self, session: &Session, date: NaiveDate) -> ClientResult<Vec<MealRecord>>;
    async fn create_meal(&self, session: &Session, request: &MealRequest) -> ClientResult<()>;
    async fn delete_meal(&self, session: &Session, id: i64) -> ClientResult<()>;

    async fn list_metrics(&self, session: &Session) -> ClientResult<Vec<HealthMetricRecord>>;
    async fn create_metric(&self, session: &Session, request: &MetricRequest) -> ClientResult<()>;
    async fn update_metric(&self, session: &Session, id: i64, request: &MetricRequest) -> ClientResult<()>;

    async fn latest_advice(&self, session: &Session) -> ClientResult<Option<AdviceRecord>>;
    async fn recommendations(
        &self,
        session: &Session,
        food_type: FoodType,
    ) -> ClientResult<RecommendationsResponse>;

    async fn get_profile(&self, session: &Session) -> ClientResult<UserProfile>;
    async fn update_profile(&self, session: &Session, update: &ProfileUpdate) -> ClientResult<()>;
}

/// Client for the VitaPrev REST API using reqwest
#[derive(Clone, Debug)]
pub struct ReqwestHealthApi {
    base_url: String,
    session_ttl: Duration,
    client: reqwest::Client,
}

impl ReqwestHealthApi {
    /// Create a client against `base_url` with a request timeout
    pub fn new(base_url: &str, timeout: std::time::Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_ttl: default_ttl(),
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(&config.api.base_url, config.api.timeout())?.with_session_ttl(config.session.ttl()))
    }

    /// Lifetime given to sessions created by this client
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request carrying the session's bearer token
    ///
    /// Fails without sending anything once the session has expired.
    fn authed(&self, session: &Session, method: Method, path: &str) -> ClientResult<reqwest::RequestBuilder> {
        if session.is_expired_at(Utc::now()) {
            warn!(email = session.email(), "Session expired before request");
            return Err(ClientError::SessionExpired);
        }
        debug!(%method, path, "Backend request");
        Ok(self
            .client
            .request(method, self.url(path))
            .bearer_auth(session.bearer_token()))
    }

    /// Execute a request and decode its JSON body
    async fn execute_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ClientResult<T> {
        let resp = request.send().await?;
        self.handle_response(resp).await
    }

    /// Execute a request; 404 yields `None`
    async fn execute_optional<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<Option<T>> {
        let resp = request.send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            debug!(url = %resp.url(), "Nothing found");
            return Ok(None);
        }
        self.handle_response(resp).await.map(Some)
    }

    /// Execute a collection request; 404 yields an empty list
    async fn execute_list<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ClientResult<Vec<T>> {
        Ok(self.execute_optional(request).await?.unwrap_or_default())
    }

    /// Execute a request with no expected response body
    async fn execute_empty(&self, request: reqwest::RequestBuilder) -> ClientResult<()> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(())
    }

    async fn handle_response<T: DeserializeOwned>(&self, resp: reqwest::Response) -> ClientResult<T> {
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn error_from_response(&self, resp: reqwest::Response) -> ClientError {
        let status = resp.status().as_u16();
        let url = resp.url().to_string();
        let body = resp.text().await.unwrap_or_default();
        let error = ClientError::from_status(status, &body);
        if error.requires_logout() {
            warn!(status, url = %url, "Backend rejected the session");
        } else {
            warn!(status, url = %url, error = %error, "Backend request failed");
        }
        error
    }

    async fn authenticate(&self, path: &str, email: &str, body: &impl serde::Serialize) -> ClientResult<Session> {
        let request = self.client.post(self.url(path)).json(body);
        let auth: AuthResponse = self.execute_json(request).await?;
        info!(email, "Signed in");
        Ok(Session::new(
            email,
            SecretString::new(auth.token),
            self.session_ttl,
            Utc::now(),
        ))
    }
}

#[async_trait]
impl HealthApi for ReqwestHealthApi {
    async fn signin(&self, request: &SigninRequest) -> ClientResult<Session> {
        self.authenticate("/auth/signin", &request.email, request).await
    }

    async fn signup(&self, request: &SignupRequest) -> ClientResult<Session> {
        self.authenticate("/auth/signup", &request.email, request).await
    }

    async fn list_goals(&self, session: &Session) -> ClientResult<Vec<GoalRecord>> {
        self.execute_list(self.authed(session, Method::GET, "/metas")?).await
    }

    async fn create_goal(&self, session: &Session, request: &GoalRequest) -> ClientResult<()> {
        let req = self.authed(session, Method::POST, "/metas")?.json(request);
        self.execute_empty(req).await
    }

    async fn delete_goal(&self, session: &Session, id: i64) -> ClientResult<()> {
        let req = self.authed(session, Method::DELETE, &format!("/metas/{}", id))?;
        self.execute_empty(req).await
    }

    async fn list_meals(&self, session: &Session) -> ClientResult<Vec<MealRecord>> {
        self.execute_list(self.authed(session, Method::GET, "/registro-comida")?).await
    }

    async fn list_meals_on(&self, session: &Session, date: NaiveDate) -> ClientResult<Vec<MealRecord>> {
        let path = format!("/registro-comida/fecha/{}", to_iso_date(date));
        self.execute_list(self.authed(session, Method::GET, &path)?).await
    }

    async fn create_meal(&self, session: &Session, request: &MealRequest) -> ClientResult<()> {
        let req = self.authed(session, Method::POST, "/registro-comida")?.json(request);
        self.execute_empty(req).await
    }

    async fn delete_meal(&self, session: &Session, id: i64) -> ClientResult<()> {
        let req = self.authed(session, Method::DELETE, &format!("/registro-comida/{}", id))?;
        self.execute_empty(req).await
    }

    async fn list_metrics(&self, session: &Session) -> ClientResult<Vec<HealthMetricRecord>> {
        self.execute_list(self.authed(session, Method::GET, "/metricas")?).await
    }

    async fn create_metric(&self, session: &Session, request: &MetricRequest) -> ClientResult<()> {
        let req = self.authed(session, Method::POST, "/metricas")?.json(request);
        self.execute_empty(req).await
    }

    async fn update_metric(&self, session: &Session, id: i64, request: &MetricRequest) -> ClientResult<()> {
        let req = self
            .authed(session, Method::PUT, &format!("/metricas/{}", id))?
            .json(request);
        self.execute_empty(req).await
    }

    async fn latest_advice(&self, session: &Session) -> ClientResult<Option<AdviceRecord>> {
        self.execute_optional(self.authed(session, Method::GET, "/consejos/ultimo")?)
            .await
    }

    async fn recommendations(
        &self,
        session: &Session,
        food_type: FoodType,
    ) -> ClientResult<RecommendationsResponse> {
        let req = self
            .authed(session, Method::GET, "/recomendaciones")?
            .query(&[("tipo", food_type.wire_name())]);
        self.execute_json(req).await
    }

    async fn get_profile(&self, session: &Session) -> ClientResult<UserProfile> {
        self.execute_json(self.authed(session, Method::GET, "/user/me")?).await
    }

    async fn update_profile(&self, session: &Session, update: &ProfileUpdate) -> ClientResult<()> {
        let req = self.authed(session, Method::PATCH, "/user/me")?.json(update);
        self.execute_empty(req).await
    }
}
