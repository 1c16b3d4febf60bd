// HTTP client for the login/signup backend

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use super::session::User;
use super::validation::{LoginForm, SignupForm};
use crate::config::constants::REQUEST_TIMEOUT_SECS;
use crate::errors::AuthError;

const GENERIC_ERROR: &str = "An error occurred. Please try again.";
const SIGNUP_ERROR: &str = "An error occurred during sign-up. Please try again.";

#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    server_url: String,
}

impl AuthClient {
    pub fn new(server_url: impl Into<String>) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AuthError::AuthFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            server_url: server_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `POST /user/login`. A 401 carries the server's message.
    pub async fn login(&self, form: &LoginForm) -> Result<User, AuthError> {
        form.validate()?;

        let (status, body) = self
            .post(
                "user/login",
                json!({ "email": form.email, "password": form.password }),
            )
            .await?;

        if status.is_success() {
            let username = body
                .get("username")
                .and_then(Value::as_str)
                .ok_or_else(|| AuthError::AuthFailed(GENERIC_ERROR.to_string()))?;
            tracing::info!("Signed in as {}", username);
            return Ok(User {
                username: username.to_string(),
                email: form.email.clone(),
            });
        }

        if status == StatusCode::UNAUTHORIZED {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Invalid email or password");
            return Err(AuthError::AuthRejected(message.to_string()));
        }

        tracing::warn!("Login failed with status {}", status);
        Err(AuthError::AuthFailed(GENERIC_ERROR.to_string()))
    }

    /// `POST /user/signup`. Any non-success status is a rejection.
    pub async fn signup(&self, form: &SignupForm) -> Result<User, AuthError> {
        form.validate()?;

        let (status, _body) = self
            .post(
                "user/signup",
                json!({
                    "username": form.username,
                    "password": form.password,
                    "email": form.email,
                }),
            )
            .await?;

        if !status.is_success() {
            tracing::warn!("Signup failed with status {}", status);
            return Err(AuthError::AuthRejected(SIGNUP_ERROR.to_string()));
        }

        tracing::info!("Signed up as {}", form.username);
        Ok(User {
            username: form.username.clone(),
            email: form.email.clone(),
        })
    }

    async fn post(&self, endpoint: &str, body: Value) -> Result<(StatusCode, Value), AuthError> {
        let url = format!("{}/{}", self.server_url, endpoint);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Auth request to {} failed: {}", url, e);
                AuthError::AuthFailed(GENERIC_ERROR.to_string())
            })?;

        let status = response.status();
        // Error bodies are not always JSON
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        Ok((status, body))
    }
}
