// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::config::CliConf;
use crate::shared::error::{AzError, Result};
use backon::{BackoffBuilder, ConstantBuilder};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

const TERMINAL_FAILURE_STATES: [&str; 2] = ["Failed", "Canceled"];

/// Thin Azure Resource Manager client: bearer auth, JSON bodies and
/// provisioning-state polling for long-running operations.
#[derive(Clone)]
pub struct ArmClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
    subscription_id: String,
    poll_interval: Duration,
    poll_max_attempts: usize,
}

impl ArmClient {
    pub fn new(conf: &CliConf) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("azext/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: conf.arm_endpoint.trim_end_matches('/').to_string(),
            token: conf.access_token()?.to_string(),
            subscription_id: conf.subscription_id()?.to_string(),
            poll_interval: conf.poll_interval(),
            poll_max_attempts: conf.poll_max_attempts,
        })
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn subscription_path(&self) -> String {
        format!("/subscriptions/{}", self.subscription_id)
    }

    pub fn resource_group_path(&self, resource_group: &str) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}",
            self.subscription_id, resource_group
        )
    }

    fn url(&self, path: &str, api_version: &str) -> String {
        let separator = if path.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}api-version={}",
            self.endpoint, path, separator, api_version
        )
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        api_version: &str,
        body: Option<Value>,
    ) -> Result<Value> {
        debug!(method = method.as_str(), path, api_version, "ARM request");

        let mut request = self
            .http
            .request(method, self.url(path, api_version))
            .bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(AzError::not_found(
                error_message(&text).unwrap_or_else(|| path.to_string()),
            ));
        }
        if !status.is_success() {
            return Err(AzError::response(
                status.as_u16(),
                error_message(&text).unwrap_or(text),
            ));
        }

        if text.trim().is_empty() {
            Ok(Value::Null)
        } else {
            Ok(serde_json::from_str(&text)?)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, api_version: &str) -> Result<T> {
        let value = self.send(Method::GET, path, api_version, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn put<B, T>(&self, path: &str, api_version: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let value = self.send(Method::PUT, path, api_version, Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, api_version: &str) -> Result<T> {
        let value = self
            .send(Method::POST, path, api_version, Some(Value::Object(Default::default())))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete(&self, path: &str, api_version: &str) -> Result<()> {
        self.send(Method::DELETE, path, api_version, None).await?;
        Ok(())
    }

    /// PUT the resource, then poll it until provisioning completes.
    pub async fn put_and_wait<B, T>(&self, path: &str, api_version: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let _: Value = self.put(path, api_version, body).await?;
        self.wait_for_provisioning(path, api_version).await
    }

    /// PATCH the resource, then poll it until provisioning completes.
    pub async fn patch_and_wait<B, T>(&self, path: &str, api_version: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::PATCH, path, api_version, Some(body)).await?;
        self.wait_for_provisioning(path, api_version).await
    }

    /// DELETE the resource, then poll until it is gone.
    pub async fn delete_and_wait(&self, path: &str, api_version: &str) -> Result<()> {
        self.delete(path, api_version).await?;

        let mut backoff = self.poll_backoff();
        loop {
            match self.get::<Value>(path, api_version).await {
                Err(e) if e.is_not_found() => return Ok(()),
                Err(e) => return Err(e),
                Ok(_) => {}
            }

            match backoff.next() {
                Some(delay) => sleep(delay).await,
                None => {
                    return Err(AzError::Timeout(format!(
                        "{} was not deleted after {} polls",
                        path, self.poll_max_attempts
                    )))
                }
            }
        }
    }

    /// Poll a resource at a fixed interval until its provisioning state is terminal.
    pub async fn wait_for_provisioning<T: DeserializeOwned>(
        &self,
        path: &str,
        api_version: &str,
    ) -> Result<T> {
        let mut backoff = self.poll_backoff();
        loop {
            let value: Value = self.get(path, api_version).await?;
            let state = provisioning_state(&value).map(str::to_string);
            match state.as_deref() {
                None => return Ok(serde_json::from_value(value)?),
                Some(state) if state.eq_ignore_ascii_case("Succeeded") => {
                    return Ok(serde_json::from_value(value)?)
                }
                Some(state)
                    if TERMINAL_FAILURE_STATES
                        .iter()
                        .any(|s| state.eq_ignore_ascii_case(s)) =>
                {
                    return Err(AzError::response(
                        200,
                        format!("Provisioning of {} ended in state '{}'", path, state),
                    ));
                }
                Some(state) => {
                    info!(path, state, "waiting for provisioning to complete");
                }
            }

            match backoff.next() {
                Some(delay) => sleep(delay).await,
                None => {
                    return Err(AzError::Timeout(format!(
                        "{} did not finish provisioning after {} polls",
                        path, self.poll_max_attempts
                    )))
                }
            }
        }
    }

    /// Delays between status polls; the first poll happens without one.
    fn poll_backoff(&self) -> impl Iterator<Item = Duration> {
        ConstantBuilder::default()
            .with_delay(self.poll_interval)
            .with_max_times(self.poll_max_attempts.saturating_sub(1))
            .build()
    }
}

pub fn provisioning_state(value: &Value) -> Option<&str> {
    value
        .pointer("/properties/provisioningState")
        .and_then(Value::as_str)
}

/// Extract `code: message` from an ARM error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    let message = error.get("message").and_then(Value::as_str)?;
    match error.get("code").and_then(Value::as_str) {
        Some(code) => Some(format!("{}: {}", code, message)),
        None => Some(message.to_string()),
    }
}
