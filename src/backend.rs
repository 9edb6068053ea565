use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::identity::UserProfile;

/// Payload of a successful credential exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    pub user: UserProfile,
    pub token: String,
}

/// One-shot HTTP collaborator for the TechVisit backend. No retries and no
/// token refresh; a rejected credential is surfaced so the caller can run
/// the logout transition.
#[derive(Clone)]
pub struct AuthClient {
    base: Url,
    client: reqwest::Client,
    token: Option<String>,
}

impl AuthClient {
    pub fn new(base: &str) -> AppResult<Self> {
        let base = Url::parse(base).map_err(|e| AppError::Internal {
            code: "invalid_base_url".into(),
            message: e.to_string(),
        })?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self { base, client, token: None })
    }

    /// Bearer credential attached to authorized calls. `None` sends them
    /// unauthenticated, which the backend answers with 401.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// POST /auth/login. 401/403 comes back as a credential rejection, any
    /// other failure as a server error carrying the backend's message field
    /// when the body has one.
    pub async fn login(&self, login: &str, password: &str) -> AppResult<LoginReply> {
        let url = self.join("/auth/login")?;
        let resp = self
            .client
            .post(url)
            .json(&serde_json::json!({"login": login, "password": password}))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        let reply = resp.json::<LoginReply>().await?;
        Ok(reply)
    }

    /// PUT /user/update-password. Callers gate on `is_strong_password`
    /// first; the backend applies its own checks regardless.
    pub async fn update_password(&self, login: &str, new_password: &str) -> AppResult<()> {
        self.put(
            "/user/update-password",
            &serde_json::json!({"login": login, "password": new_password}),
        )
        .await
        .map(|_| ())
    }

    pub async fn get(&self, path: &str) -> AppResult<serde_json::Value> {
        let url = self.join(path)?;
        let resp = self.authorized(self.client.get(url)).send().await?;
        Self::reply(resp).await
    }

    pub async fn post(&self, path: &str, body: &serde_json::Value) -> AppResult<serde_json::Value> {
        let url = self.join(path)?;
        let resp = self.authorized(self.client.post(url)).json(body).send().await?;
        Self::reply(resp).await
    }

    pub async fn put(&self, path: &str, body: &serde_json::Value) -> AppResult<serde_json::Value> {
        let url = self.join(path)?;
        let resp = self.authorized(self.client.put(url)).json(body).send().await?;
        Self::reply(resp).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<serde_json::Value> {
        let url = self.join(path)?;
        let resp = self.authorized(self.client.delete(url)).send().await?;
        Self::reply(resp).await
    }

    fn join(&self, path: &str) -> AppResult<Url> {
        self.base.join(path).map_err(|e| AppError::Internal {
            code: "invalid_path".into(),
            message: e.to_string(),
        })
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    async fn reply(resp: reqwest::Response) -> AppResult<serde_json::Value> {
        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        // empty bodies (204 and friends) read as null
        let val = resp
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);
        Ok(val)
    }

    // carries only the backend's message field; an empty message lets
    // user_message() fall back to the generic product wording
    async fn reject(resp: reqwest::Response) -> AppError {
        let status = resp.status();
        let body: serde_json::Value = resp.json().await.unwrap_or(serde_json::json!({}));
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("")
            .to_string();
        tracing::debug!(target: "techvisit::backend", "request rejected: HTTP {status}, message='{message}'");
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            AppError::Auth { code: "credentials_rejected".into(), message }
        } else {
            AppError::Http { code: "server_error".into(), message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparsable_base_url() {
        assert!(AuthClient::new("not a url").is_err());
    }

    #[test]
    fn keeps_base_url() {
        let c = AuthClient::new("http://localhost:8080").unwrap();
        assert_eq!(c.base().as_str(), "http://localhost:8080/");
    }
}
