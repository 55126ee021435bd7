use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::{Error, Res},
    types::{AccessToken, CurrentUserResponse},
};

/// Bearer-authenticated client for the Spotify Web API.
///
/// Every call is a single request; nothing is retried or paginated.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: AccessToken,
}

impl SpotifyClient {
    /// `api_url` is the API root without the version segment, e.g.
    /// `https://api.spotify.com`.
    pub fn new(api_url: impl Into<String>, token: AccessToken) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Absolute URL of a `/v1` endpoint.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/v1{}", self.api_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Res<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(self.token.as_str())
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::data(format!("GET {}: {}", url, e)))
    }

    pub(crate) async fn post_json<B, T>(&self, url: &str, payload: &B) -> Res<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .bearer_auth(self.token.as_str())
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::data(format!("POST {}: {}", url, e)))
    }

    /// Id of the account the token belongs to (`GET /v1/me`).
    pub async fn current_user_id(&self) -> Res<String> {
        let me: CurrentUserResponse = self.get_json(&self.endpoint("/me")).await?;
        Ok(me.id)
    }
}
