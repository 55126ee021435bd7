use reqwest::{Client, Url};

use crate::{
    error::AuthError,
    info,
    server::CallbackListener,
    types::{AccessToken, AuthState, CallbackOutcome, TokenResponse},
    utils, warning,
};

/// Permissions requested from the user.
pub const AUTH_SCOPE: &str = "playlist-modify,playlist-modify-private";

/// State of one authorization-code handshake.
///
/// Created once per run and owned by the caller; the callback listener only
/// talks to it through a one-shot channel, so nothing here is shared.
#[derive(Debug)]
pub struct AuthSession {
    client_id: String,
    client_secret: String,
    redirect_base: String,
    port: u16,
    authorization_code: Option<String>,
    access_token: Option<AccessToken>,
    state: AuthState,
}

impl AuthSession {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_base: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_base: redirect_base.into().trim_end_matches('/').to_string(),
            port,
            authorization_code: None,
            access_token: None,
            state: AuthState::Waiting,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn authorization_code(&self) -> Option<&str> {
        self.authorization_code.as_deref()
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// `{redirect_base}:{port}`, the URI registered with the application.
    pub fn redirect_uri(&self) -> String {
        format!("{}:{}", self.redirect_base, self.port)
    }

    /// URL the user opens in the browser to grant access.
    pub fn authorization_url(&self, auth_server_base: &str) -> Result<Url, AuthError> {
        let redirect_uri = self.redirect_uri();
        Url::parse_with_params(
            &format!("{}/authorize", auth_server_base.trim_end_matches('/')),
            &[
                ("client_id", self.client_id.as_str()),
                ("scope", AUTH_SCOPE),
                ("redirect_uri", redirect_uri.as_str()),
                ("response_type", "code"),
            ],
        )
        .map_err(|e| AuthError::InvalidUrl(e.to_string()))
    }

    /// Starts the callback listener on the redirect host and port.
    ///
    /// With port 0 the system picks a free port and the redirect URI follows it.
    pub async fn listen(&mut self) -> Result<CallbackListener, AuthError> {
        let host = utils::listener_host(&self.redirect_base);
        let listener = CallbackListener::bind(&host, self.port).await?;
        self.port = listener.port();
        Ok(listener)
    }

    /// Blocks until the browser is redirected back, then stops the listener.
    ///
    /// An `error` parameter on the redirect ends the handshake right away.
    pub async fn await_code(&mut self, listener: CallbackListener) -> Result<String, AuthError> {
        match listener.wait().await {
            Ok(CallbackOutcome::Code(code)) => {
                self.authorization_code = Some(code.clone());
                self.state = AuthState::CodeReceived;
                Ok(code)
            }
            Ok(CallbackOutcome::Error(reason)) => {
                self.state = AuthState::Failed;
                Err(AuthError::Denied(reason))
            }
            Err(e) => {
                self.state = AuthState::Failed;
                Err(e)
            }
        }
    }

    /// Trades the received code for an access token at
    /// `POST {auth_server_base}/api/token`.
    pub async fn exchange_code(&mut self, auth_server_base: &str) -> Result<AccessToken, AuthError> {
        let Some(code) = self.authorization_code.clone() else {
            self.state = AuthState::Failed;
            return Err(AuthError::TokenExchange(
                "no authorization code received".to_string(),
            ));
        };

        match self.request_token(auth_server_base, &code).await {
            Ok(token) => {
                self.access_token = Some(token.clone());
                self.state = AuthState::TokenAcquired;
                Ok(token)
            }
            Err(e) => {
                self.state = AuthState::Failed;
                Err(e)
            }
        }
    }

    async fn request_token(
        &self,
        auth_server_base: &str,
        code: &str,
    ) -> Result<AccessToken, AuthError> {
        let redirect_uri = self.redirect_uri();
        let res = Client::new()
            .post(format!(
                "{}/api/token",
                auth_server_base.trim_end_matches('/')
            ))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        let json: TokenResponse = serde_json::from_str(&body).map_err(|_| {
            AuthError::TokenExchange(format!("unexpected response ({}): {}", status, body))
        })?;

        match json.access_token {
            Some(access_token) => Ok(AccessToken {
                access_token,
                token_type: json.token_type.unwrap_or_else(|| "Bearer".to_string()),
                scope: json.scope.unwrap_or_default(),
                expires_in: json.expires_in.unwrap_or(3600),
                obtained_at: chrono::Utc::now().timestamp() as u64,
            }),
            None => {
                let reason = match (json.error, json.error_description) {
                    (Some(error), Some(description)) => format!("{}: {}", error, description),
                    (Some(error), None) => error,
                    (None, _) => format!("no access token in response ({})", status),
                };
                Err(AuthError::TokenExchange(reason))
            }
        }
    }

    /// Runs the whole handshake: listen, send the user to the browser, wait
    /// for the code, exchange it.
    pub async fn authorize(
        &mut self,
        auth_server_base: &str,
        open_browser: bool,
    ) -> Result<AccessToken, AuthError> {
        let listener = self.listen().await?;
        info!("Local server started on {}", listener.local_addr());

        let auth_url = self.authorization_url(auth_server_base)?;
        info!("Use this link to request access code:\n{}", auth_url);
        if open_browser && webbrowser::open(auth_url.as_str()).is_err() {
            warning!("Failed to open browser. Please navigate to the link above manually.");
        }

        info!("Waiting for code...");
        self.await_code(listener).await?;

        info!("Requesting access token...");
        self.exchange_code(auth_server_base).await
    }
}

/// Convenience wrapper running a fresh [`AuthSession`] to completion.
pub async fn authorize(
    client_id: &str,
    client_secret: &str,
    redirect_base: &str,
    port: u16,
    auth_server_base: &str,
) -> Result<AccessToken, AuthError> {
    AuthSession::new(client_id, client_secret, redirect_base, port)
        .authorize(auth_server_base, true)
        .await
}
