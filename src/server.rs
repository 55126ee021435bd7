use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot},
    task::JoinHandle,
};

use crate::{
    api::{self, CallbackSlot},
    error::AuthError,
    types::CallbackOutcome,
    warning,
};

/// Local HTTP listener accepting the single OAuth redirect.
///
/// The listener runs on its own task; [`CallbackListener::wait`] blocks the
/// caller until the redirect arrives and then shuts the listener down.
pub struct CallbackListener {
    local_addr: SocketAddr,
    outcome: oneshot::Receiver<CallbackOutcome>,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl CallbackListener {
    /// Binds `host:port` and starts serving. Port 0 picks a free port.
    pub async fn bind(host: &str, port: u16) -> Result<Self, AuthError> {
        let (outcome_tx, outcome) = oneshot::channel();
        let slot: CallbackSlot = Arc::new(Mutex::new(Some(outcome_tx)));

        let app = Router::new()
            .route("/", get(api::callback).layer(Extension(slot)))
            .route("/health", get(api::health));

        let bind_err = |source: std::io::Error| AuthError::Bind {
            addr: format!("{}:{}", host, port),
            source,
        };
        let listener = TcpListener::bind((host, port)).await.map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(Self {
            local_addr,
            outcome,
            shutdown,
            handle,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Waits for the redirect (or Ctrl-C), then stops the listener.
    ///
    /// There is no timeout: the user may take as long as they like in the
    /// browser.
    pub async fn wait(self) -> Result<CallbackOutcome, AuthError> {
        let CallbackListener {
            outcome,
            shutdown,
            handle,
            ..
        } = self;

        let result = tokio::select! {
            received = outcome => received.map_err(|_| AuthError::ListenerClosed),
            _ = tokio::signal::ctrl_c() => Err(AuthError::Interrupted),
        };

        let _ = shutdown.send(());
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warning!("Callback listener stopped with error: {}", e),
            Err(e) => warning!("Callback listener task failed: {}", e),
        }

        result
    }
}
