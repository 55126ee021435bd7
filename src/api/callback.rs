use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, http::StatusCode, response::Html};
use tokio::sync::{Mutex, oneshot};

use crate::{info, types::CallbackOutcome, warning};

/// One-shot slot the callback route hands its outcome through. It is emptied
/// by the first request carrying `code` or `error`.
pub type CallbackSlot = Arc<Mutex<Option<oneshot::Sender<CallbackOutcome>>>>;

const CODE_RECEIVED_PAGE: &str = "<h2>Got the code.</h2><p>Return back to your program.</p>";
const CODE_NOT_FOUND_PAGE: &str = "<h4>Not found authorization code. Try again.</h4>";

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(slot): Extension<CallbackSlot>,
) -> (StatusCode, Html<&'static str>) {
    if let Some(code) = params.get("code") {
        info!("Authorization code received.");
        deliver(&slot, CallbackOutcome::Code(code.clone())).await;
        return (StatusCode::OK, Html(CODE_RECEIVED_PAGE));
    }

    if let Some(error) = params.get("error") {
        warning!("Authorization code not found ({}).", error);
        deliver(&slot, CallbackOutcome::Error(error.clone())).await;
    }

    (StatusCode::NOT_FOUND, Html(CODE_NOT_FOUND_PAGE))
}

async fn deliver(slot: &CallbackSlot, outcome: CallbackOutcome) {
    let mut lock = slot.lock().await;
    if let Some(tx) = lock.take() {
        // the receiver is gone only when the handshake was already abandoned
        let _ = tx.send(outcome);
    }
}
