//! Action endpoints called by the dialogue engine.
//!
//! - `POST /webhook` runs the action named in `next_action`
//! - `GET  /actions` lists the registered action identifiers

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use ounibot_actions::{ActionContext, ActionRegistry, ActionRequest, ActionResponse};
use serde::Serialize;
use tracing::info;

#[derive(Clone)]
pub struct WebhookState {
    registry: Arc<ActionRegistry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub name: &'static str,
}

pub fn router(registry: Arc<ActionRegistry>) -> Router {
    Router::new()
        .route("/webhook", post(run_action))
        .route("/actions", get(list_actions))
        .with_state(WebhookState { registry })
}

pub async fn run_action(
    State(state): State<WebhookState>,
    Json(request): Json<ActionRequest>,
) -> Json<ActionResponse> {
    let ctx = ActionContext::for_request(&request);
    info!(
        event_name = "action.dispatch.received",
        correlation_id = %ctx.correlation_id,
        action = %request.next_action,
        intent = request
            .tracker
            .latest_message
            .intent
            .as_ref()
            .and_then(|intent| intent.name.as_deref())
            .unwrap_or("unknown"),
        "action call received"
    );

    Json(state.registry.dispatch(&request, &ctx).await)
}

pub async fn list_actions(State(state): State<WebhookState>) -> Json<Vec<ActionDescriptor>> {
    Json(state.registry.identifiers().into_iter().map(|name| ActionDescriptor { name }).collect())
}
