use async_trait::async_trait;

use crate::handlers::FALLBACK_ACTION;
use crate::messages;
use crate::registry::{ActionContext, ActionError, ActionHandler};
use crate::request::ActionRequest;
use crate::response::ActionResponse;

/// Help message listing what the assistant can answer. Ignores its input.
pub struct FallbackHandler;

#[async_trait]
impl ActionHandler for FallbackHandler {
    fn identifier(&self) -> &'static str {
        FALLBACK_ACTION
    }

    async fn handle(
        &self,
        _request: &ActionRequest,
        _ctx: &ActionContext,
    ) -> Result<ActionResponse, ActionError> {
        Ok(ActionResponse::message(messages::fallback_help()))
    }
}

/// Fixed one-line reply, kept for older dialogue stories.
pub struct StaticReplyHandler {
    identifier: &'static str,
    text: &'static str,
}

impl StaticReplyHandler {
    pub fn new(identifier: &'static str, text: &'static str) -> Self {
        Self { identifier, text }
    }
}

#[async_trait]
impl ActionHandler for StaticReplyHandler {
    fn identifier(&self) -> &'static str {
        self.identifier
    }

    async fn handle(
        &self,
        _request: &ActionRequest,
        _ctx: &ActionContext,
    ) -> Result<ActionResponse, ActionError> {
        Ok(ActionResponse::message(self.text))
    }
}
