use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, warn};

use ounibot_core::errors::ApplicationError;
use ounibot_db::{CatalogStore, RepositoryError};

use crate::handlers::{
    AdmissionChancesHandler, FallbackHandler, GeneralInfoHandler, ProgramInfoHandler,
    ProgramListingHandler, StaticReplyHandler, SyllabusHandler, FALLBACK_ACTION,
};
use crate::messages;
use crate::request::ActionRequest;
use crate::response::ActionResponse;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionContext {
    pub correlation_id: String,
}

impl ActionContext {
    pub fn for_request(request: &ActionRequest) -> Self {
        Self { correlation_id: request.correlation_id().to_owned() }
    }
}

impl Default for ActionContext {
    fn default() -> Self {
        Self { correlation_id: "unknown-correlation-id".to_owned() }
    }
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl From<ActionError> for ApplicationError {
    fn from(value: ActionError) -> Self {
        match value {
            ActionError::Storage(error) => ApplicationError::Persistence(error.to_string()),
        }
    }
}

#[async_trait]
pub trait ActionHandler: Send + Sync {
    fn identifier(&self) -> &'static str;
    async fn handle(
        &self,
        request: &ActionRequest,
        ctx: &ActionContext,
    ) -> Result<ActionResponse, ActionError>;
}

/// Routes an action call to its handler. Unknown identifiers go to the
/// fallback and handler failures become a generic apology with no events.
pub struct ActionRegistry {
    handlers: HashMap<&'static str, Arc<dyn ActionHandler>>,
    fallback: Arc<dyn ActionHandler>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self { handlers: HashMap::new(), fallback: Arc::new(FallbackHandler) }
    }

    pub fn register<H>(&mut self, handler: H)
    where
        H: ActionHandler + 'static,
    {
        let handler: Arc<dyn ActionHandler> = Arc::new(handler);
        if handler.identifier() == FALLBACK_ACTION {
            self.fallback = Arc::clone(&handler);
        }
        self.handlers.insert(handler.identifier(), handler);
    }

    pub async fn dispatch(&self, request: &ActionRequest, ctx: &ActionContext) -> ActionResponse {
        let handler = match self.handlers.get(request.next_action.as_str()) {
            Some(handler) => handler,
            None => {
                warn!(
                    event_name = "action.dispatch.unknown",
                    correlation_id = %ctx.correlation_id,
                    action = %request.next_action,
                    "unknown action; serving fallback"
                );
                &self.fallback
            }
        };

        match handler.handle(request, ctx).await {
            Ok(response) => response,
            Err(failure) => {
                error!(
                    event_name = "action.failed",
                    correlation_id = %ctx.correlation_id,
                    action = handler.identifier(),
                    error = %failure,
                    "action handler failed"
                );
                let interface =
                    ApplicationError::from(failure).into_interface(ctx.correlation_id.clone());
                ActionResponse::message(interface.user_message())
            }
        }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.handlers.contains_key(identifier)
    }

    /// Registered identifiers in ascending order.
    pub fn identifiers(&self) -> Vec<&'static str> {
        let mut identifiers: Vec<&'static str> = self.handlers.keys().copied().collect();
        identifiers.sort_unstable();
        identifiers
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

pub fn default_registry(store: Arc<dyn CatalogStore>) -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    registry.register(ProgramInfoHandler::new(Arc::clone(&store)));
    registry.register(SyllabusHandler::new(Arc::clone(&store)));
    registry.register(GeneralInfoHandler::new(Arc::clone(&store)));
    registry.register(AdmissionChancesHandler::new(Arc::clone(&store)));
    registry.register(ProgramListingHandler::new(store));
    registry.register(FallbackHandler);
    registry.register(StaticReplyHandler::new("action_hello_world", messages::hello_world()));
    registry.register(StaticReplyHandler::new("action_which_program", messages::which_program()));
    registry
}
