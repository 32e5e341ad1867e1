use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use ounibot_db::CatalogStore;

use crate::handlers::{PROGRAM_INFO_ACTION, PROGRAM_SLOT};
use crate::messages;
use crate::registry::{ActionContext, ActionError, ActionHandler};
use crate::request::{ActionRequest, PROGRAM_ENTITY};
use crate::response::ActionResponse;

/// Describes one program. An exact code match always wins over a name match.
pub struct ProgramInfoHandler {
    store: Arc<dyn CatalogStore>,
}

impl ProgramInfoHandler {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for ProgramInfoHandler {
    fn identifier(&self) -> &'static str {
        PROGRAM_INFO_ACTION
    }

    async fn handle(
        &self,
        request: &ActionRequest,
        ctx: &ActionContext,
    ) -> Result<ActionResponse, ActionError> {
        let Some(query) = request.latest_entity_value(PROGRAM_ENTITY) else {
            return Ok(ActionResponse::message(messages::ask_program()));
        };

        let mut session = self.store.open().await?;
        let program = match session.find_program_by_code(&query).await? {
            Some(program) => Some(program),
            None => session.find_program_by_name(&query).await?,
        };
        drop(session);

        let Some(program) = program else {
            debug!(
                event_name = "action.program_info.not_found",
                correlation_id = %ctx.correlation_id,
                query = %query,
                "no program matched"
            );
            return Ok(ActionResponse::message(messages::program_not_found(&query)));
        };

        info!(
            event_name = "action.program_info.resolved",
            correlation_id = %ctx.correlation_id,
            query = %query,
            code = program.code.as_str(),
            "program resolved"
        );
        Ok(ActionResponse::message(messages::program_details(&program))
            .with_slot(PROGRAM_SLOT, program.code.as_str()))
    }
}
