use std::sync::Arc;

use async_trait::async_trait;

use ounibot_db::CatalogStore;

use crate::handlers::{PROGRAM_SLOT, SYLLABUS_ACTION};
use crate::messages;
use crate::registry::{ActionContext, ActionError, ActionHandler};
use crate::request::{ActionRequest, PROGRAM_ENTITY};
use crate::response::ActionResponse;

pub struct SyllabusHandler {
    store: Arc<dyn CatalogStore>,
}

impl SyllabusHandler {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for SyllabusHandler {
    fn identifier(&self) -> &'static str {
        SYLLABUS_ACTION
    }

    async fn handle(
        &self,
        request: &ActionRequest,
        _ctx: &ActionContext,
    ) -> Result<ActionResponse, ActionError> {
        // The slot remembers the program from earlier turns and wins over a new mention.
        let code = request
            .slot_text(PROGRAM_SLOT)
            .or_else(|| request.latest_entity_value(PROGRAM_ENTITY));
        let Some(code) = code else {
            return Ok(ActionResponse::message(messages::ask_syllabus_program()));
        };

        let link = self.store.open().await?.find_syllabus(&code).await?;

        Ok(match link {
            Some(link) => ActionResponse::message(messages::syllabus_details(&link)),
            None => ActionResponse::message(messages::syllabus_unavailable(&code)),
        })
    }
}
