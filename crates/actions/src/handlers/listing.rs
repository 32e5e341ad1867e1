use std::sync::Arc;

use async_trait::async_trait;

use ounibot_db::CatalogStore;

use crate::handlers::PROGRAM_LISTING_ACTION;
use crate::messages;
use crate::registry::{ActionContext, ActionError, ActionHandler};
use crate::request::ActionRequest;
use crate::response::ActionResponse;

pub struct ProgramListingHandler {
    store: Arc<dyn CatalogStore>,
}

impl ProgramListingHandler {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for ProgramListingHandler {
    fn identifier(&self) -> &'static str {
        PROGRAM_LISTING_ACTION
    }

    async fn handle(
        &self,
        _request: &ActionRequest,
        _ctx: &ActionContext,
    ) -> Result<ActionResponse, ActionError> {
        let programs = self.store.open().await?.list_programs().await?;

        if programs.is_empty() {
            return Ok(ActionResponse::message(messages::no_programs()));
        }
        Ok(ActionResponse::message(messages::program_listing(&programs)))
    }
}
