use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use ounibot_core::classify::{classify_message, matching_rule};
use ounibot_db::CatalogStore;

use crate::handlers::GENERAL_INFO_ACTION;
use crate::messages::INFO_FALLBACK_TEMPLATE;
use crate::registry::{ActionContext, ActionError, ActionHandler};
use crate::request::ActionRequest;
use crate::response::ActionResponse;

/// Answers free-text questions about the school from the information table.
pub struct GeneralInfoHandler {
    store: Arc<dyn CatalogStore>,
}

impl GeneralInfoHandler {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for GeneralInfoHandler {
    fn identifier(&self) -> &'static str {
        GENERAL_INFO_ACTION
    }

    async fn handle(
        &self,
        request: &ActionRequest,
        ctx: &ActionContext,
    ) -> Result<ActionResponse, ActionError> {
        let message = request.message_text();
        let query = classify_message(message);
        debug!(
            event_name = "action.general_info.classified",
            correlation_id = %ctx.correlation_id,
            rule = matching_rule(message).map_or("default", |rule| rule.name),
            category = query.category.as_str(),
            "information request classified"
        );

        let entry = self.store.open().await?.find_information(&query).await?;

        Ok(match entry {
            Some(entry) => ActionResponse::message(entry.content),
            None => ActionResponse::template(INFO_FALLBACK_TEMPLATE),
        })
    }
}
