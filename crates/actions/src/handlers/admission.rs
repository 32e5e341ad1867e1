use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use ounibot_core::admission::{parse_rank, AdmissionOutlook};
use ounibot_db::CatalogStore;

use crate::handlers::ADMISSION_CHANCES_ACTION;
use crate::messages;
use crate::registry::{ActionContext, ActionError, ActionHandler};
use crate::request::{ActionRequest, PROGRAM_ENTITY, RANK_ENTITY};
use crate::response::ActionResponse;

/// Estimates admission chances from the entrance-exam rank. The store is only
/// touched to name the targeted program.
pub struct AdmissionChancesHandler {
    store: Arc<dyn CatalogStore>,
}

impl AdmissionChancesHandler {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActionHandler for AdmissionChancesHandler {
    fn identifier(&self) -> &'static str {
        ADMISSION_CHANCES_ACTION
    }

    async fn handle(
        &self,
        request: &ActionRequest,
        ctx: &ActionContext,
    ) -> Result<ActionResponse, ActionError> {
        let Some(raw_rank) = request
            .latest_entity_value(RANK_ENTITY)
            .filter(|_| !request.latest_entity_is_zero(RANK_ENTITY))
        else {
            return Ok(ActionResponse::message(messages::ask_rank()));
        };
        let rank = match parse_rank(&raw_rank) {
            Ok(rank) => rank,
            Err(error) => {
                debug!(
                    event_name = "action.admission.invalid_rank",
                    correlation_id = %ctx.correlation_id,
                    error = %error,
                    "rank rejected"
                );
                return Ok(ActionResponse::message(messages::invalid_rank()));
            }
        };
        let outlook = AdmissionOutlook::for_rank(rank);

        let program_name = match request.latest_entity_value(PROGRAM_ENTITY) {
            Some(code) => self
                .store
                .open()
                .await?
                .find_program_by_code(&code)
                .await?
                .map(|program| program.name),
            None => None,
        };

        Ok(ActionResponse::message(messages::admission_evaluation(
            rank,
            outlook,
            program_name.as_deref(),
        )))
    }
}
