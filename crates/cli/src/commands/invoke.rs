use std::sync::Arc;

use clap::Args;
use ounibot_actions::{default_registry, ActionContext, ActionRequest};
use ounibot_core::config::{AppConfig, LoadOptions};
use ounibot_db::{connect_lazy_with_settings, SqlCatalogStore};

use crate::commands::CommandResult;

#[derive(Debug, Clone, Default, Args)]
pub struct InvokeArgs {
    #[arg(help = "Action identifier, e.g. action_info_filiere")]
    pub action: String,
    #[arg(long = "entity", value_name = "NAME=VALUE", help = "Entity of the latest message")]
    pub entities: Vec<String>,
    #[arg(long = "slot", value_name = "NAME=VALUE", help = "Tracker slot value")]
    pub slots: Vec<String>,
    #[arg(long, help = "Text of the latest message")]
    pub text: Option<String>,
    #[arg(long, default_value = "ounibot-cli", help = "Conversation id used in logs")]
    pub sender: String,
}

pub fn run(args: InvokeArgs) -> CommandResult {
    let request = match build_request(&args) {
        Ok(request) => request,
        Err(message) => return CommandResult::failure("invoke", "invalid_argument", message, 2),
    };

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "invoke",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "invoke",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_lazy_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        let registry = default_registry(Arc::new(SqlCatalogStore::new(pool.clone())));
        let response = registry.dispatch(&request, &ActionContext::for_request(&request)).await;
        pool.close().await;
        Ok::<_, (&'static str, String, u8)>(response)
    });

    match result {
        Ok(response) => match serde_json::to_string_pretty(&response) {
            Ok(output) => CommandResult { exit_code: 0, output },
            Err(error) => CommandResult::failure("invoke", "serialization", error.to_string(), 5),
        },
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("invoke", error_class, message, exit_code)
        }
    }
}

fn build_request(args: &InvokeArgs) -> Result<ActionRequest, String> {
    let mut request = ActionRequest::new(args.action.trim()).with_sender(args.sender.clone());
    if let Some(text) = &args.text {
        request = request.with_text(text.clone());
    }
    for raw in &args.entities {
        let (name, value) = split_assignment("--entity", raw)?;
        request = request.with_entity(name, value);
    }
    for raw in &args.slots {
        let (name, value) = split_assignment("--slot", raw)?;
        request = request.with_slot(name, value);
    }
    Ok(request)
}

fn split_assignment<'a>(flag: &str, raw: &'a str) -> Result<(&'a str, &'a str), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(format!("{flag} expects NAME=VALUE, got `{raw}`")),
    }
}
