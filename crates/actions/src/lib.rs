//! Custom actions for the ENSPD assistant.
//!
//! The dialogue engine decides which action runs next and calls the action
//! server with the conversation tracker. This crate holds everything between
//! that request and the reply:
//! - **Request** (`request`) - tracker payload and entity/slot accessors
//! - **Response** (`response`) - messages and slot events sent back
//! - **Messages** (`messages`) - French reply templates
//! - **Handlers** (`handlers`) - one handler per action identifier
//! - **Registry** (`registry`) - identifier lookup, fallback, error boundary
//!
//! # Architecture
//!
//! ```text
//! POST /webhook → ActionRegistry → ActionHandler → CatalogStore (SQLite)
//!                      ↓
//!               ActionResponse { events, responses }
//! ```

pub mod handlers;
pub mod messages;
pub mod registry;
pub mod request;
pub mod response;

pub use registry::{
    default_registry, ActionContext, ActionError, ActionHandler, ActionRegistry,
};
pub use request::{ActionRequest, Entity, LatestMessage, Tracker};
pub use response::{ActionResponse, OutboundMessage, TrackerEvent};
