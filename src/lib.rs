//! # userdesk
//!
//! Schema-driven CRUD front-end for a remote user collection.
//!
//! A declarative [`schema::FieldSchema`] drives the form inputs, validation,
//! and the table/card projections. The [`orchestrator::Orchestrator`] owns
//! the client-side record mirror, the notification queue and the modal state,
//! and talks to the remote collection through a [`gateway::RecordGateway`].
//!
//! ## Crate layout
//!
//! - **Engine** (compiles for native and `wasm32`): `schema`, `form`,
//!   `record`, `store`, `notify`, `table`, `orchestrator`, `gateway`, `clock`
//! - **Native front-end** (`client` feature, on by default): the reqwest
//!   gateway, layered settings and the command-line interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use userdesk::clock::SystemClock;
//! use userdesk::gateway::HttpGateway;
//! use userdesk::orchestrator::Orchestrator;
//! use userdesk::schema::user_schema;
//!
//! #[tokio::main]
//! async fn main() {
//!     let gateway = HttpGateway::new("http://localhost:9000/users");
//!     let mut app = Orchestrator::new(user_schema(), Arc::new(SystemClock));
//!     app.load(&gateway).await;
//!     print!("{}", app.table().render_text());
//! }
//! ```

pub mod clock;
pub mod error;
pub mod form;
pub mod gateway;
pub mod notify;
pub mod orchestrator;
pub mod record;
pub mod schema;
pub mod store;
pub mod table;

#[cfg(feature = "client")]
pub mod cli;
#[cfg(feature = "client")]
pub mod config;

pub use error::{FailureCause, GatewayError, RecordError, SchemaError};
pub use record::{Record, RecordDraft, RecordId};
