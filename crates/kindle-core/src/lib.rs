//! # kindle-core
//!
//! The acquisition-and-dispatch core of the Kindle provisioning engine.
//!
//! Given a stage name, the [`Engine`] obtains a config document, either from
//! a local cache or by waiting for a remote [`Provider`] to come online and
//! fetching from it, then hands the document to the named [`Stage`].
//!
//! ```text
//! Engine ──► acquire_config ──► cache::read ──hit──► Config
//!                 │ miss
//!                 ▼
//!          wait_for_provider ──► Provider::fetch_config ──► cache::write
//! ```
//!
//! ## Boundaries
//!
//! - Config schema beyond `version` belongs to stages.
//! - Concrete providers and stages are injected by the caller.
//! - Logging goes through [`Logger`], which emits `tracing` events.

// =============================================================================
// MODULES
// =============================================================================

pub mod acquire;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod logger;
pub mod primitives;
pub mod provider;
pub mod stage;
pub mod waiter;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use acquire::{acquire_config, fetch_config};
pub use config::Config;
pub use engine::{Engine, EngineConfig};
pub use error::KindleError;
pub use logger::{LogRecord, Logger, PrefixGuard, Severity};
pub use provider::Provider;
pub use stage::{Stage, StageFactory, StageRegistry};
pub use waiter::wait_for_provider;
