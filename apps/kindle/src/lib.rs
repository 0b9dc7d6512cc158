//! # Kindle
//!
//! Boot-time provisioning binary built on `kindle-core`.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 apps/kindle (THE BINARY)                 │
//! │                                                          │
//! │  ┌───────────┐   ┌────────────┐   ┌──────────────────┐   │
//! │  │   CLI     │   │ Providers  │   │     Stages       │   │
//! │  │ (clap +   │   │ (file,     │   │    (files)       │   │
//! │  │  toml)    │   │  noop)     │   │                  │   │
//! │  └─────┬─────┘   └─────┬──────┘   └────────┬─────────┘   │
//! │        └───────────────┼───────────────────┘             │
//! │                        ▼                                 │
//! │                ┌───────────────┐                         │
//! │                │  kindle-core  │                         │
//! │                │ (THE ENGINE)  │                         │
//! │                └───────────────┘                         │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod providers;
pub mod settings;
pub mod stages;
