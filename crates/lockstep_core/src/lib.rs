//! # lockstep_core
//!
//! The dual-tree synchronization engine.
//!
//! This crate provides:
//! - [`TreeWalker`]: one worker thread per tree, emitting `(node, parent)`
//!   pairs in pre-order under a one-credit handshake
//! - [`classify`]: kind-aware classification of a node pair
//! - [`DivergencePolicy`]: the auto-skip table for type mismatches
//! - [`Synchronizer`]: the orchestrating state machine
//! - [`DecisionSource`]: the arbitration seam; interactive and scripted
//!   implementations plug in behind the same trait
//!
//! ## Example
//!
//! ```rust,ignore
//! use lockstep_core::{CompareConfig, CompareInput, ScriptedDecisions, Synchronizer};
//!
//! let left = lockstep_parser::parse_file("a.js")?;
//! let right = lockstep_parser::parse_file("b.js")?;
//!
//! let sync = Synchronizer::new(
//!     CompareInput::new(left.tree, left.source),
//!     CompareInput::new(right.tree, right.source),
//!     CompareConfig::default(),
//!     ScriptedDecisions::default(),
//! );
//! let report = sync.run()?;
//! println!("{:?} after {} rounds", report.outcome, report.rounds);
//! ```

mod classify;
mod config;
mod error;
mod policy;
pub mod snippet;
mod sync;
mod walk;

pub use classify::{Classification, classify};
pub use config::CompareConfig;
pub use error::SyncError;
pub use policy::{DivergencePolicy, Side};
pub use sync::{
    ArbitrationContext, CompareInput, Decision, DecisionSource, InspectTarget, Outcome,
    ScriptedDecisions, SyncReport, SyncState, Synchronizer,
};
pub use walk::{Emission, TreeWalker};
