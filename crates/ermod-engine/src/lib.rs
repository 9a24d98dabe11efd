//! # ermod-engine
//!
//! Editing session layer over the `ermod-core` commit boundary.
//!
//! A `Session` owns the current model state and an event-log history: every
//! settled commit unit's change log is pushed onto the undo stack, and
//! undo/redo replay those logs (inverted or forward) through the same commit
//! boundary as live edits.

pub mod session;

pub use session::{CommitReceipt, Session, SessionError};
