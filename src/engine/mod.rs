//! Execution engine
//!
//! Mutations against the remote API run through [`orchestrator`], which
//! adds retry and read-back around every create, update and delete.

pub mod orchestrator;
