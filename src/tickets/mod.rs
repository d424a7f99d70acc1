//! Ticket operations.
//!
//! Each operation is a self-contained task invoked by the host workflow
//! engine with a [`RunContext`](crate::render::RunContext).

mod create;

pub use create::*;
