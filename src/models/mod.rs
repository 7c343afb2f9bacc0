//! Core data models for plainsh
//!
//! This module contains the data structures that flow through the
//! interpretation pipeline: the parsed form of a command line, the
//! per-session context every dispatch mutates, and the result handed
//! back to the caller.

pub mod dispatch_result;
pub mod parsed_command;
pub mod session;

// Re-exports for convenience
pub use dispatch_result::DispatchResult;
pub use parsed_command::ParsedCommand;
pub use session::SessionContext;
