//! Interactive session over the learned knowledge.
//!
//! This module provides:
//! - Parsing of control commands (`status`, `metrics`, `quit`, ...)
//! - A canned-reply responder that draws on the knowledge summary
//! - The line-oriented session loop

mod command;
mod interactive;
mod responder;

pub use command::Command;
pub use interactive::run_session;
pub use responder::Responder;
