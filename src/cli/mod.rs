//! Terminal front end for the chat widget.

pub mod command;
pub mod prompts;
pub mod renderer;
pub mod repl;
