//! Support Chat - customer-support chat widget engine
//!
//! A scripted menu dialogue over a decision tree, with a conversational
//! assistant fallback revealed character by character, a simulated hand-off
//! to a human operator, and a post-chat evaluation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
