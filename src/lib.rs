//! Math Kidz site service: contact intake and the auto-reply chat widget.

pub mod chat;
pub mod config;
pub mod contact;
pub mod error;
pub mod server;
