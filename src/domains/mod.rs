//! Domains module containing business logic organized by bounded contexts.
//!
//! RetroIDE exposes a single domain: the tool catalog and the dispatcher
//! that every transport calls into.

pub mod tools;
