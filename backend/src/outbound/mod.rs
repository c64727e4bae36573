//! Outbound adapters: implementations of the domain's ports.

pub mod persistence;
