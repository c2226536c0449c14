//! Schema-driven field layout resolution and value decoding for inspecting game memory.

/// Field catalog, layout resolver, value decoder, and memory inspection helpers.
pub mod layout;
