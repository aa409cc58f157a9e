//! Cross-crate tests for the scan engine.

#[cfg(test)]
mod util;

mod coordinator;
mod discovery;
mod interface;
mod ports;
