// The agent module adapts the core to a host agent runtime.
// Tools cross this boundary as plain strings and JSON values only.

pub mod models;

#[path = "tools/drive_toolkit.rs"]
pub mod tools;
