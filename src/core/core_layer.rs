// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "drive/mod.rs"]
pub mod drive;
