// Google Drive content-retrieval toolkit for agent runtimes.
//
// **Architecture Overview:**
// - `core/` = Business logic (transport-agnostic)
// - `infra/` = Implementations of core traits (Drive REST API, OAuth)
// - `agent/` = Agent-runtime adapters (function tools, string boundary)

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with a pile of mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
pub mod core;

#[path = "infra/infra_layer.rs"]
pub mod infra;

#[path = "agent/agent_layer.rs"]
pub mod agent;

pub use crate::agent::tools::DriveToolkit;
pub use crate::core::drive::{
    DriveClient, DriveError, DriveService, ExportFormat, ExportResult, FileMetadata, ResourceType,
    UserProfile,
};
pub use crate::infra::google_drive::{DriveApiClient, ServiceAccountAuth};
