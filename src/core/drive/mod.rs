pub mod drive_service;
pub mod models;
pub mod resolver;

pub use drive_service::{DriveClient, DriveService};
pub use models::{DriveError, ExportFormat, ExportResult, FileMetadata, ResourceType, UserProfile};
pub use resolver::resolve;
