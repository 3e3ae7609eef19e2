pub mod auth;
pub mod drive_api_client;

pub use auth::{ServiceAccountAuth, TokenProvider};
pub use drive_api_client::DriveApiClient;
