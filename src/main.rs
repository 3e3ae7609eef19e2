// One-shot CLI front end for the Drive toolkit.
//
// This binary's job is to:
// 1. Load configuration from the environment
// 2. Wire the layers together (dependency injection)
// 3. Run a single retrieval and print the result
//
// Usage:
//   gdrive_tools <url-or-id> [markdown|csv|txt|raw]
//   gdrive_tools --whoami

use anyhow::Result;

use gdrive_tools::core::drive::{DriveService, ExportFormat};
use gdrive_tools::infra::google_drive::{DriveApiClient, ServiceAccountAuth};
use gdrive_tools::DriveToolkit;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let Some(reference) = args.next() else {
        eprintln!("Usage: gdrive_tools <url-or-id> [markdown|csv|txt|raw]");
        eprintln!("       gdrive_tools --whoami");
        std::process::exit(2);
    };

    let format = match args.next() {
        Some(key) => match ExportFormat::from_key(&key) {
            Some(format) => Some(format),
            None => {
                eprintln!("Unknown format '{key}'. Expected markdown, csv, txt or raw.");
                std::process::exit(2);
            }
        },
        None => None,
    };

    let auth = ServiceAccountAuth::from_env().await?;
    tracing::info!("Authenticating as {}", auth.client_email());

    let client = DriveApiClient::new(auth)?;
    let toolkit = DriveToolkit::new(DriveService::new(client));

    let output = if reference == "--whoami" {
        toolkit.get_user_info().await
    } else {
        toolkit
            .get_document_content_with_format(&reference, format)
            .await
    };

    println!("{output}");
    Ok(())
}
