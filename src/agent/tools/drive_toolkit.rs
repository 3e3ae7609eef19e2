// =============================================================================
// DRIVE TOOLKIT — inbound agent boundary
// =============================================================================
//
// Exposes document retrieval to the host agent runtime as two string-valued
// tools. Nothing raises past this boundary: every failure is converted into a
// short, human-readable message so the calling agent can reason about it in
// natural language.

use std::collections::HashMap;

use async_trait::async_trait;

use super::models::{FunctionCallHandler, FunctionDef, FunctionParameters, PropertyDef};
use crate::core::drive::{DriveClient, DriveError, DriveService, ExportFormat};

/// Toolkit for retrieving content from Google Drive documents.
///
/// Documents are returned as markdown, spreadsheets as CSV, presentations as
/// plain text, and other files as their stored bytes decoded as text.
pub struct DriveToolkit<C: DriveClient> {
    service: DriveService<C>,
}

impl<C: DriveClient> DriveToolkit<C> {
    pub fn new(service: DriveService<C>) -> Self {
        Self { service }
    }

    /// Gets content from a Drive document by URL or id, in the default
    /// representation for its type. Always returns a string; on failure the
    /// string describes the failure and names the reference.
    pub async fn get_document_content(&self, url_or_id: &str) -> String {
        self.get_document_content_with_format(url_or_id, None).await
    }

    /// Same as [`get_document_content`](Self::get_document_content) but with
    /// an explicit format override (e.g. plain text instead of markdown).
    pub async fn get_document_content_with_format(
        &self,
        url_or_id: &str,
        format: Option<ExportFormat>,
    ) -> String {
        tracing::info!("Retrieving Drive document content: {}", url_or_id);

        match self.service.get_document_content(url_or_id, format).await {
            Ok(result) => {
                tracing::info!(
                    "Retrieved {} content for {} ({} bytes)",
                    result.resource_type,
                    url_or_id,
                    result.byte_len
                );
                result.content
            }
            Err(e) => {
                let error_msg = format!("Error retrieving document {url_or_id}: {e}");
                tracing::error!("{}", error_msg);
                error_msg
            }
        }
    }

    /// Gets information about the currently authenticated user as a JSON
    /// string, or an explanatory message when authentication is missing.
    pub async fn get_user_info(&self) -> String {
        match self.service.whoami().await {
            Ok(profile) => {
                let result = serde_json::json!({
                    "authenticated_user": {
                        "display_name": profile.display_name,
                        "email": profile.email,
                        "photo_link": profile.photo_link.unwrap_or_default(),
                    }
                });
                serde_json::to_string_pretty(&result)
                    .unwrap_or_else(|e| format!("Error encoding user info: {e}"))
            }
            Err(e @ DriveError::AuthenticationRequired(_)) => {
                let error_msg = format!("No user information available: {e}");
                tracing::error!("{}", error_msg);
                error_msg
            }
            Err(e) => {
                let error_msg = format!("Error getting user info: {e}");
                tracing::error!("{}", error_msg);
                error_msg
            }
        }
    }
}

pub fn get_document_content_function() -> FunctionDef {
    let mut properties = HashMap::new();

    properties.insert(
        "url_or_id".to_string(),
        PropertyDef {
            prop_type: "string".to_string(),
            description: Some("The Google Drive URL or file ID.".to_string()),
            enum_values: None,
        },
    );

    FunctionDef {
        name: "get_document_content".to_string(),
        description: "Reads a Google Drive document as text. Docs are returned \
                      as markdown, Sheets as CSV, Slides as plain text."
            .to_string(),
        parameters: FunctionParameters {
            param_type: "object".to_string(),
            properties,
            required: vec!["url_or_id".to_string()],
        },
    }
}

pub fn get_user_info_function() -> FunctionDef {
    FunctionDef {
        name: "get_user_info".to_string(),
        description: "Returns the authenticated Google user's profile as JSON.".to_string(),
        parameters: FunctionParameters {
            param_type: "object".to_string(),
            properties: HashMap::new(),
            required: vec![],
        },
    }
}

#[async_trait]
impl<C: DriveClient> FunctionCallHandler for DriveToolkit<C> {
    async fn handle_function_call(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        match name {
            "get_document_content" => {
                let url_or_id = args
                    .get("url_or_id")
                    .and_then(|v| v.as_str())
                    .ok_or("Missing 'url_or_id' argument")?;

                match self.service.get_document_content(url_or_id, None).await {
                    Ok(result) => Ok(serde_json::json!({
                        "success": true,
                        "resource_type": result.resource_type.to_string(),
                        "content": result.content,
                    })),
                    Err(e) => Ok(serde_json::json!({
                        "success": false,
                        "error": e.to_string(),
                    })),
                }
            }

            "get_user_info" => Ok(serde_json::json!({
                "result": self.get_user_info().await,
            })),

            _ => Err(format!("Unknown function: {name}")),
        }
    }

    fn supported_functions(&self) -> Vec<String> {
        vec![
            "get_document_content".to_string(),
            "get_user_info".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::drive::{FileMetadata, UserProfile};

    /// Minimal fake: serves one document, or fails everywhere when
    /// `authenticated` is false.
    struct FakeDriveClient {
        authenticated: bool,
    }

    #[async_trait]
    impl DriveClient for FakeDriveClient {
        async fn file_metadata(&self, file_id: &str) -> Result<FileMetadata, DriveError> {
            if !self.authenticated {
                return Err(DriveError::Metadata {
                    id: file_id.to_string(),
                    source: "HTTP 404: File not found".to_string(),
                });
            }
            Ok(FileMetadata {
                id: file_id.to_string(),
                name: "Notes".to_string(),
                mime_type: "application/vnd.google-apps.document".to_string(),
                size: None,
            })
        }

        async fn export_file(&self, _file_id: &str, _mime_type: &str) -> Result<Vec<u8>, DriveError> {
            Ok(b"# Notes\n\nHello".to_vec())
        }

        async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, DriveError> {
            Err(DriveError::RemoteFetch {
                id: file_id.to_string(),
                source: "unexpected media download".to_string(),
            })
        }

        async fn about_user(&self) -> Result<UserProfile, DriveError> {
            if !self.authenticated {
                return Err(DriveError::AuthenticationRequired(
                    "no credentials configured".to_string(),
                ));
            }
            Ok(UserProfile {
                display_name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                photo_link: Some("https://example.com/ada.png".to_string()),
            })
        }
    }

    fn toolkit(authenticated: bool) -> DriveToolkit<FakeDriveClient> {
        DriveToolkit::new(DriveService::new(FakeDriveClient { authenticated }))
    }

    #[tokio::test]
    async fn test_get_document_content_returns_exported_text() {
        let content = toolkit(true).get_document_content("1abc123xyz").await;
        assert_eq!(content, "# Notes\n\nHello");
    }

    #[tokio::test]
    async fn test_failure_surfaces_as_message_with_the_reference() {
        let content = toolkit(false).get_document_content("1MissingId").await;
        assert!(content.starts_with("Error retrieving document 1MissingId"));
        assert!(content.contains("metadata lookup failed"));
    }

    #[tokio::test]
    async fn test_get_user_info_returns_json_profile() {
        let info = toolkit(true).get_user_info().await;
        let parsed: serde_json::Value = serde_json::from_str(&info).unwrap();
        assert_eq!(parsed["authenticated_user"]["display_name"], "Ada");
        assert_eq!(parsed["authenticated_user"]["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_get_user_info_unauthenticated_is_explicit() {
        let info = toolkit(false).get_user_info().await;
        assert!(!info.trim().is_empty());
        assert!(info.contains("authentication required"));
    }

    #[tokio::test]
    async fn test_function_call_dispatch() {
        let result = toolkit(true)
            .handle_function_call(
                "get_document_content",
                &serde_json::json!({"url_or_id": "1abc123xyz"}),
            )
            .await
            .unwrap();
        assert_eq!(result["success"], true);
        assert_eq!(result["resource_type"], "document");
        assert_eq!(result["content"], "# Notes\n\nHello");
    }

    #[tokio::test]
    async fn test_function_call_missing_argument() {
        let err = toolkit(true)
            .handle_function_call("get_document_content", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.contains("url_or_id"));
    }

    #[tokio::test]
    async fn test_function_call_unknown_name() {
        let err = toolkit(true)
            .handle_function_call("delete_document", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.contains("Unknown function"));
    }

    #[tokio::test]
    async fn test_declared_functions_match_dispatch() {
        let toolkit = toolkit(true);
        let declared = [get_document_content_function(), get_user_info_function()];
        let supported = toolkit.supported_functions();
        for def in &declared {
            assert!(supported.contains(&def.name));
        }
    }
}
