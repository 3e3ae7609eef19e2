use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use super::auth::TokenProvider;
use crate::core::drive::{DriveClient, DriveError, FileMetadata, UserProfile};

/// Metadata lookups are small and fast; exports of large spreadsheets or
/// decks are not, so the two round trips get independent bounds.
const METADATA_TIMEOUT: Duration = Duration::from_secs(15);
const CONTENT_TIMEOUT: Duration = Duration::from_secs(120);

/// Minimal Drive REST v3 client. It deliberately exposes only the calls the
/// core layer needs: metadata by id, export/download by id, and `about`.
pub struct DriveApiClient<T: TokenProvider> {
    client: Client,
    auth: T,
    base_url: String,
}

impl<T: TokenProvider> DriveApiClient<T> {
    pub fn new(auth: T) -> Result<Self, DriveError> {
        let mut headers = HeaderMap::new();
        headers.insert("User-Agent", HeaderValue::from_static("gdrive-tools/0.2"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| DriveError::RemoteFetch {
                id: String::new(),
                source: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            auth,
            base_url: "https://www.googleapis.com/drive/v3".to_string(),
        })
    }

    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Response, DriveError> {
        let token = self.auth.access_token().await?;
        self.client
            .get(url)
            .query(query)
            .header("Authorization", format!("Bearer {token}"))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| DriveError::RemoteFetch {
                id: String::new(),
                source: e.to_string(),
            })
    }
}

/// Collapses a non-success response into a "status: body" string for the
/// error taxonomy. 401 short-circuits into the auth variant since that is
/// the one case with a distinct remedy; every other status stays a plain
/// source string for the caller to wrap as metadata/fetch failure.
async fn failure(response: Response) -> Result<String, DriveError> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    non_success_source(status, body)
}

fn non_success_source(status: StatusCode, body: String) -> Result<String, DriveError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(DriveError::AuthenticationRequired(format!(
            "Drive API rejected the credentials ({status}): {body}"
        )));
    }
    Ok(format!("HTTP {status}: {body}"))
}

#[async_trait]
impl<T: TokenProvider> DriveClient for DriveApiClient<T> {
    async fn file_metadata(&self, file_id: &str) -> Result<FileMetadata, DriveError> {
        let url = format!("{}/files/{}", self.base_url, file_id);
        let query = [
            ("fields", "id,name,mimeType,size"),
            ("supportsAllDrives", "true"),
        ];

        tracing::debug!("Fetching Drive metadata: {}", file_id);
        let response = self
            .get(&url, &query, METADATA_TIMEOUT)
            .await
            .map_err(|e| match e {
                DriveError::RemoteFetch { source, .. } => DriveError::Metadata {
                    id: file_id.to_string(),
                    source,
                },
                other => other,
            })?;

        if !response.status().is_success() {
            let source = failure(response).await?;
            return Err(DriveError::Metadata {
                id: file_id.to_string(),
                source,
            });
        }

        let api_file: ApiFile = response.json().await.map_err(|e| DriveError::Metadata {
            id: file_id.to_string(),
            source: e.to_string(),
        })?;

        Ok(api_file.into_metadata(file_id))
    }

    async fn export_file(&self, file_id: &str, mime_type: &str) -> Result<Vec<u8>, DriveError> {
        let url = format!("{}/files/{}/export", self.base_url, file_id);

        tracing::debug!("Exporting Drive file {} as {}", file_id, mime_type);
        let response = self
            .get(&url, &[("mimeType", mime_type)], CONTENT_TIMEOUT)
            .await
            .map_err(|e| match e {
                DriveError::RemoteFetch { source, .. } => DriveError::RemoteFetch {
                    id: file_id.to_string(),
                    source,
                },
                other => other,
            })?;

        if !response.status().is_success() {
            let source = failure(response).await?;
            return Err(DriveError::RemoteFetch {
                id: file_id.to_string(),
                source,
            });
        }

        let bytes = response.bytes().await.map_err(|e| DriveError::RemoteFetch {
            id: file_id.to_string(),
            source: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, DriveError> {
        let url = format!("{}/files/{}", self.base_url, file_id);
        let query = [("alt", "media"), ("supportsAllDrives", "true")];

        tracing::debug!("Downloading Drive file media: {}", file_id);
        let response = self
            .get(&url, &query, CONTENT_TIMEOUT)
            .await
            .map_err(|e| match e {
                DriveError::RemoteFetch { source, .. } => DriveError::RemoteFetch {
                    id: file_id.to_string(),
                    source,
                },
                other => other,
            })?;

        if !response.status().is_success() {
            let source = failure(response).await?;
            return Err(DriveError::RemoteFetch {
                id: file_id.to_string(),
                source,
            });
        }

        let bytes = response.bytes().await.map_err(|e| DriveError::RemoteFetch {
            id: file_id.to_string(),
            source: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }

    async fn about_user(&self) -> Result<UserProfile, DriveError> {
        let url = format!("{}/about", self.base_url);

        let response = self
            .get(&url, &[("fields", "user")], METADATA_TIMEOUT)
            .await
            .map_err(|e| match e {
                DriveError::RemoteFetch { source, .. } => DriveError::RemoteFetch {
                    id: "about".to_string(),
                    source,
                },
                other => other,
            })?;

        // Only a 401 means "re-authenticate"; quota hits and server errors
        // stay fetch failures so the caller can pick the right remedy.
        if !response.status().is_success() {
            let source = failure(response).await?;
            return Err(DriveError::RemoteFetch {
                id: "about".to_string(),
                source,
            });
        }

        let about: ApiAbout = response.json().await.map_err(|e| DriveError::RemoteFetch {
            id: "about".to_string(),
            source: e.to_string(),
        })?;

        let user = about.user.ok_or_else(|| {
            DriveError::AuthenticationRequired(
                "Drive API returned no user for these credentials".to_string(),
            )
        })?;

        Ok(UserProfile {
            display_name: user.display_name.unwrap_or_else(|| "Unknown".to_string()),
            email: user.email_address.unwrap_or_else(|| "Unknown".to_string()),
            photo_link: user.photo_link,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiFile {
    id: Option<String>,
    name: Option<String>,
    mime_type: Option<String>,
    /// Drive reports size as a decimal string, and omits it for native files.
    size: Option<String>,
}

impl ApiFile {
    fn into_metadata(self, fallback_id: &str) -> FileMetadata {
        FileMetadata {
            id: self.id.unwrap_or_else(|| fallback_id.to_string()),
            name: self.name.unwrap_or_else(|| "Untitled".to_string()),
            mime_type: self.mime_type.unwrap_or_default(),
            size: self.size.and_then(|s| s.parse().ok()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiAbout {
    user: Option<ApiUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiUser {
    display_name: Option<String>,
    email_address: Option<String>,
    photo_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Token provider that always refuses, so requests fail before any
    /// network traffic happens.
    struct NoTokens;

    #[async_trait]
    impl TokenProvider for NoTokens {
        async fn access_token(&self) -> Result<String, DriveError> {
            Err(DriveError::AuthenticationRequired(
                "no credentials configured".to_string(),
            ))
        }
    }

    #[test]
    fn test_api_file_conversion() {
        let api_file = ApiFile {
            id: Some("1abc".to_string()),
            name: Some("Report".to_string()),
            mime_type: Some("application/vnd.google-apps.document".to_string()),
            size: None,
        };
        let metadata = api_file.into_metadata("1abc");
        assert_eq!(metadata.name, "Report");
        assert_eq!(metadata.size, None);
    }

    #[test]
    fn test_api_file_conversion_fills_gaps() {
        let api_file = ApiFile {
            id: None,
            name: None,
            mime_type: None,
            size: Some("2048".to_string()),
        };
        let metadata = api_file.into_metadata("fallback-id");
        assert_eq!(metadata.id, "fallback-id");
        assert_eq!(metadata.name, "Untitled");
        assert_eq!(metadata.size, Some(2048));
    }

    #[test]
    fn test_only_401_maps_to_authentication_required() {
        let err = non_success_source(StatusCode::UNAUTHORIZED, "expired".to_string()).unwrap_err();
        assert!(matches!(err, DriveError::AuthenticationRequired(_)));
    }

    #[test]
    fn test_quota_and_server_errors_stay_fetch_sources() {
        let quota = non_success_source(StatusCode::TOO_MANY_REQUESTS, "quota".to_string()).unwrap();
        assert!(quota.contains("429"));

        let outage =
            non_success_source(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()).unwrap();
        assert!(outage.contains("500"));
        assert!(outage.contains("boom"));
    }

    #[tokio::test]
    async fn test_missing_token_surfaces_as_authentication_required() {
        let client = DriveApiClient::new(NoTokens).unwrap();

        let err = client.about_user().await.unwrap_err();
        assert!(matches!(err, DriveError::AuthenticationRequired(_)));

        let err = client.file_metadata("1abc").await.unwrap_err();
        assert!(matches!(err, DriveError::AuthenticationRequired(_)));
    }
}
