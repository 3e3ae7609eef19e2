use async_trait::async_trait;

use super::models::{DriveError, ExportFormat, ExportResult, FileMetadata, ResourceType, UserProfile};
use super::resolver;

/// Transport seam to the remote document service. The core only ever needs
/// these four read-only operations; the wire protocol is the implementor's
/// concern.
#[async_trait]
pub trait DriveClient: Send + Sync {
    /// One round trip for the file's MIME type and basic descriptors.
    async fn file_metadata(&self, file_id: &str) -> Result<FileMetadata, DriveError>;

    /// Server-side conversion of a native Google file into `mime_type`.
    async fn export_file(&self, file_id: &str, mime_type: &str) -> Result<Vec<u8>, DriveError>;

    /// Raw media download for non-native files, no transformation.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, DriveError>;

    /// The authenticated principal's profile.
    async fn about_user(&self) -> Result<UserProfile, DriveError>;
}

// Blanket implementation for Box<dyn DriveClient> so callers can hold a
// trait object when the concrete client is picked at runtime.
#[async_trait]
impl DriveClient for Box<dyn DriveClient> {
    async fn file_metadata(&self, file_id: &str) -> Result<FileMetadata, DriveError> {
        (**self).file_metadata(file_id).await
    }

    async fn export_file(&self, file_id: &str, mime_type: &str) -> Result<Vec<u8>, DriveError> {
        (**self).export_file(file_id, mime_type).await
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, DriveError> {
        (**self).download_file(file_id).await
    }

    async fn about_user(&self) -> Result<UserProfile, DriveError> {
        (**self).about_user().await
    }
}

/// The export/normalization engine. Stateless per call: each retrieval is a
/// metadata round trip followed by an export or download round trip, and
/// nothing is cached in between.
pub struct DriveService<C: DriveClient> {
    client: C,
}

impl<C: DriveClient> DriveService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Determines the file's type from its remote MIME type. Never inferred
    /// from the reference string — a Sheets link can redirect to a Doc.
    pub async fn classify(&self, file_id: &str) -> Result<ResourceType, DriveError> {
        let metadata = self.client.file_metadata(file_id).await?;
        let resource_type = ResourceType::from_mime(&metadata.mime_type);
        tracing::debug!(
            "Classified '{}' ({}) as {}",
            metadata.name,
            file_id,
            resource_type
        );
        Ok(resource_type)
    }

    /// Fetches the file's content in the requested (or default) representation
    /// and decodes it as UTF-8. Whole document or explicit failure — never a
    /// truncated or lossy result.
    pub async fn export(
        &self,
        file_id: &str,
        resource_type: ResourceType,
        format_override: Option<ExportFormat>,
    ) -> Result<ExportResult, DriveError> {
        let format = format_override.unwrap_or_else(|| resource_type.default_format());
        if !resource_type.supports(format) {
            return Err(DriveError::ExportUnsupported {
                resource_type,
                format,
            });
        }

        let bytes = match format.mime_type() {
            Some(mime_type) => self.client.export_file(file_id, mime_type).await?,
            // Raw: no export transform exists, fetch the stored bytes.
            None => self.client.download_file(file_id).await?,
        };

        let content = String::from_utf8(bytes).map_err(|e| DriveError::Decode {
            id: file_id.to_string(),
            source: e.to_string(),
        })?;

        Ok(ExportResult {
            byte_len: content.len(),
            content,
            resource_type,
        })
    }

    /// Full retrieval pipeline: resolve the reference, classify the file,
    /// then export it.
    pub async fn get_document_content(
        &self,
        reference: &str,
        format_override: Option<ExportFormat>,
    ) -> Result<ExportResult, DriveError> {
        let file_id = resolver::resolve(reference)?;
        let resource_type = self.classify(&file_id).await?;
        self.export(&file_id, resource_type, format_override).await
    }

    /// One round trip for the authenticated user's profile.
    pub async fn whoami(&self) -> Result<UserProfile, DriveError> {
        self.client.about_user().await
    }
}
