use std::fmt;

/// Errors that can be raised by the document retrieval workflow.
///
/// `Display` and `Error` are implemented by hand because the `source` fields
/// are plain strings, which `thiserror`'s derive would try to expose as the
/// error source.
#[derive(Debug)]
pub enum DriveError {
    /// The caller-supplied reference could not be turned into a file id.
    /// Local parsing failure, not worth retrying.
    InvalidReference(String),

    /// The metadata round trip failed (not found, permission denied, transport).
    Metadata { id: String, source: String },

    /// The export or download round trip failed.
    RemoteFetch { id: String, source: String },

    /// The requested export format is not valid for the file's type.
    ExportUnsupported {
        resource_type: ResourceType,
        format: ExportFormat,
    },

    /// Fetched bytes were not valid UTF-8 text.
    Decode { id: String, source: String },

    /// Credentials are missing or expired.
    AuthenticationRequired(String),
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidReference(reference) => {
                write!(f, "invalid document reference: {reference}")
            }
            Self::Metadata { id, source } => {
                write!(f, "metadata lookup failed for '{id}': {source}")
            }
            Self::RemoteFetch { id, source } => {
                write!(f, "content fetch failed for '{id}': {source}")
            }
            Self::ExportUnsupported {
                resource_type,
                format,
            } => {
                write!(
                    f,
                    "{format} export is not supported for {resource_type} files"
                )
            }
            Self::Decode { id, source } => {
                write!(f, "content for '{id}' is not decodable as UTF-8 text: {source}")
            }
            Self::AuthenticationRequired(detail) => {
                write!(f, "authentication required: {detail}")
            }
        }
    }
}

impl std::error::Error for DriveError {}

/// Classification of a Drive file, derived from its remote MIME type.
///
/// This is a closed enum on purpose: new kinds are added by extending the
/// MIME lookup and the format policy below, not by subclassing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// Google Docs document.
    Document,
    /// Google Sheets spreadsheet.
    Spreadsheet,
    /// Google Slides presentation.
    Presentation,
    /// Anything else stored in Drive (plain files, PDFs, uploads).
    Other,
}

impl ResourceType {
    /// Maps a Drive MIME type to a resource type. Unrecognized types are
    /// `Other`, never an error — Drive stores arbitrary files.
    pub fn from_mime(mime_type: &str) -> Self {
        match mime_type {
            "application/vnd.google-apps.document" => Self::Document,
            "application/vnd.google-apps.spreadsheet" => Self::Spreadsheet,
            "application/vnd.google-apps.presentation" => Self::Presentation,
            _ => Self::Other,
        }
    }

    /// The default export representation for this type. Fixed policy:
    /// Docs become markdown, Sheets become CSV, Slides become plain text,
    /// everything else is fetched as raw bytes.
    pub fn default_format(self) -> ExportFormat {
        match self {
            Self::Document => ExportFormat::Markdown,
            Self::Spreadsheet => ExportFormat::Csv,
            Self::Presentation => ExportFormat::PlainText,
            Self::Other => ExportFormat::Raw,
        }
    }

    /// Whether the Drive export endpoint can produce `format` for this type.
    ///
    /// `Raw` is only valid for `Other` — native Google files have no media
    /// to download, and structured exports only apply to native files.
    pub fn supports(self, format: ExportFormat) -> bool {
        match self {
            Self::Document => matches!(format, ExportFormat::Markdown | ExportFormat::PlainText),
            Self::Spreadsheet => matches!(format, ExportFormat::Csv),
            Self::Presentation => matches!(format, ExportFormat::PlainText),
            Self::Other => matches!(format, ExportFormat::Raw),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Document => "document",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "presentation",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Target export representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Csv,
    PlainText,
    /// No server-side transform; fetch the file's bytes as stored.
    Raw,
}

impl ExportFormat {
    /// The MIME type sent to the export endpoint, or `None` for `Raw`
    /// (raw fetches go through the media download path instead).
    pub fn mime_type(self) -> Option<&'static str> {
        match self {
            Self::Markdown => Some("text/markdown"),
            Self::Csv => Some("text/csv"),
            Self::PlainText => Some("text/plain"),
            Self::Raw => None,
        }
    }

    /// Parses a user-facing format key, e.g. from a CLI argument.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Some(Self::Markdown),
            "csv" => Some(Self::Csv),
            "text" | "txt" | "plain" => Some(Self::PlainText),
            "raw" => Some(Self::Raw),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Markdown => "markdown",
            Self::Csv => "csv",
            Self::PlainText => "plain text",
            Self::Raw => "raw",
        };
        f.write_str(name)
    }
}

/// Basic file descriptors from the metadata round trip.
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// Stored size in bytes. Drive omits this for native Google files.
    pub size: Option<u64>,
}

/// The decoded content of one retrieval, created per call and handed to the
/// caller — the core never keeps a copy.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub content: String,
    /// Length of `content` in bytes, kept for logging.
    pub byte_len: usize,
    pub resource_type: ResourceType,
}

/// The authenticated principal, as reported by the Drive `about` endpoint.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub display_name: String,
    pub email: String,
    pub photo_link: Option<String>,
}
