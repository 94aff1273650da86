use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// File type tag understood by the service, rendered as its lowercase name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileType {
    #[default]
    Pdf,
    Tif,
    Html,
    Htm,
    Doc,
    Docx,
    Txt,
    Rtf,
    Xls,
    Xlsx,
    /// A tag this library has no variant for, stored lowercase.
    Other(String),
}

impl FileType {
    pub fn as_str(&self) -> &str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Tif => "tif",
            FileType::Html => "html",
            FileType::Htm => "htm",
            FileType::Doc => "doc",
            FileType::Docx => "docx",
            FileType::Txt => "txt",
            FileType::Rtf => "rtf",
            FileType::Xls => "xls",
            FileType::Xlsx => "xlsx",
            FileType::Other(tag) => tag,
        }
    }

    /// Guess the tag from a file name's extension.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| ext.parse().unwrap_or_default())
    }
}

impl FromStr for FileType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "tif" | "tiff" => FileType::Tif,
            "html" => FileType::Html,
            "htm" => FileType::Htm,
            "doc" => FileType::Doc,
            "docx" => FileType::Docx,
            "txt" => FileType::Txt,
            "rtf" => FileType::Rtf,
            "xls" => FileType::Xls,
            "xlsx" => FileType::Xlsx,
            _ => FileType::Other(s.to_ascii_lowercase()),
        })
    }
}

impl From<String> for FileType {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<FileType> for String {
    fn from(t: FileType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fax to be sent to a single recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundSubmission {
    pub recipient_name: String,
    pub recipient_company_name: String,
    pub recipient_fax_number: String,
    pub subject: String,
    pub content: Vec<u8>,
    pub content_type: FileType,
}

impl OutboundSubmission {
    pub fn new(
        recipient_name: impl Into<String>,
        recipient_company_name: impl Into<String>,
        recipient_fax_number: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            recipient_company_name: recipient_company_name.into(),
            recipient_fax_number: recipient_fax_number.into(),
            subject: String::new(),
            content,
            content_type: FileType::default(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_content_type(mut self, content_type: FileType) -> Self {
        self.content_type = content_type;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusQuery {
    pub doc_id: String,
}

impl StatusQuery {
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
        }
    }
}

/// Result code of a submission. Not interchangeable with [`QueryStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    HttpFailure = 0,
    Success = 1,
    Failure = 2,
}

impl RequestStatus {
    /// Status for a `StatusCode` read from a response body. `HttpFailure`
    /// is only produced for a failed transport, so 0 is not accepted here.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(RequestStatus::Success),
            2 => Some(RequestStatus::Failure),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

/// Delivery state of a previously submitted fax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryStatus {
    HttpFailure = 0,
    /// Not attempted yet, or retrying after a busy signal. Keep polling.
    Pending = 3,
    Sent = 4,
    Failure = 5,
}

impl QueryStatus {
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Whether polling again can still change the answer.
    pub fn is_final(self) -> bool {
        matches!(self, QueryStatus::Sent | QueryStatus::Failure)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundAcknowledgment {
    pub status_code: RequestStatus,
    pub error_message: Option<String>,
    pub error_level: Option<String>,
    pub doc_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryStatus {
    pub status_code: QueryStatus,
    pub message: String,
    pub classification: String,
    pub outcome: String,
}
