use std::fmt;

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// PDF reading errors
    Pdf(PdfError),
    /// Question segmentation / input parsing errors
    Parse(ParseError),
    /// Provider API errors
    Api(ApiError),
    /// File operation errors
    File(FileError),
    /// Anything else (wrapping third-party errors)
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Pdf(e) => write!(f, "PDF error: {}", e),
            AppError::Parse(e) => write!(f, "parse error: {}", e),
            AppError::Api(e) => write!(f, "API error: {}", e),
            AppError::File(e) => write!(f, "file error: {}", e),
            AppError::Other(msg) => write!(f, "error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Pdf(e) => Some(e),
            AppError::Parse(e) => Some(e),
            AppError::Api(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// PDF reading errors
#[derive(Debug)]
pub enum PdfError {
    /// The document could not be opened or its pages enumerated
    OpenFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Every page came back without text (scanned or image-only document)
    NoExtractableText { path: String },
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::OpenFailed { path, source } => {
                write!(f, "cannot read PDF {}: {}", path, source)
            }
            PdfError::NoExtractableText { path } => {
                write!(f, "no extractable text in {}", path)
            }
        }
    }
}

impl std::error::Error for PdfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PdfError::OpenFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            PdfError::NoExtractableText { .. } => None,
        }
    }
}

/// Question segmentation / input parsing errors
#[derive(Debug)]
pub enum ParseError {
    /// The extracted text contained no numbered question blocks
    NoQuestionsFound,
    /// The provider name did not match any known provider
    UnknownProvider { name: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoQuestionsFound => {
                write!(f, "no questions could be extracted from the PDF")
            }
            ParseError::UnknownProvider { name } => {
                write!(
                    f,
                    "unknown provider: {} (supported: openai, gemini, groq, anthropic, ollama)",
                    name
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Provider API errors
#[derive(Debug)]
pub enum ApiError {
    /// The provider requires a key and none was supplied
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },
    /// The request never produced a usable response
    RequestFailed {
        provider: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The provider answered with a non-success status
    BadStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },
    /// The provider answered but the answer was empty
    EmptyResponse { provider: &'static str },
    /// The response body was not the expected JSON
    JsonParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingApiKey { provider, env_var } => {
                write!(
                    f,
                    "{} requires an API key: set {} or pass --api-key",
                    provider, env_var
                )
            }
            ApiError::RequestFailed { provider, source } => {
                write!(f, "{} request failed: {}", provider, source)
            }
            ApiError::BadStatus {
                provider,
                status,
                body,
            } => {
                write!(f, "{} returned HTTP {}: {}", provider, status, body)
            }
            ApiError::EmptyResponse { provider } => {
                write!(f, "{} returned an empty answer", provider)
            }
            ApiError::JsonParseFailed { source } => {
                write!(f, "JSON parse failed: {}", source)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::RequestFailed { source, .. } | ApiError::JsonParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// File operation errors
#[derive(Debug)]
pub enum FileError {
    /// File does not exist
    NotFound { path: String },
    /// Writing the output failed
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "file does not exist: {}", path),
            FileError::WriteFailed { path, source } => {
                write!(f, "cannot write {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            FileError::NotFound { .. } => None,
        }
    }
}

// ========== Conversions from common error types ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

// ========== Convenience constructors ==========

impl AppError {
    pub fn pdf_open_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Pdf(PdfError::OpenFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    pub fn api_request_failed(
        provider: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            provider,
            source: Box::new(source),
        })
    }

    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    pub fn unknown_provider(name: impl Into<String>) -> Self {
        AppError::Parse(ParseError::UnknownProvider { name: name.into() })
    }
}

// ========== Result type alias ==========

/// Application result type
pub type Result<T> = std::result::Result<T, AppError>;
