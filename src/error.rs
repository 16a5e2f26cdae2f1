use std::fmt;

/// Startup configuration failure. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} environment variable is not set")]
    MissingVar { name: &'static str },
    #[error("{name} {reason}")]
    InvalidVar {
        name: &'static str,
        reason: &'static str,
    },
    #[error("cannot build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Classification of a failed upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    /// DNS, connection refused, timeout. Never retried.
    Transport,
    /// Non-2xx HTTP response.
    HttpStatus,
    /// The GraphQL envelope carried an `errors` array.
    ApplicationErrors,
    /// 2xx response without a usable `data` payload.
    MalformedResponse,
}

impl UpstreamErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport error",
            Self::HttpStatus => "http status error",
            Self::ApplicationErrors => "application errors",
            Self::MalformedResponse => "malformed response",
        }
    }
}

impl fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single normalized error raised at the upstream boundary.
///
/// `operation` is a call label such as `GetDoc(workspaceId=w1, docId=d1)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation}: {kind}: {message}")]
pub struct UpstreamError {
    pub kind: UpstreamErrorKind,
    pub operation: String,
    pub message: String,
}

impl UpstreamError {
    pub fn new(
        kind: UpstreamErrorKind,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn transport(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Transport, operation, message)
    }

    pub fn http_status(operation: impl Into<String>, status: u16, body: &str) -> Self {
        Self::new(
            UpstreamErrorKind::HttpStatus,
            operation,
            format!("HTTP {status}: {body}"),
        )
    }

    /// Join GraphQL error messages, comma separated, in array order.
    pub fn application<I, S>(operation: impl Into<String>, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = messages
            .into_iter()
            .map(|m| m.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(UpstreamErrorKind::ApplicationErrors, operation, joined)
    }

    pub fn malformed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::MalformedResponse, operation, message)
    }
}

/// Every failure a tool call or resource read can surface to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },
    #[error("Invalid resource: {uri}")]
    InvalidResource { uri: String },
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
    #[error("{tool} requires workspaceId (no AFFINE_WORKSPACE_ID configured)")]
    MissingWorkspace { tool: String },
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("cannot serialize result: {err}"),
        }
    }
}
