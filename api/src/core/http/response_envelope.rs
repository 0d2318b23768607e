use serde::Serialize;

/// Envelope for rejected requests: `{success:false, error:{code,message,details}}`.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ApiError,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Stable, machine-readable error code (e.g. "BAD_REQUEST").
    pub code: &'static str,
    /// Human-friendly error message.
    pub message: String,
    /// Optional fine-grained error details (per-field, hints, etc.).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ApiErrorDetail>,
}

#[derive(Debug, Default, Serialize)]
pub struct ApiErrorDetail {
    /// Field name like `question`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Optional hint to help the client fix the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ApiErrorDetail {
    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.hint.is_none()
    }
}

impl ErrorEnvelope {
    /// Builds a failure envelope; empty details are dropped.
    pub fn new(code: &'static str, message: impl Into<String>, details: Vec<ApiErrorDetail>) -> Self {
        Self {
            success: false,
            error: ApiError {
                code,
                message: message.into(),
                details: details.into_iter().filter(|d| !d.is_empty()).collect(),
            },
        }
    }
}
