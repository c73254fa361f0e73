//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag. Library error codes (`WAVEGEN_xxx`)
//! pass through unchanged; expression errors add their `E0xx` code and
//! byte offset.

use serde::{Deserialize, Serialize};
use wavegen::{ContainerHeader, EncodeReport, WavegenError};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// SAMPLES is not an integer
    pub const INVALID_SAMPLES: &str = "CLI_001";
    /// --duration is negative or not finite
    pub const INVALID_DURATION: &str = "CLI_002";
    /// Output file could not be created
    pub const OUTPUT_CREATE: &str = "CLI_003";
    /// Written file could not be read back for verification
    pub const VERIFY_READ: &str = "CLI_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "WAVEGEN_001", "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Offending parameter (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Zero-based channel index (expression errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<usize>,
    /// Expression error code (e.g., "E004")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expr_code: Option<String>,
    /// Byte offset within the expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            parameter: None,
            channel: None,
            expr_code: None,
            offset: None,
        }
    }
}

impl From<&WavegenError> for JsonError {
    fn from(err: &WavegenError) -> Self {
        let mut json = JsonError::new(err.code(), err.to_string());
        match err {
            WavegenError::InvalidParameter { name, .. } => {
                json.parameter = Some(name.clone());
            }
            WavegenError::InvalidExpression { channel, source } => {
                json.channel = Some(*channel);
                json.expr_code = Some(source.code().to_string());
                json.offset = Some(source.offset);
            }
            WavegenError::Io(_) => {}
        }
        json
    }
}

/// Details of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResult {
    /// Output path, or "-" for stdout
    pub output: String,
    /// Channel expressions, in output order
    pub expressions: Vec<String>,
    /// Derived container header
    pub header: ContainerHeader,
    /// Whether the header was written
    pub header_written: bool,
    /// Frames written
    pub frames: u64,
    /// Total bytes written
    pub bytes_written: u64,
    /// Playing time in seconds
    pub duration_seconds: f64,
    /// BLAKE3 hash of the sample data
    pub pcm_hash: String,
    /// Whether the file read back with the same header and sample hash
    /// (files with a header only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl GenerateResult {
    /// Builds the result from an encode report.
    pub fn from_report(output: String, expressions: Vec<String>, report: &EncodeReport) -> Self {
        Self {
            output,
            expressions,
            header: report.header,
            header_written: report.header_written,
            frames: report.frames,
            bytes_written: report.bytes_written,
            duration_seconds: report.header.duration_seconds(),
            pcm_hash: report.pcm_hash.clone(),
            verified: None,
        }
    }
}

/// JSON output for a generate run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Whether generation succeeded
    pub success: bool,
    /// Errors encountered during generation
    pub errors: Vec<JsonError>,
    /// Generation result details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResult>,
}

impl GenerateOutput {
    /// Creates a successful generate output.
    pub fn success(result: GenerateResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed generate output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// One entry of the symbol listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymbolInfo {
    /// Name as used in expressions
    pub name: String,
    /// "variable", "constant" or "function"
    pub kind: String,
    /// Accepted argument count (functions only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arity: Option<String>,
    /// Value (constants only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavegen::expr::{ExprError, ExprErrorKind};

    #[test]
    fn test_parameter_error_to_json() {
        let err = WavegenError::invalid_param("sample_rate", "illegal sample rate 0");
        let json = JsonError::from(&err);
        assert_eq!(json.code, "WAVEGEN_001");
        assert_eq!(json.parameter.as_deref(), Some("sample_rate"));
        assert!(json.channel.is_none());
    }

    #[test]
    fn test_expression_error_to_json() {
        let err = WavegenError::InvalidExpression {
            channel: 2,
            source: ExprError::new(ExprErrorKind::UnexpectedEnd, 3),
        };
        let json = JsonError::from(&err);
        assert_eq!(json.code, "WAVEGEN_002");
        assert_eq!(json.channel, Some(2));
        assert_eq!(json.expr_code.as_deref(), Some("E004"));
        assert_eq!(json.offset, Some(3));
    }

    #[test]
    fn test_optional_fields_skipped() {
        let value = serde_json::to_value(JsonError::new("CLI_001", "bad")).unwrap();
        assert_eq!(value, serde_json::json!({"code": "CLI_001", "message": "bad"}));
    }

    #[test]
    fn test_failure_has_no_result() {
        let out = GenerateOutput::failure(vec![JsonError::new("CLI_003", "nope")]);
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("result").is_none());
    }
}
