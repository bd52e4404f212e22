use serde::{Deserialize, Serialize};

/// Successful response wrapper: `{status, type, data, message}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub data: T,
    #[serde(default)]
    pub message: String,
}

impl<T> ApiEnvelope<T> {
    /// Drop the wrapper and keep the payload.
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Error body returned alongside a non-2xx status.
///
/// `data` is usually `null` on errors, so it is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_reads_type_field() {
        let raw = r#"{"status":"success","type":"ping","data":42,"message":"ok"}"#;
        let envelope: ApiEnvelope<u32> = serde_json::from_str(raw).unwrap();

        assert_eq!(envelope.kind, "ping");
        assert_eq!(envelope.into_data(), 42);
    }

    #[test]
    fn error_envelope_tolerates_missing_fields() {
        let envelope: ErrorEnvelope = serde_json::from_str(r#"{"message":"Token expired","data":null}"#).unwrap();

        assert_eq!(envelope.message, "Token expired");
        assert!(envelope.status.is_empty());
    }
}
