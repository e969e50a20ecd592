//! Versioned command/response envelopes for the tool host.

use serde::{Deserialize, Serialize};

/// Contract version for command/response envelopes.
pub const CONTRACT_VERSION: u32 = 1;

/// Commands understood by the tool host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandName {
    #[serde(rename = "host.ping")]
    HostPing,
    #[serde(rename = "host.version")]
    HostVersion,
    #[serde(rename = "host.stop")]
    HostStop,
    #[serde(rename = "tools.list")]
    ToolsList,
    #[serde(rename = "tools.call")]
    ToolsCall,
}

impl CommandName {
    /// Render command name to wire format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HostPing => "host.ping",
            Self::HostVersion => "host.version",
            Self::HostStop => "host.stop",
            Self::ToolsList => "tools.list",
            Self::ToolsCall => "tools.call",
        }
    }

    /// Parse a command name from wire format.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "host.ping" => Some(Self::HostPing),
            "host.version" => Some(Self::HostVersion),
            "host.stop" => Some(Self::HostStop),
            "tools.list" => Some(Self::ToolsList),
            "tools.call" => Some(Self::ToolsCall),
            _ => None,
        }
    }
}

/// A versioned response envelope from host -> client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub v: u32,
    pub request_id: String,
    pub ok: bool,
    pub payload: serde_json::Value,
    pub error: Option<String>,
}

impl ResponseEnvelope {
    /// Build a successful response envelope.
    #[must_use]
    pub fn ok(request_id: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            v: CONTRACT_VERSION,
            request_id: request_id.into(),
            ok: true,
            payload,
            error: None,
        }
    }

    /// Build an error response envelope.
    #[must_use]
    pub fn error(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            v: CONTRACT_VERSION,
            request_id: request_id.into(),
            ok: false,
            payload: serde_json::Value::Null,
            error: Some(message.into()),
        }
    }
}

/// A versioned command envelope from client -> host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    pub v: u32,
    pub request_id: String,
    pub command: CommandName,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl CommandEnvelope {
    /// Build a v1 command envelope.
    #[must_use]
    pub fn new(
        request_id: impl Into<String>,
        command: CommandName,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            v: CONTRACT_VERSION,
            request_id: request_id.into(),
            command,
            payload,
        }
    }

    /// Validate envelope version and required identifiers.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.v != CONTRACT_VERSION {
            return Err(ContractError::new(
                ContractErrorKind::UnsupportedVersion,
                format!(
                    "unsupported contract version {}; expected {}",
                    self.v, CONTRACT_VERSION
                ),
            ));
        }
        if self.request_id.trim().is_empty() {
            return Err(ContractError::new(
                ContractErrorKind::InvalidEnvelope,
                "request_id cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Payload of a `tools.call` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallPayload {
    /// Registered tool name.
    pub name: String,
    /// Tool arguments; an absent value is treated as `{}`.
    #[serde(default = "empty_object")]
    pub arguments: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Contract validation error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractErrorKind {
    UnsupportedVersion,
    InvalidEnvelope,
}

/// Contract validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractError {
    pub kind: ContractErrorKind,
    pub message: String,
}

impl ContractError {
    #[must_use]
    pub fn new(kind: ContractErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl std::fmt::Display for ContractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ContractError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_roundtrip_wire_format() {
        for name in [
            CommandName::HostPing,
            CommandName::HostVersion,
            CommandName::HostStop,
            CommandName::ToolsList,
            CommandName::ToolsCall,
        ] {
            assert_eq!(CommandName::parse(name.as_str()), Some(name));
            let json = serde_json::to_string(&name).expect("serialize");
            assert_eq!(json, format!("\"{}\"", name.as_str()));
        }
        assert_eq!(CommandName::parse("runtime.start"), None);
    }

    #[test]
    fn validate_rejects_wrong_version() {
        let mut envelope = CommandEnvelope::new("req-1", CommandName::HostPing, serde_json::json!({}));
        envelope.v = 2;
        let err = envelope.validate().unwrap_err();
        assert_eq!(err.kind, ContractErrorKind::UnsupportedVersion);
    }

    #[test]
    fn validate_rejects_blank_request_id() {
        let envelope = CommandEnvelope::new("  ", CommandName::HostPing, serde_json::json!({}));
        let err = envelope.validate().unwrap_err();
        assert_eq!(err.kind, ContractErrorKind::InvalidEnvelope);
    }

    #[test]
    fn payload_defaults_to_null_when_absent() {
        let envelope: CommandEnvelope =
            serde_json::from_str(r#"{"v":1,"request_id":"r","command":"tools.list"}"#)
                .expect("parse");
        assert!(envelope.payload.is_null());
    }

    #[test]
    fn tool_call_arguments_default_to_empty_object() {
        let payload: ToolCallPayload =
            serde_json::from_value(serde_json::json!({"name": "search"})).expect("parse");
        assert_eq!(payload.arguments, serde_json::json!({}));
    }

    #[test]
    fn error_envelope_has_null_payload() {
        let resp = ResponseEnvelope::error("req-1", "boom");
        assert!(!resp.ok);
        assert!(resp.payload.is_null());
        assert_eq!(resp.error.as_deref(), Some("boom"));
    }
}
