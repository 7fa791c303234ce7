//! Realtime socket protocol: endpoint URLs and the inbound event envelope.

use serde::{Deserialize, Serialize};

/// Path of the realtime endpoint on the API host.
pub const REALTIME_PATH: &str = "/api/v1/ws";

/// Event type emitted when an artifact moves between workflow states.
pub const ARTIFACT_STATE_CHANGED: &str = "artifact_state_changed";

/// Raw inbound frame. Only `type` is required; everything else is
/// optional so unknown event kinds still decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RealtimeEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub from_state: Option<String>,
    #[serde(default)]
    pub to_state: Option<String>,
}

/// Classified realtime event.
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent {
    ArtifactStateChanged {
        project_id: String,
        artifact_id: Option<String>,
        from_state: Option<String>,
        to_state: Option<String>,
    },
    /// Anything the client does not act on, including state changes that
    /// arrive without a project.
    Ignored { kind: String },
}

impl RealtimeEnvelope {
    /// Decode a text frame. Returns `None` for anything that is not a JSON
    /// object with a string `type`.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    pub fn into_event(self) -> RealtimeEvent {
        match (self.kind.as_str(), self.project_id) {
            (ARTIFACT_STATE_CHANGED, Some(project_id)) => RealtimeEvent::ArtifactStateChanged {
                project_id,
                artifact_id: self.artifact_id,
                from_state: self.from_state,
                to_state: self.to_state,
            },
            _ => RealtimeEvent::Ignored { kind: self.kind },
        }
    }
}

/// Check if a host is a local/development address.
pub fn is_local_address(host: &str) -> bool {
    let host_part = host.split(':').next().unwrap_or(host);
    host_part == "localhost"
        || host_part == "127.0.0.1"
        || host_part == "0.0.0.0"
        || host_part.starts_with("192.168.")
        || host_part.starts_with("10.")
}

/// Convert an HTTP base (`https://host`, `http://host:8080/`, or a bare
/// `host`) into the matching socket origin (`wss://host`, `ws://host:8080`).
pub fn to_ws_origin(base: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if base.starts_with("ws://") || base.starts_with("wss://") {
        base.to_string()
    } else if is_local_address(base) {
        format!("ws://{base}")
    } else {
        format!("wss://{base}")
    }
}

/// Build the authenticated socket URL: `{origin}{path}?token={token}`.
pub fn realtime_url(ws_origin: &str, path: &str, token: &str) -> String {
    let origin = ws_origin.trim_end_matches('/');
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    format!("{origin}{path}?token={}", urlencoding::encode(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_change_with_project_is_actionable() {
        let env = RealtimeEnvelope::parse(
            r#"{"type":"artifact_state_changed","project_id":"P1","artifact_id":"A1","from_state":"Todo","to_state":"Done"}"#,
        )
        .unwrap();
        assert_eq!(
            env.into_event(),
            RealtimeEvent::ArtifactStateChanged {
                project_id: "P1".to_string(),
                artifact_id: Some("A1".to_string()),
                from_state: Some("Todo".to_string()),
                to_state: Some("Done".to_string()),
            }
        );
    }

    #[test]
    fn state_change_without_project_is_ignored() {
        let env = RealtimeEnvelope::parse(r#"{"type":"artifact_state_changed"}"#).unwrap();
        assert!(matches!(env.into_event(), RealtimeEvent::Ignored { .. }));
    }

    #[test]
    fn unknown_kinds_decode_and_malformed_frames_do_not() {
        let env = RealtimeEnvelope::parse(r#"{"type":"unknown_event","extra":1}"#).unwrap();
        assert_eq!(
            env.into_event(),
            RealtimeEvent::Ignored {
                kind: "unknown_event".to_string()
            }
        );
        assert!(RealtimeEnvelope::parse("not json").is_none());
        assert!(RealtimeEnvelope::parse(r#"{"project_id":"P1"}"#).is_none());
        assert!(RealtimeEnvelope::parse(r#"{"type":7}"#).is_none());
    }

    #[test]
    fn socket_origin_follows_http_scheme() {
        assert_eq!(to_ws_origin("https://alm.example.com/"), "wss://alm.example.com");
        assert_eq!(to_ws_origin("http://localhost:8080"), "ws://localhost:8080");
        assert_eq!(to_ws_origin("localhost:8080"), "ws://localhost:8080");
        assert_eq!(to_ws_origin("alm.example.com"), "wss://alm.example.com");
    }

    #[test]
    fn token_is_url_encoded() {
        assert_eq!(
            realtime_url("wss://alm.example.com", REALTIME_PATH, "a b+c/="),
            "wss://alm.example.com/api/v1/ws?token=a%20b%2Bc%2F%3D"
        );
    }
}
