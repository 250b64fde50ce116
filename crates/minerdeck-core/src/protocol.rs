//! Host wire types.
//!
//! Events arrive as JSON objects tagged by `event`; commands are sent back in
//! the same envelope shape (`event`, `context`, `payload`).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::settings::TileSettings;

/// Opaque host handle identifying one tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileContext(String);

impl TileContext {
    pub fn new(context: impl Into<String>) -> Self {
        Self(context.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SettingsPayload {
    #[serde(default)]
    pub settings: Option<TileSettings>,
}

/// Lifecycle events delivered by the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum HostEvent {
    /// Host connection established.
    Connected,
    /// Tile became visible.
    WillAppear {
        context: TileContext,
        #[serde(default)]
        payload: Option<SettingsPayload>,
    },
    /// Tile pressed and released.
    KeyUp { context: TileContext },
    /// Message from the settings UI.
    SendToPlugin {
        context: TileContext,
        #[serde(default)]
        payload: Value,
    },
    /// Settings changed.
    DidReceiveSettings {
        context: TileContext,
        #[serde(default)]
        payload: Option<SettingsPayload>,
    },
    PropertyInspectorDidAppear { context: TileContext },
    PropertyInspectorDidDisappear { context: TileContext },
}

impl HostEvent {
    /// Wire names of every event the tile handles.
    pub const NAMES: [&'static str; 7] = [
        "connected",
        "willAppear",
        "keyUp",
        "sendToPlugin",
        "didReceiveSettings",
        "propertyInspectorDidAppear",
        "propertyInspectorDidDisappear",
    ];

    /// Parses one JSON line from the host.
    ///
    /// # Errors
    /// Returns the serde error for malformed JSON or unknown event names.
    pub fn from_json(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::Connected => "connected",
            HostEvent::WillAppear { .. } => "willAppear",
            HostEvent::KeyUp { .. } => "keyUp",
            HostEvent::SendToPlugin { .. } => "sendToPlugin",
            HostEvent::DidReceiveSettings { .. } => "didReceiveSettings",
            HostEvent::PropertyInspectorDidAppear { .. } => "propertyInspectorDidAppear",
            HostEvent::PropertyInspectorDidDisappear { .. } => "propertyInspectorDidDisappear",
        }
    }
}

/// Commands sent back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Replace the tile image with a data URI.
    SetImage { context: TileContext, image: String },
    /// Remove any title text the host draws over the image.
    ClearTitle { context: TileContext },
}

impl HostCommand {
    pub fn context(&self) -> &TileContext {
        match self {
            HostCommand::SetImage { context, .. } | HostCommand::ClearTitle { context } => context,
        }
    }

    /// Host envelope for this command.
    pub fn to_wire(&self) -> Value {
        match self {
            HostCommand::SetImage { context, image } => json!({
                "event": "setImage",
                "context": context,
                "payload": { "image": image, "target": 0 }
            }),
            HostCommand::ClearTitle { context } => json!({
                "event": "setTitle",
                "context": context,
                "payload": { "title": "", "target": 0 }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_will_appear_with_settings() {
        let event = HostEvent::from_json(
            r#"{"event":"willAppear","action":"io.minerdeck.status","context":"ctx-1","device":"dev","payload":{"settings":{"minerId":"0xabc","poolApiUrl":"https://api.ethermine.org"},"coordinates":{"column":0,"row":0}}}"#,
        )
        .unwrap();

        let HostEvent::WillAppear { context, payload } = event else {
            panic!("expected willAppear, got {event:?}");
        };
        assert_eq!(context.as_str(), "ctx-1");
        let settings = payload.unwrap().settings.unwrap();
        assert_eq!(settings.miner_id.as_deref(), Some("0xabc"));
    }

    #[test]
    fn test_parses_events_without_payload() {
        let event = HostEvent::from_json(r#"{"event":"keyUp","context":"ctx-2"}"#).unwrap();
        assert_eq!(
            event,
            HostEvent::KeyUp {
                context: TileContext::new("ctx-2")
            }
        );

        let event = HostEvent::from_json(r#"{"event":"connected"}"#).unwrap();
        assert_eq!(event, HostEvent::Connected);

        let event =
            HostEvent::from_json(r#"{"event":"didReceiveSettings","context":"ctx-3"}"#).unwrap();
        assert_eq!(
            event,
            HostEvent::DidReceiveSettings {
                context: TileContext::new("ctx-3"),
                payload: None
            }
        );
    }

    #[test]
    fn test_key_up_ignores_payload() {
        let event = HostEvent::from_json(
            r#"{"event":"keyUp","context":"ctx","payload":{"settings":{},"state":0}}"#,
        )
        .unwrap();
        assert_eq!(event.name(), "keyUp");
    }

    #[test]
    fn test_rejects_unknown_event() {
        assert!(HostEvent::from_json(r#"{"event":"dialRotate","context":"ctx"}"#).is_err());
        assert!(HostEvent::from_json("not json").is_err());
    }

    #[test]
    fn test_names_cover_every_variant() {
        let context = TileContext::new("ctx");
        let events = [
            HostEvent::Connected,
            HostEvent::WillAppear {
                context: context.clone(),
                payload: None,
            },
            HostEvent::KeyUp {
                context: context.clone(),
            },
            HostEvent::SendToPlugin {
                context: context.clone(),
                payload: Value::Null,
            },
            HostEvent::DidReceiveSettings {
                context: context.clone(),
                payload: None,
            },
            HostEvent::PropertyInspectorDidAppear {
                context: context.clone(),
            },
            HostEvent::PropertyInspectorDidDisappear { context },
        ];
        let names: Vec<&str> = events.iter().map(HostEvent::name).collect();
        assert_eq!(names, HostEvent::NAMES);
    }

    #[test]
    fn test_command_wire_shape() {
        let context = TileContext::new("ctx-9");
        let set_image = HostCommand::SetImage {
            context: context.clone(),
            image: "data:image/png;base64,AAAA".to_string(),
        };
        assert_eq!(
            set_image.to_wire(),
            json!({
                "event": "setImage",
                "context": "ctx-9",
                "payload": { "image": "data:image/png;base64,AAAA", "target": 0 }
            })
        );

        let clear = HostCommand::ClearTitle { context };
        assert_eq!(clear.to_wire()["event"], "setTitle");
        assert_eq!(clear.to_wire()["payload"]["title"], "");
        assert_eq!(clear.context().as_str(), "ctx-9");
    }
}
