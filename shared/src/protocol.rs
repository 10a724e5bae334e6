//! Wire envelopes exchanged over the WebSocket.
//!
//! Every frame is a JSON object tagged by a `type` field with camelCase
//! payload fields, e.g. `{"type":"playerMoved","playerId":"player_1","x":394,"y":384}`.

use crate::Player;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("envelope has no type discriminator")]
    MissingType,
    #[error("unrecognized message type: {0}")]
    UnknownType(String),
}

/// Messages a client may send to the server.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// `direction` is kept as the raw symbol; unknown symbols resolve to no movement.
    Movement { direction: String },
    Chat { message: String },
}

impl ClientMessage {
    pub const TYPES: [&'static str; 2] = ["movement", "chat"];
}

/// Messages the server sends to clients.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    Init {
        player_id: String,
        player_state: Player,
        world_size: f32,
        player_size: f32,
    },
    CurrentPlayers {
        players: HashMap<String, Player>,
    },
    PlayerJoined {
        player: Player,
    },
    PlayerMoved {
        player_id: String,
        x: f32,
        y: f32,
    },
    Chat {
        sender: String,
        message: String,
    },
    PlayerLeft {
        player_id: String,
    },
}

pub fn encode<T: Serialize>(message: &T) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(message)?)
}

/// Parses an inbound client frame.
///
/// Well-formed JSON carrying a `type` the server does not know yields
/// [`ProtocolError::UnknownType`] so callers can tell it apart from garbage.
pub fn decode_client(text: &str) -> Result<ClientMessage, ProtocolError> {
    let value: Value = serde_json::from_str(text)?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingType)?;

    if !ClientMessage::TYPES.iter().any(|known| *known == kind) {
        return Err(ProtocolError::UnknownType(kind.to_string()));
    }

    Ok(serde_json::from_value(value)?)
}

pub fn decode_server(text: &str) -> Result<ServerMessage, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PLAYER_SIZE, WORLD_SIZE};

    fn sample_player(n: u32) -> Player {
        Player::new(format!("player_{}", n), format!("Player {}", n), "#123abc")
    }

    #[test]
    fn test_client_movement_wire_format() {
        let message = decode_client(r#"{"type":"movement","direction":"left"}"#).unwrap();
        assert_eq!(
            message,
            ClientMessage::Movement {
                direction: "left".to_string()
            }
        );
    }

    #[test]
    fn test_client_chat_wire_format() {
        let message = decode_client(r#"{"type":"chat","message":"<b>hi</b>"}"#).unwrap();
        assert_eq!(
            message,
            ClientMessage::Chat {
                message: "<b>hi</b>".to_string()
            }
        );
    }

    #[test]
    fn test_init_wire_format() {
        let message = ServerMessage::Init {
            player_id: "player_1".to_string(),
            player_state: sample_player(1),
            world_size: WORLD_SIZE,
            player_size: PLAYER_SIZE,
        };
        let value: Value = serde_json::from_str(&encode(&message).unwrap()).unwrap();

        assert_eq!(value["type"], "init");
        assert_eq!(value["playerId"], "player_1");
        assert_eq!(value["playerState"]["name"], "Player 1");
        assert_eq!(value["worldSize"], 800.0);
        assert_eq!(value["playerSize"], 32.0);
    }

    #[test]
    fn test_server_messages_roundtrip() {
        let mut players = HashMap::new();
        players.insert("player_1".to_string(), sample_player(1));
        players.insert("player_2".to_string(), sample_player(2));

        let messages = vec![
            ServerMessage::Init {
                player_id: "player_1".to_string(),
                player_state: sample_player(1),
                world_size: WORLD_SIZE,
                player_size: PLAYER_SIZE,
            },
            ServerMessage::CurrentPlayers { players },
            ServerMessage::PlayerJoined {
                player: sample_player(2),
            },
            ServerMessage::PlayerMoved {
                player_id: "player_2".to_string(),
                x: 394.0,
                y: 0.0,
            },
            ServerMessage::Chat {
                sender: "Player 1".to_string(),
                message: "hello".to_string(),
            },
            ServerMessage::PlayerLeft {
                player_id: "player_2".to_string(),
            },
        ];

        for message in messages {
            let text = encode(&message).unwrap();
            assert_eq!(decode_server(&text).unwrap(), message, "roundtrip of {}", text);
        }
    }

    #[test]
    fn test_client_messages_roundtrip() {
        let messages = vec![
            ClientMessage::Movement {
                direction: "down".to_string(),
            },
            ClientMessage::Chat {
                message: "{\"type\":\"movement\"} \u{1f600}".to_string(),
            },
        ];

        for message in messages {
            let text = encode(&message).unwrap();
            assert_eq!(decode_client(&text).unwrap(), message, "roundtrip of {}", text);
        }
    }

    #[test]
    fn test_player_moved_uses_camel_case() {
        let text = encode(&ServerMessage::PlayerMoved {
            player_id: "player_3".to_string(),
            x: 1.5,
            y: 2.0,
        })
        .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["type"], "playerMoved");
        assert_eq!(value["playerId"], "player_3");
        assert!(value.get("player_id").is_none());
    }

    #[test]
    fn test_malformed_payloads() {
        for text in ["", "not json", "{\"type\":", "[1,2,3]", "42"] {
            let result = decode_client(text);
            assert!(
                matches!(
                    result,
                    Err(ProtocolError::Malformed(_)) | Err(ProtocolError::MissingType)
                ),
                "expected parse failure for {:?}",
                text
            );
        }
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        let result = decode_client(r#"{"type":"movement"}"#);
        assert!(matches!(result, Err(ProtocolError::Malformed(_))));

        let result = decode_client(r#"{"type":"chat","message":5}"#);
        assert!(matches!(result, Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn test_missing_type() {
        let result = decode_client(r#"{"direction":"up"}"#);
        assert!(matches!(result, Err(ProtocolError::MissingType)));
    }

    #[test]
    fn test_unknown_type() {
        match decode_client(r#"{"type":"teleport","x":1}"#) {
            Err(ProtocolError::UnknownType(kind)) => assert_eq!(kind, "teleport"),
            other => panic!("Unexpected decode result: {:?}", other),
        }
    }
}
