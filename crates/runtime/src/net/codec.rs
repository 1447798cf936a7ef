//! Wire encoding for [`NetMessage`].

use thiserror::Error;

use super::message::NetMessage;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode net message")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode net message")]
    Decode(#[source] bincode::Error),
}

pub fn encode(message: &NetMessage) -> Result<Vec<u8>, CodecError> {
    bincode::serialize(message).map_err(CodecError::Encode)
}

pub fn decode(bytes: &[u8]) -> Result<NetMessage, CodecError> {
    bincode::deserialize(bytes).map_err(CodecError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::message::{PeerId, TurnBroadcast};
    use game_core::{Element, ElementPair};

    #[test]
    fn frames_survive_the_wire() {
        let messages = [
            NetMessage::submit(PeerId(7), ElementPair::new(Element::Wind, Element::Fire)),
            NetMessage::ApplyTurn(TurnBroadcast {
                hp_a: 14,
                hp_b: 0,
                line1: "Side A: Great Fireball / Side B: stunned".into(),
                line2: "Side A wins!".into(),
                turn: 5,
            }),
        ];
        for message in messages {
            assert_eq!(decode(&encode(&message).unwrap()).unwrap(), message);
        }
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(decode(&[0xff, 0xff, 0xff, 0xff, 0x01]), Err(CodecError::Decode(_))));
    }
}
