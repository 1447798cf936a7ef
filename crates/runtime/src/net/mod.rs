//! Two-peer network play.
//!
//! One peer per room is the authority: it buffers both peers' picks, resolves
//! the turn through the same [`game_core::TurnEngine`] used offline and
//! broadcasts the outcome. Every peer, the authority included, applies that
//! broadcast through [`ClientSync`].
//!
//! - [`message`]: wire messages and peer identity
//! - [`codec`]: bincode framing of [`NetMessage`]
//! - [`room`]: membership, authority election and side assignment
//! - [`authority`]: pending-pick buffer and turn resolution
//! - [`sync`]: idempotent application of broadcasts on each peer
//! - [`transport`]: transport abstraction and an in-process loopback hub

pub mod authority;
pub mod codec;
pub mod message;
pub mod room;
pub mod sync;
pub mod transport;

pub use authority::NetworkAuthority;
pub use codec::{CodecError, decode, encode};
pub use message::{NetMessage, PeerId, TurnBroadcast};
pub use room::{Room, SideAssignment};
pub use sync::{ApplyOutcome, ClientSync, SyncError};
pub use transport::{LoopbackEndpoint, LoopbackHub, Transport, TransportError, TransportEvent};
