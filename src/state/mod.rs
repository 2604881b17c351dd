//! Conversation state: the active id, the pending attachment, the send phase
//! and the navigable location they are mirrored into.

pub mod location;
mod phase;
mod session;

pub use location::{Location, CHAT_ID_PARAM};
pub use phase::SendPhase;
pub use session::SessionState;
