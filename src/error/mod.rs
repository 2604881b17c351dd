//! Error handling for the chat client.
//!
//! - **Error Categories**: coarse classification for logging and messaging
//! - **Domain-specific Errors**: network, stream and view errors
//! - **Unified Error Type**: [`ChatError`] with `From` conversions
//!
//! Policy: transport failures end a single send with an apology in the
//! assistant bubble, malformed list/detail payloads are returned to the
//! caller, and missing view targets are logged. Nothing here ends the session.

mod category;
mod chat_error;
mod network;
mod stream;
mod view;

pub use category::ErrorCategory;
pub use chat_error::{ChatError, ChatResult};
pub use network::NetworkError;
pub use stream::StreamError;
pub use view::ViewError;
