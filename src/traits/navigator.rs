//! Navigable location abstraction.
//!
//! The active conversation id is mirrored into a location (a URL with a
//! `chat_id` query parameter) so that reloading restores the conversation.

/// Reads and rewrites the `chat_id` parameter of the current location.
pub trait Navigator {
    /// The `chat_id` parameter of the current location, if any.
    fn chat_id(&self) -> Option<String>;

    /// Rewrite the location in place. `None` removes the parameter.
    ///
    /// Must not trigger a reload of the conversation.
    fn set_chat_id(&mut self, chat_id: Option<&str>) -> std::io::Result<()>;
}
