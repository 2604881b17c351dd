//! Send lifecycle state machine.
//!
//! `Idle → Sending → Streaming → Done | Failed`. `Streaming` re-enters itself
//! on every chunk. A new send is only accepted when no reply is in flight.

use crate::error::{ChatError, ChatResult};

/// Where the current send is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendPhase {
    /// Nothing has been sent yet in this session
    #[default]
    Idle,
    /// Request issued, waiting for the response head
    Sending,
    /// Body is arriving; `chunks` counts decoded chunks so far
    Streaming { chunks: usize },
    /// Last reply finished normally
    Done,
    /// Last reply failed and was replaced by the apology
    Failed,
}

impl SendPhase {
    /// True while a request or its body is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, SendPhase::Sending | SendPhase::Streaming { .. })
    }

    /// Enter `Sending`. Rejected while another reply is in flight.
    pub fn begin_send(&mut self) -> ChatResult<()> {
        if self.is_busy() {
            return Err(ChatError::SendInProgress);
        }
        *self = SendPhase::Sending;
        Ok(())
    }

    /// Record one decoded chunk.
    pub fn on_chunk(&mut self) {
        *self = match *self {
            SendPhase::Sending => SendPhase::Streaming { chunks: 1 },
            SendPhase::Streaming { chunks } => SendPhase::Streaming { chunks: chunks + 1 },
            // Chunks outside a send are ignored.
            other => other,
        };
    }

    /// The body ended normally.
    pub fn finish(&mut self) {
        if self.is_busy() {
            *self = SendPhase::Done;
        }
    }

    /// The request or the body failed.
    pub fn fail(&mut self) {
        if self.is_busy() {
            *self = SendPhase::Failed;
        }
    }
}
