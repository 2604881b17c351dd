//! Stream decoding: bytes in, ordered text chunks out.
//!
//! [`text_chunks`] wraps a response body in a pull loop. Each pull reads one
//! byte chunk, decodes it with a stateful [`Utf8Decoder`] and yields the text,
//! skipping pulls that only completed part of a character. The stream ends
//! exactly when the body ends; there is no timeout and no cancellation.

mod accumulator;
mod decoder;

pub use accumulator::Accumulator;
pub use decoder::Utf8Decoder;

use bytes::Bytes;
use futures::Stream;
use futures_util::stream;
use futures_util::StreamExt;

use crate::error::StreamError;
use crate::traits::HttpError;

/// Turn a byte stream into a stream of decoded text chunks, in order.
///
/// After a transport error the stream yields that error and ends.
pub fn text_chunks<S>(bytes: S) -> impl Stream<Item = Result<String, StreamError>>
where
    S: Stream<Item = Result<Bytes, HttpError>> + Unpin,
{
    stream::unfold(
        Some((bytes, Utf8Decoder::new())),
        |state| async move {
            let Some((mut bytes, mut decoder)) = state else {
                return None;
            };
            loop {
                match bytes.next().await {
                    Some(Ok(chunk)) => {
                        let text = decoder.decode(&chunk);
                        if !text.is_empty() {
                            return Some((Ok(text), Some((bytes, decoder))));
                        }
                        // Nothing complete yet: pull again.
                    }
                    Some(Err(e)) => {
                        tracing::debug!("Stream failed after data: {}", e);
                        return Some((Err(StreamError::from(e)), None));
                    }
                    None => {
                        let tail = decoder.finish();
                        if tail.is_empty() {
                            return None;
                        }
                        return Some((Ok(tail), None));
                    }
                }
            }
        },
    )
}
