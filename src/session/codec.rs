//! Codec for newline delimited JSON messages

use bytes::{BufMut, BytesMut};
use serde::{de::DeserializeOwned, Serialize};
use std::{io, marker::PhantomData};
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};

use super::models::{Request, Response};

/// Maximum length of a single message line in bytes
pub const MAX_FRAME_LENGTH: usize = 8 * 1024;

/// Codec used by the server, reads requests and writes responses
pub type ServerCodec = MessageCodec<Request, Response>;

/// Errors that can occur while reading or writing messages
#[derive(Debug, Error)]
pub enum CodecError {
    /// Underlying transport failed
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Message wasn't valid JSON for the expected type
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    /// Message exceeded [`MAX_FRAME_LENGTH`] without a line ending
    #[error("message exceeded maximum length ({0} bytes)")]
    FrameTooLong(usize),
}

/// Tokio codec decoding `D` messages and encoding `E` messages, each
/// message is a single line of JSON
pub struct MessageCodec<D, E> {
    /// Offset into the buffer that has already been scanned for a line ending
    next_index: usize,
    _marker: PhantomData<fn() -> (D, E)>,
}

impl<D, E> Default for MessageCodec<D, E> {
    fn default() -> Self {
        Self {
            next_index: 0,
            _marker: PhantomData,
        }
    }
}

/// Checks whether a line only contains whitespace
fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

impl<D, E> Decoder for MessageCodec<D, E>
where
    D: DeserializeOwned,
{
    type Item = D;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let newline = src[self.next_index..]
                .iter()
                .position(|byte| *byte == b'\n');

            let end = match newline {
                Some(offset) => self.next_index + offset,
                None => {
                    if src.len() > MAX_FRAME_LENGTH {
                        return Err(CodecError::FrameTooLong(src.len()));
                    }

                    // Skip the scanned portion next time more data arrives
                    self.next_index = src.len();
                    return Ok(None);
                }
            };

            self.next_index = 0;

            if end > MAX_FRAME_LENGTH {
                return Err(CodecError::FrameTooLong(end));
            }

            let line = src.split_to(end + 1);
            let line = &line[..end];

            // Empty lines between messages are ignored
            if is_blank(line) {
                continue;
            }

            let message = serde_json::from_slice(line)?;
            return Ok(Some(message));
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(message) = self.decode(buf)? {
            return Ok(Some(message));
        }

        self.next_index = 0;

        // Final message is allowed to omit its line ending
        let line = buf.split();
        if is_blank(&line) {
            return Ok(None);
        }

        let message = serde_json::from_slice(&line)?;
        Ok(Some(message))
    }
}

impl<D, E> Encoder<E> for MessageCodec<D, E>
where
    E: Serialize,
{
    type Error = CodecError;

    fn encode(&mut self, item: E, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let bytes = serde_json::to_vec(&item)?;
        dst.reserve(bytes.len() + 1);
        dst.put_slice(&bytes);
        dst.put_u8(b'\n');
        Ok(())
    }
}
