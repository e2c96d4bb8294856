use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use clinica_mcp::{decode_line, Response};

use crate::app_state::AppState;
use crate::dispatcher::dispatch;

const READ_CHUNK: usize = 8192;

/// Accumulates raw input bytes and hands out complete lines.
///
/// Works on bytes rather than text so a UTF-8 sequence split across two
/// reads is reassembled before decoding.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completes, without the `\n`.
    /// The trailing partial segment stays buffered.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        self.pending.extend_from_slice(chunk);

        let Some(last) = self.pending.iter().rposition(|&b| b == b'\n') else {
            return Vec::new();
        };

        let rest = self.pending.split_off(last + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        complete[..last]
            .split(|&b| b == b'\n')
            .map(<[u8]>::to_vec)
            .collect()
    }

    /// Bytes received since the last newline.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Reads request lines from a byte stream and writes one response line per
/// decoded request, strictly in input order.
pub struct StreamDispatcher {
    state: AppState,
    buffer: LineBuffer,
}

impl StreamDispatcher {
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            buffer: LineBuffer::new(),
        }
    }

    /// Pump `reader` until end of input.
    ///
    /// An unterminated line left at end of input is discarded.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if reading input or writing output fails.
    pub async fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut chunk = vec![0u8; READ_CHUNK];
        loop {
            let n = reader.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            self.on_chunk(&chunk[..n], &mut writer).await?;
        }

        if !self.buffer.is_empty() {
            tracing::debug!(
                bytes = self.buffer.pending().len(),
                "discarding unterminated line at end of input"
            );
        }
        tracing::info!("input closed");
        Ok(())
    }

    /// Feed one chunk of input. Each completed line is handled and answered
    /// before the next one is looked at.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if writing a response fails.
    pub async fn on_chunk<W>(&mut self, chunk: &[u8], writer: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        for line in self.buffer.push(chunk) {
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };

            match response.to_line() {
                Ok(bytes) => {
                    writer.write_all(&bytes).await?;
                    writer.flush().await?;
                }
                Err(e) => tracing::error!("failed to encode response: {e}"),
            }
        }
        Ok(())
    }

    /// Decode and dispatch a single line. Malformed lines have no id to
    /// answer to and yield `None`.
    pub async fn handle_line(&self, line: &[u8]) -> Option<Response> {
        match decode_line(line) {
            Ok(req) => Some(dispatch(&self.state, req).await),
            Err(err) => {
                tracing::warn!(bytes = line.len(), "dropping line: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_newline_keeps_everything() {
        let mut buf = LineBuffer::new();
        assert!(buf.push(b"{\"id\":1,\"typ").is_empty());
        assert_eq!(buf.pending(), b"{\"id\":1,\"typ");
    }

    #[test]
    fn line_completed_across_chunks() {
        let mut buf = LineBuffer::new();
        buf.push(b"{\"id\":1,\"typ");
        let lines = buf.push(b"e\":\"listTools\"}\n");
        assert_eq!(lines, vec![b"{\"id\":1,\"type\":\"listTools\"}".to_vec()]);
        assert!(buf.is_empty());
    }

    #[test]
    fn several_lines_and_a_tail() {
        let mut buf = LineBuffer::new();
        let lines = buf.push(b"a\nb\nc");
        assert_eq!(lines, vec![b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(buf.pending(), b"c");
    }

    #[test]
    fn empty_lines_are_lines() {
        let mut buf = LineBuffer::new();
        assert_eq!(buf.push(b"\n\n"), vec![Vec::<u8>::new(), Vec::new()]);
    }

    #[test]
    fn split_utf8_sequence_is_reassembled() {
        let text = "{\"nome\":\"João\"}\n".as_bytes();
        let split = text.iter().position(|&b| b > 0x7f).unwrap() + 1;

        let mut buf = LineBuffer::new();
        assert!(buf.push(&text[..split]).is_empty());
        let lines = buf.push(&text[split..]);
        assert_eq!(lines, vec![text[..text.len() - 1].to_vec()]);
        assert!(std::str::from_utf8(&lines[0]).is_ok());
    }
}
