use super::decoder::Utf8Decoder;

/// Reassembles newline-terminated lines from arbitrarily split byte chunks.
///
/// Only complete lines are handed out; the unterminated tail stays buffered until
/// its newline arrives. The tail is bounded by `max_line_bytes`: a line that grows
/// past it is dropped through to its newline.
#[derive(Debug)]
pub struct LineSplitter {
    decoder: Utf8Decoder,
    partial: String,
    max_line_bytes: usize,
    overflowed: bool,
}

impl LineSplitter {
    pub fn new(max_line_bytes: usize) -> Self {
        Self {
            decoder: Utf8Decoder::new(),
            partial: String::new(),
            max_line_bytes,
            overflowed: false,
        }
    }

    /// Feed one chunk and return the lines it completed, without `\n` or `\r\n`.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let text = self.decoder.decode(chunk);
        let mut lines = Vec::new();
        let mut rest = text.as_str();

        while let Some(pos) = rest.find('\n') {
            let head = &rest[..pos];
            rest = &rest[pos + 1..];

            let len = self.partial.len() + head.len();
            if self.overflowed || len > self.max_line_bytes {
                tracing::warn!(
                    len,
                    max = self.max_line_bytes,
                    "skipping malformed stream frame: line exceeds size limit"
                );
                self.partial.clear();
                self.overflowed = false;
                continue;
            }

            let mut line = std::mem::take(&mut self.partial);
            line.push_str(head);
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }

        if !self.overflowed {
            self.partial.push_str(rest);
            if self.partial.len() > self.max_line_bytes {
                self.partial.clear();
                self.overflowed = true;
            }
        }
        lines
    }

    /// Take whatever is left at end of input.
    ///
    /// Returns `None` when nothing but whitespace was pending, so input that ended
    /// exactly on a line boundary is distinguishable from input cut off mid-line.
    pub fn finish(&mut self) -> Option<String> {
        let flushed = self.decoder.finish();
        let mut rest = std::mem::take(&mut self.partial);
        rest.push_str(&flushed);
        let overflowed = std::mem::replace(&mut self.overflowed, false);

        if overflowed || !rest.trim().is_empty() {
            Some(rest)
        } else {
            None
        }
    }
}
