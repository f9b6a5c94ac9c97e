//! Decoding of byte chunks whose boundaries may fall inside a UTF-8 sequence.

const REPLACEMENT: char = '\u{FFFD}';

/// Bytes of a UTF-8 sequence cut off at the end of the previous chunk.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Utf8Carry {
    pending: [u8; 4],
    len: usize,
}

/// Total sequence length announced by a leading byte, if it can start one.
fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// `bytes` is a valid but unfinished sequence.
fn is_truncated(bytes: &[u8]) -> bool {
    bytes
        .first()
        .and_then(|&lead| sequence_len(lead))
        .is_some_and(|need| need > bytes.len())
}

impl Utf8Carry {
    /// Decodes `bytes` after whatever the previous call left unfinished,
    /// handing each scalar to `emit`.
    ///
    /// A sequence cut off at the end of `bytes` is held back for the next
    /// call. Invalid sequences come out as U+FFFD, one per maximal invalid
    /// prefix.
    pub(crate) fn decode(&mut self, bytes: &[u8], mut emit: impl FnMut(char)) {
        let mut input = bytes;

        if self.len > 0 {
            let carried = self.len;
            let take = input.len().min(self.pending.len() - carried);
            let mut buf = self.pending;
            buf[carried..carried + take].copy_from_slice(&input[..take]);
            let window = &buf[..carried + take];

            let (ch, n) = bstr::decode_utf8(window);
            match ch {
                Some(ch) => emit(ch),
                None if n == window.len() && is_truncated(window) => {
                    self.pending = buf;
                    self.len = window.len();
                    return;
                }
                None => emit(REPLACEMENT),
            }
            self.len = 0;
            input = &input[n.saturating_sub(carried)..];
        }

        while !input.is_empty() {
            let (ch, n) = bstr::decode_utf8(input);
            match ch {
                Some(ch) => emit(ch),
                None if n == input.len() && is_truncated(input) => {
                    self.pending[..n].copy_from_slice(input);
                    self.len = n;
                    return;
                }
                None => emit(REPLACEMENT),
            }
            input = &input[n..];
        }
    }

    /// Returns `true` if a cut-off sequence is waiting for more bytes.
    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.len > 0
    }
}
