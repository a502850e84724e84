//! Incremental UTF-8 decoding of a chunked body.

/// Decodes UTF-8 text from arbitrarily split byte chunks.
///
/// A multi-byte sequence cut at a chunk boundary is held back until the
/// rest arrives. Invalid bytes become U+FFFD.
///
/// # Examples
///
/// ```
/// use chatbox_client::Utf8Decoder;
///
/// let mut decoder = Utf8Decoder::default();
/// assert_eq!(decoder.push(b"caf\xC3"), "caf");
/// assert_eq!(decoder.push(b"\xA9"), "\u{e9}");
/// assert_eq!(decoder.finish(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Feeds a chunk and returns the text it completes.
    pub fn push(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);
        let mut text = String::new();

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    text.push_str(valid);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    text.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        Some(bad) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + bad);
                        }
                        None => {
                            // Incomplete sequence at the end: wait for more bytes.
                            self.pending.drain(..valid);
                            break;
                        }
                    }
                }
            }
        }

        text
    }

    /// Flushes bytes still held back when the body ends.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        Some(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_split_of_multibyte_text() {
        let text = "héllo wörld ✓ 🎉";
        let bytes = text.as_bytes();
        for split in 0..=bytes.len() {
            let mut decoder = Utf8Decoder::default();
            let mut out = decoder.push(&bytes[..split]);
            out.push_str(&decoder.push(&bytes[split..]));
            assert_eq!(decoder.finish(), None);
            assert_eq!(out, text, "split at {}", split);
        }
    }

    #[test]
    fn test_byte_at_a_time() {
        let text = "🎉 ok";
        let mut decoder = Utf8Decoder::default();
        let out: String = text.as_bytes().iter().map(|b| decoder.push(&[*b])).collect();
        assert_eq!(out, text);
    }

    #[test]
    fn test_invalid_bytes_replaced() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.push(b"a\xFFb"), "a\u{FFFD}b");
    }

    #[test]
    fn test_truncated_tail_flushed_lossily() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.push(b"ok\xE2\x9C"), "ok");
        assert_eq!(decoder.finish().as_deref(), Some("\u{FFFD}"));
        assert_eq!(decoder.finish(), None);
    }
}
