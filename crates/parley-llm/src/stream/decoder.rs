//! Incremental text and line reassembly over raw body chunks

/// UTF-8 decoder that carries incomplete multi-byte sequences between chunks
///
/// Invalid sequences decode to U+FFFD, matching a non-fatal text decoder.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Decode `chunk`, appending complete characters to `out`
    pub fn decode(&mut self, chunk: &[u8], out: &mut String) {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));

                    if let Some(invalid_len) = e.error_len() {
                        out.push(char::REPLACEMENT_CHARACTER);
                        rest = &after[invalid_len..];
                    } else {
                        // Truncated sequence at the end of the chunk
                        self.pending = after.to_vec();
                        break;
                    }
                }
            }
        }
    }

    /// Whether bytes of an unfinished character are buffered
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Splits a chunked byte stream into complete `\n`-terminated lines
///
/// Whatever follows the last newline is kept until a later chunk completes
/// it. A trailing `\r` is stripped from each line.
#[derive(Debug, Default)]
pub struct LineDecoder {
    utf8: Utf8Decoder,
    buffer: String,
}

impl LineDecoder {
    /// Feed one chunk and return the lines it completed, in order
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.utf8.decode(chunk, &mut self.buffer);

        let Some(last_newline) = self.buffer.rfind('\n') else {
            return Vec::new();
        };

        let incomplete = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, incomplete);

        complete.lines().map(str::to_owned).collect()
    }

    /// Text received after the last newline
    pub fn remainder(&self) -> &str {
        &self.buffer
    }

    /// Whether any unterminated input is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && !self.utf8.has_pending()
    }
}
