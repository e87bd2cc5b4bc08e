// src/loader/nonfinite.rs

//! Reader adapter for documents carrying non-finite number literals
//!
//! Exporters that dump floating point columns straight to JSON often write the
//! bare tokens `NaN`, `Infinity` and `-Infinity`, which are not valid JSON.
//! `NonFiniteLiterals` quotes each of those tokens on the fly (`NaN` becomes
//! `"NaN"`) while leaving string contents untouched, so the document can be
//! streamed through `serde_json` without buffering it whole. Numeric fields
//! parse the quoted token back to a non-finite value and drop it; text fields
//! keep the token's text.

use std::collections::VecDeque;
use std::io::{self, Read};

static TOKENS: [&[u8]; 3] = [b"NaN", b"Infinity", b"-Infinity"];
const CHUNK_SIZE: usize = 8 * 1024;

/// Streaming rewrite of bare `NaN` / `Infinity` / `-Infinity` to JSON strings
pub struct NonFiniteLiterals<R> {
    inner: R,
    chunk: Box<[u8]>,
    output: VecDeque<u8>,
    /// Bytes that may still turn out to be a non-finite token
    candidate: Vec<u8>,
    in_string: bool,
    escaped: bool,
    eof: bool,
}

impl<R: Read> NonFiniteLiterals<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            chunk: vec![0u8; CHUNK_SIZE].into_boxed_slice(),
            output: VecDeque::with_capacity(CHUNK_SIZE),
            candidate: Vec::with_capacity(16),
            in_string: false,
            escaped: false,
            eof: false,
        }
    }

    fn fill(&mut self) -> io::Result<()> {
        let n = loop {
            match self.inner.read(&mut self.chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };

        if n == 0 {
            self.eof = true;
            let pending = std::mem::take(&mut self.candidate);
            self.output.extend(pending);
            return Ok(());
        }

        for i in 0..n {
            let byte = self.chunk[i];
            self.push(byte);
        }
        Ok(())
    }

    fn push(&mut self, byte: u8) {
        if self.in_string {
            self.output.push_back(byte);
            if self.escaped {
                self.escaped = false;
            } else if byte == b'\\' {
                self.escaped = true;
            } else if byte == b'"' {
                self.in_string = false;
            }
            return;
        }

        if !self.candidate.is_empty() {
            self.candidate.push(byte);
            if let Some(token) = TOKENS.iter().find(|t| t.starts_with(&self.candidate)) {
                if token.len() == self.candidate.len() {
                    self.candidate.clear();
                    self.output.push_back(b'"');
                    self.output.extend(token.iter().copied());
                    self.output.push_back(b'"');
                }
                return;
            }
            // Not a non-finite token after all: release all but the new byte
            // unchanged and scan the new byte on its own.
            self.candidate.pop();
            let released = std::mem::take(&mut self.candidate);
            self.output.extend(released);
        }

        match byte {
            b'N' | b'I' | b'-' => self.candidate.push(byte),
            b'"' => {
                self.in_string = true;
                self.output.push_back(byte);
            }
            _ => self.output.push_back(byte),
        }
    }
}

impl<R: Read> Read for NonFiniteLiterals<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.output.is_empty() && !self.eof {
            self.fill()?;
        }

        let n = buf.len().min(self.output.len());
        for (slot, byte) in buf.iter_mut().zip(self.output.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(input: &str) -> String {
        let mut out = String::new();
        NonFiniteLiterals::new(input.as_bytes())
            .read_to_string(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_rewrites_bare_tokens() {
        assert_eq!(
            rewrite(r#"{"a": NaN, "b": Infinity, "c": -Infinity}"#),
            r#"{"a": "NaN", "b": "Infinity", "c": "-Infinity"}"#
        );
    }

    #[test]
    fn test_leaves_strings_alone() {
        let input = r#"{"title": "NaN Infinity -Infinity \"NaN\"", "rating": "NaN"}"#;
        assert_eq!(rewrite(input), input);
    }

    #[test]
    fn test_leaves_negative_numbers_alone() {
        assert_eq!(rewrite("[-1, -2.5e3,NaN]"), r#"[-1, -2.5e3,"NaN"]"#);
    }

    #[test]
    fn test_unfinished_token_passes_through() {
        assert_eq!(rewrite("[Na"), "[Na");
        assert_eq!(rewrite("[Nope]"), "[Nope]");
    }

    #[test]
    fn test_tokens_split_across_reads() {
        struct OneByte<'a>(&'a [u8]);

        impl Read for OneByte<'_> {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.0.is_empty() || buf.is_empty() {
                    return Ok(0);
                }
                buf[0] = self.0[0];
                self.0 = &self.0[1..];
                Ok(1)
            }
        }

        let mut out = String::new();
        NonFiniteLiterals::new(OneByte(b"{\"x\":-Infinity}"))
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "{\"x\":\"-Infinity\"}");
    }

    #[test]
    fn test_output_parses_as_json() {
        let reader = NonFiniteLiterals::new(r#"{"1": {"rating": NaN}}"#.as_bytes());
        let value: serde_json::Value = serde_json::from_reader(reader).unwrap();
        assert_eq!(value["1"]["rating"], "NaN");
    }
}
