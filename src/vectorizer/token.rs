use std::io::{self, BufRead};

/// letters and the apostrophe form tokens, everything else separates them
#[inline]
pub fn is_token_char(c: char) -> bool {
    c.is_alphabetic() || c == '\''
}

/// Streaming tokenizer
/// Reads UTF-8 text from a `BufRead` and yields lowercase tokens.
///
/// A token is only emitted when a separator follows it, so a run of
/// letters still open at end of stream is dropped.
/// Malformed UTF-8 decodes to U+FFFD, which is a separator.
/// A read error is yielded once and ends the stream.
///
/// # Examples
/// ```
/// use random_index_vectorizer::Tokens;
/// let tokens: Vec<String> = Tokens::new("Don't stop--now!".as_bytes())
///     .collect::<std::io::Result<_>>()
///     .unwrap();
/// assert_eq!(tokens, vec!["don't", "stop", "now"]);
/// ```
pub struct Tokens<R> {
    reader: R,
    word: String,
    done: bool,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            word: String::new(),
            done: false,
        }
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    /// decode the next char; a malformed sequence consumes its valid prefix
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };
        let (width, min, mut code) = match first {
            0x00..=0x7F => return Ok(Some(first as char)),
            0xC2..=0xDF => (2, 0x80, (first & 0x1F) as u32),
            0xE0..=0xEF => (3, 0x800, (first & 0x0F) as u32),
            0xF0..=0xF4 => (4, 0x1_0000, (first & 0x07) as u32),
            _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
        };
        for _ in 1..width {
            match self.peek_byte()? {
                Some(b) if b & 0xC0 == 0x80 => {
                    self.reader.consume(1);
                    code = (code << 6) | (b & 0x3F) as u32;
                }
                _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
            }
        }
        if code < min {
            return Ok(Some(char::REPLACEMENT_CHARACTER));
        }
        Ok(Some(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)))
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.next_char() {
                Ok(Some(c)) => {
                    if is_token_char(c) {
                        self.word.extend(c.to_lowercase());
                    } else if !self.word.is_empty() {
                        return Some(Ok(std::mem::take(&mut self.word)));
                    }
                }
                Ok(None) => {
                    // unterminated trailing run is not a token
                    self.done = true;
                    self.word.clear();
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Tokenize an in-memory string, same rules as `Tokens`
pub fn tokenize(text: &str) -> Vec<String> {
    Tokens::new(text.as_bytes()).filter_map(Result::ok).collect()
}
