use crate::error::ParseError;
use crate::token::{Token, TokenType};
use tracing::trace;

/// Splits a source string into a series of [`Token`]s, left to right.
///
/// Tokens are produced lazily from a cursor; the stream is restartable by
/// constructing a new lexer, not rewindable mid-stream. The final token
/// before exhaustion is always a zero-length [`TokenType::Eof`] marker
/// positioned at the end of the string.
pub struct Lexer<'a> {
    text: &'a str,
    index: usize,
    current: Token<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Result<Lexer<'a>, ParseError> {
        let mut lexer = Lexer {
            text,
            index: 0,
            current: Token::new(TokenType::Eof, "", text.len()),
        };
        lexer.pick_next()?;
        Ok(lexer)
    }

    /// Returns whether tokens other than the EOF marker remain.
    pub fn has_next(&self) -> bool {
        self.current.ty != TokenType::Eof
    }

    /// Takes the next token. Once the input is exhausted this keeps
    /// returning the EOF marker.
    pub fn next_token(&mut self) -> Result<Token<'a>, ParseError> {
        let current = self.current;
        self.pick_next()?;
        Ok(current)
    }

    fn pick_next(&mut self) -> Result<(), ParseError> {
        while self.index < self.text.len() {
            let part = &self.text[self.index..];

            for ty in TokenType::ALL {
                let len = ty.match_len(part);

                if len > 0 {
                    self.current = Token::new(ty, &part[..len], self.index);
                    self.index += len;
                    trace!(?ty, text = self.current.text, offset = self.current.offset, "token");
                    return Ok(());
                }
            }

            let c = part.chars().next().unwrap_or('\0');
            if !c.is_whitespace() {
                return Err(ParseError::UnknownToken {
                    character: c,
                    offset: self.index,
                });
            }

            self.index += c.len_utf8();
        }

        self.current = Token::new(TokenType::Eof, "", self.text.len());
        Ok(())
    }
}
