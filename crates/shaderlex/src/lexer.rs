//! Pull-based tokenizer for ShaderToy-style GLSL extended with the preview
//! directives (`#include`, `#iChannel<n>`, `#iKeyboard`, `#iUniform`) and the
//! inline texture setting words (`MinFilter`, `MagFilter`, `WrapMode`, `Type`).
//!
//! The lexer never fails on malformed input. Unterminated strings and block
//! comments run to the end of the text, characters outside every class become
//! `Unknown` tokens, and `#words` that are not preview directives are skipped
//! without producing a token.
use crate::cursor::{CursorError, SourceCursor};
use crate::token::{LineRange, Token, TokenKind};

const PREPROCESSOR_KEYWORDS: [&str; 3] = ["include", "iKeyboard", "iUniform"];
const CHANNEL_DIRECTIVE_PREFIX: &str = "iChannel";
const KEYWORDS: [&str; 5] = ["MinFilter", "MagFilter", "WrapMode", "Type", "in"];
const TYPES: [&str; 8] = [
    "float", "vec2", "vec3", "vec4", "int", "ivec2", "ivec3", "ivec4",
];

fn is_preprocessor_keyword(word: &str) -> bool {
    PREPROCESSOR_KEYWORDS.contains(&word) || word.starts_with(CHANNEL_DIRECTIVE_PREFIX)
}

fn is_quotation(ch: char) -> bool {
    ch == '\'' || ch == '"'
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_operator(ch: char) -> bool {
    "=*/+-%~&|<>?!^".contains(ch)
}

fn is_punctuation(ch: char) -> bool {
    ".,:;()[]{}".contains(ch)
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n' | '\\')
}

#[derive(Debug, Clone, Default)]
pub struct Lexer {
    cursor: SourceCursor,
    /// Result of the last `peek`; `Some(None)` caches a skipped `#word`.
    peeked: Option<Option<Token>>,
    peek_range: LineRange,
    peek_line: usize,
    last_range: LineRange,
    last_line: usize,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        Self {
            cursor: SourceCursor::new(text),
            ..Self::default()
        }
    }

    /// Restarts lexing over `text` at the character offset `position`,
    /// dropping any token cached by [`Lexer::peek`].
    pub fn reset(&mut self, text: &str, position: usize) -> Result<(), CursorError> {
        self.cursor.reset(text, position)?;
        self.peeked = None;
        self.peek_range = LineRange {
            begin: position,
            end: position,
        };
        self.last_range = self.peek_range;
        self.peek_line = self.cursor.current_line();
        self.last_line = self.peek_line;
        Ok(())
    }

    /// True once the text is exhausted and no lookahead token is pending.
    pub fn eof(&self) -> bool {
        !matches!(self.peeked, Some(Some(_))) && self.cursor.eof()
    }

    /// 0-based line of the last character the cursor consumed.
    pub fn current_line(&self) -> usize {
        self.cursor.current_line()
    }

    /// Range of the token returned by the most recent [`Lexer::next`].
    pub fn last_range(&self) -> LineRange {
        self.last_range
    }

    /// 0-based line the token returned by the most recent [`Lexer::next`] starts on.
    pub fn last_line(&self) -> usize {
        self.last_line
    }

    /// Lexes and caches the next token. Repeated calls return the same result
    /// until [`Lexer::next`] consumes it.
    pub fn peek(&mut self) -> Option<&Token> {
        if self.peeked.is_none() {
            self.peeked = Some(self.read_next());
            self.peek_range.end = self.cursor.pos();
        }
        self.peeked.as_ref().and_then(Option::as_ref)
    }

    /// Returns the next token. `None` with `eof() == false` means the call
    /// consumed an unrecognized `#word` and the caller should advance again.
    pub fn next(&mut self) -> Option<Token> {
        self.peek();
        let token = self.peeked.take().flatten();
        self.last_range = self.peek_range;
        self.last_line = self.peek_line;
        token
    }

    fn read_next(&mut self) -> Option<Token> {
        self.skip_trivia();

        self.peek_range.begin = self.cursor.pos();
        self.peek_line = self.cursor.current_line();
        if self.cursor.eof() {
            return None;
        }

        let ch = self.cursor.peek(0);
        if is_quotation(ch) {
            return Some(self.read_string(ch));
        }
        if ch.is_ascii_digit() {
            return Some(self.read_number());
        }
        if is_identifier_start(ch) {
            return Some(self.read_identifier());
        }
        if ch == '#' {
            self.cursor.next();
            let identifier = self.read_identifier();
            let recognized = identifier
                .value
                .as_str()
                .is_some_and(is_preprocessor_keyword);
            if recognized {
                return Some(Token {
                    kind: TokenKind::PreprocessorKeyword,
                    ..identifier
                });
            }
            tracing::trace!(
                directive = %identifier.value,
                line = self.peek_line,
                "skipping unrecognized preprocessor directive"
            );
            return None;
        }
        if is_punctuation(ch) {
            if ch == ':' && self.cursor.peek(1) == ':' {
                self.cursor.next();
                self.cursor.next();
                return Some(Token::text(TokenKind::Punctuation, "::"));
            }
            let ch = self.cursor.next();
            return Some(Token::text(TokenKind::Punctuation, ch));
        }
        if is_operator(ch) {
            let ch = self.cursor.next();
            return Some(Token::text(TokenKind::Operator, ch));
        }

        let ch = self.cursor.next();
        Some(Token::text(TokenKind::Unknown, ch))
    }

    fn skip_trivia(&mut self) {
        loop {
            self.next_while(is_whitespace);
            match (self.cursor.peek(0), self.cursor.peek(1)) {
                ('/', '/') => {
                    self.next_while(|ch| ch != '\n');
                    self.cursor.next();
                }
                ('/', '*') => {
                    self.cursor.next();
                    self.cursor.next();
                    self.skip_block_comment();
                }
                _ => return,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        while !self.cursor.eof() {
            if self.cursor.peek(0) == '*' && self.cursor.peek(1) == '/' {
                self.cursor.next();
                self.cursor.next();
                return;
            }
            self.cursor.next();
        }
    }

    fn next_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> String {
        let mut consumed = String::new();
        while !self.cursor.eof() && predicate(self.cursor.peek(0)) {
            consumed.push(self.cursor.next());
        }
        consumed
    }

    fn read_number(&mut self) -> Token {
        let mut has_dot = false;
        let literal = self.next_while(|ch| {
            if ch == '.' {
                if has_dot {
                    return false;
                }
                has_dot = true;
                return true;
            }
            ch.is_ascii_digit()
        });
        let kind = if has_dot {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        Token::number(kind, literal.parse().unwrap_or_default())
    }

    fn read_identifier(&mut self) -> Token {
        let word = self.next_while(is_identifier);
        let kind = if KEYWORDS.contains(&word.as_str()) {
            TokenKind::Keyword
        } else if TYPES.contains(&word.as_str()) {
            TokenKind::Type
        } else {
            TokenKind::Identifier
        };
        Token::text(kind, word)
    }

    fn read_string(&mut self, quotation: char) -> Token {
        self.cursor.next();
        let mut escaped = false;
        let mut value = String::new();
        while !self.cursor.eof() {
            let ch = self.cursor.next();
            if escaped {
                value.push(ch);
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quotation {
                break;
            } else {
                value.push(ch);
            }
        }
        Token::text(TokenKind::String, value)
    }
}

/// Iterator over a lexer that steps over skipped directives.
pub struct Tokens<'a> {
    lexer: &'a mut Lexer,
}

impl Iterator for Tokens<'_> {
    type Item = (Token, LineRange);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.lexer.eof() {
            if let Some(token) = self.lexer.next() {
                return Some((token, self.lexer.last_range()));
            }
        }
        None
    }
}

impl Lexer {
    /// Drains the remaining tokens together with their ranges.
    pub fn tokens(&mut self) -> Tokens<'_> {
        Tokens { lexer: self }
    }
}
