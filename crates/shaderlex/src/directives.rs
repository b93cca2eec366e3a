//! Locates the preview directives in a shader source without interpreting the
//! surrounding GLSL. Front ends use the result to report directive lines and
//! hand quoted arguments to whatever builds buffer definitions.
use serde::Serialize;

use crate::lexer::Lexer;
use crate::token::{LineRange, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    /// Directive word without the leading `#`, e.g. `iChannel0`.
    pub keyword: String,
    /// 0-based line the directive starts on.
    pub line: usize,
    pub range: LineRange,
    /// Quoted string immediately following the directive, if any.
    pub argument: Option<String>,
}

impl Directive {
    /// Channel index of an `#iChannel<n>` directive.
    pub fn channel(&self) -> Option<u8> {
        self.keyword.strip_prefix("iChannel")?.parse().ok()
    }
}

pub fn scan_directives(text: &str) -> Vec<Directive> {
    let mut lexer = Lexer::new(text);
    let mut directives = Vec::new();

    while !lexer.eof() {
        let Some(token) = lexer.next() else {
            continue;
        };
        if token.kind != TokenKind::PreprocessorKeyword {
            continue;
        }
        let Some(keyword) = token.value.as_str().map(str::to_owned) else {
            continue;
        };
        let line = lexer.last_line();
        let range = lexer.last_range();

        let has_argument = lexer
            .peek()
            .is_some_and(|next| next.kind == TokenKind::String);
        let argument = if has_argument {
            lexer.next().and_then(|arg| arg.value.as_str().map(str::to_owned))
        } else {
            None
        };

        tracing::debug!(keyword = %keyword, line, ?argument, "found preview directive");
        directives.push(Directive {
            keyword,
            line,
            range,
            argument,
        });
    }

    directives
}
