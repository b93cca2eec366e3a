//! Line-accurate tokenizer for annotated ShaderToy GLSL.
//!
//! `SourceCursor` walks characters and tracks lines, `Lexer` turns them into a
//! one-token-lookahead stream, and `scan_directives` lists the preview
//! directives a source declares.
mod cursor;
mod directives;
mod lexer;
mod token;

pub use cursor::{CursorError, SourceCursor, END_OF_INPUT};
pub use directives::{scan_directives, Directive};
pub use lexer::{Lexer, Tokens};
pub use token::{LineRange, Token, TokenKind, TokenValue};
