use proptest::prelude::*;
use shaderlex::{Lexer, TokenKind};

fn significant_piece() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z_][A-Za-z0-9_]{0,8}",
        "[0-9]{1,4}",
        "[0-9]{1,3}\\.[0-9]{0,3}",
        "\"[a-z ]{0,6}\"",
        "'[a-z]{0,6}'",
        prop::sample::select(vec![
            ".", ",", ":", "::", ";", "(", ")", "[", "]", "{", "}",
        ])
        .prop_map(str::to_owned),
        prop::sample::select(vec![
            "=", "*", "/", "+", "-", "%", "~", "&", "|", "<", ">", "?", "!", "^",
        ])
        .prop_map(str::to_owned),
        prop::sample::select(vec!["@", "$", "`"]).prop_map(str::to_owned),
        "#iChannel[0-3]",
        prop::sample::select(vec!["#include", "#iKeyboard", "#iUniform"]).prop_map(str::to_owned),
    ]
}

/// Source text paired with the text its tokens should cover. Unrecognized
/// `#word` directives are consumed without producing a token.
fn piece() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        4 => significant_piece().prop_map(|piece| (piece.clone(), piece)),
        1 => "#[a-z]{1,6}".prop_map(|directive| (directive, String::new())),
    ]
}

fn trivia() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![" ", "\t", "\n", "\r\n", " \\\n "]).prop_map(str::to_owned),
        "[a-z ]{0,10}".prop_map(|body| format!(" // {body}\n")),
        "[a-z \n]{0,10}".prop_map(|body| format!(" /* {body} */ ")),
    ]
}

fn annotated_source() -> impl Strategy<Value = (String, String)> {
    prop::collection::vec((piece(), trivia()), 0..24).prop_map(|pieces| {
        let mut source = String::new();
        let mut stripped = String::new();
        for ((piece, kept), gap) in pieces {
            source.push_str(&piece);
            source.push(' ');
            source.push_str(&gap);
            stripped.push_str(&kept);
        }
        (source, stripped)
    })
}

proptest! {
    #[test]
    fn token_spans_rebuild_source_without_trivia((source, stripped) in annotated_source()) {
        let chars: Vec<char> = source.chars().collect();
        let mut rebuilt = String::new();
        let mut lexer = Lexer::new(&source);
        for (_, range) in lexer.tokens() {
            prop_assert!(range.begin <= range.end);
            rebuilt.extend(&chars[range.begin..range.end]);
        }
        prop_assert_eq!(rebuilt, stripped);
    }

    #[test]
    fn repeated_peek_agrees_with_next((source, _) in annotated_source(), peeks in 1usize..4) {
        let mut lexer = Lexer::new(&source);
        while !lexer.eof() {
            let mut seen = Vec::new();
            for _ in 0..peeks {
                seen.push(lexer.peek().cloned());
            }
            let taken = lexer.next();
            for peeked in seen {
                prop_assert_eq!(&peeked, &taken);
            }
        }
    }

    #[test]
    fn punctuation_and_operators_keep_literal_value((source, _) in annotated_source()) {
        let chars: Vec<char> = source.chars().collect();
        let mut lexer = Lexer::new(&source);
        for (token, range) in lexer.tokens() {
            if matches!(token.kind, TokenKind::Punctuation | TokenKind::Operator | TokenKind::Unknown) {
                let literal: String = chars[range.begin..range.end].iter().collect();
                prop_assert_eq!(token.value.as_str(), Some(literal.as_str()));
            }
        }
    }
}
