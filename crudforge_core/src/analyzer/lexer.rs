//! Java lexer using the logos crate.
//!
//! Only the declaration-level vocabulary is distinguished; method bodies and
//! initializers are skipped by the parser, so everything else collapses into
//! [`Token::Operator`].

use logos::Logos;

/// Tokens for Java source files.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Keywords
    #[token("package")]
    Package,

    #[token("import")]
    Import,

    #[token("class")]
    Class,

    #[token("interface")]
    Interface,

    #[token("enum")]
    Enum,

    #[token("record")]
    Record,

    #[token("static")]
    Static,

    #[token("extends")]
    Extends,

    #[token("implements")]
    Implements,

    // Punctuation
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("<")]
    LAngle,

    #[token(">")]
    RAngle,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("=")]
    Equals,

    #[token("@")]
    At,

    #[token("?")]
    Question,

    #[regex(r"[-+*/%!~|^&:]")]
    Operator,

    // Literals
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    StringLiteral(std::string::String),

    #[regex(r"'([^'\\]|\\.)*'")]
    CharLiteral,

    #[regex(r"[0-9][0-9a-zA-Z_]*")]
    NumberLiteral,

    // Identifiers (must come after keywords)
    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*", |lex| lex.slice().to_string())]
    Identifier(std::string::String),

    // Comments
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*\*([^*]|\*+[^*/])*\*+/", |lex| lex.slice().to_string())]
    DocComment(std::string::String),

    #[regex(r"/\*[^*]([^*]|\*+[^*/])*\*+/|/\*\*/")]
    BlockComment,
}

/// A token with its span in the source.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize a Java source file.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => {
                // Skip regular comments, keep doc comments
                if !matches!(token, Token::LineComment | Token::BlockComment) {
                    tokens.push(SpannedToken {
                        token,
                        span: lexer.span(),
                    });
                }
            }
            Err(()) => {
                return Err(LexError {
                    span: lexer.span(),
                    message: format!(
                        "Unexpected token: '{}'",
                        &source[lexer.span().start..lexer.span().end.min(source.len())]
                    ),
                });
            }
        }
    }

    Ok(tokens)
}

/// Strips Javadoc markers, trims every line and drops block tags such as
/// `@author`.
pub fn clean_doc_comment(raw: &str) -> String {
    let body = raw
        .trim()
        .trim_start_matches("/**")
        .trim_end_matches("*/");

    let mut lines = Vec::new();
    for line in body.lines() {
        let line = line.trim().trim_start_matches('*').trim();
        if line.starts_with('@') {
            break;
        }
        lines.push(line);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }

    lines.join("\n")
}

/// Lexer error.
#[derive(Debug, Clone)]
pub struct LexError {
    pub span: std::ops::Range<usize>,
    pub message: String,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lex error at {:?}: {}", self.span, self.message)
    }
}

impl std::error::Error for LexError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_tokenize_field_declaration() {
        let tokens = kinds("private static final long serialVersionUID = 1L;");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("private".to_string()),
                Token::Static,
                Token::Identifier("final".to_string()),
                Token::Identifier("long".to_string()),
                Token::Identifier("serialVersionUID".to_string()),
                Token::Equals,
                Token::NumberLiteral,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = kinds(
            r#"
            // line comment
            /* block */
            /**/
            /** The order id. */
            Long id;
            "#,
        );
        assert_eq!(tokens.len(), 4);
        assert!(matches!(&tokens[0], Token::DocComment(d) if d.contains("The order id.")));
    }

    #[test]
    fn test_unicode_identifiers() {
        let tokens = kinds("private String 名称; int größe2;");
        assert_eq!(tokens[2], Token::Identifier("名称".to_string()));
        assert_eq!(tokens[5], Token::Identifier("größe2".to_string()));
    }

    #[test]
    fn test_generics_are_split() {
        let tokens = kinds("Map<String, List<Long>> index;");
        assert_eq!(
            tokens.iter().filter(|t| **t == Token::RAngle).count(),
            2
        );
    }

    #[test]
    fn test_method_body_vocabulary_lexes() {
        let source = r#"
            public boolean check(int a) {
                char c = '\'';
                String s = "a \"quoted\" value";
                return a >= 10 && s != null || this::equals != null ? true : false;
            }
        "#;
        assert!(tokenize(source).is_ok());
    }

    #[test]
    fn test_unexpected_character_is_error() {
        let err = tokenize("class A { # }").unwrap_err();
        assert!(err.message.contains('#'));
    }

    #[test]
    fn test_clean_doc_comment() {
        let raw = "/**\n   * Customer order.\n   *\n   * Holds line totals.\n   * @author someone\n   */";
        assert_eq!(clean_doc_comment(raw), "Customer order.\n\nHolds line totals.");
        assert_eq!(clean_doc_comment("/** Primary key */"), "Primary key");
        assert_eq!(clean_doc_comment("/***/"), "");
    }
}
