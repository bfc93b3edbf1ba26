//! Java parser - converts tokens to a declaration-level AST.
//!
//! Method bodies, initializers and nested types are skipped by brace matching;
//! only package, imports and the fields of top-level types are retained.

use super::ast::{
    Annotation, CompilationUnit, FieldDecl, ImportDecl, TypeDecl, TypeDeclKind, TypeRef,
    WildcardBound,
};
use super::lexer::{SpannedToken, Token};

/// Modifiers that may precede a type or member declaration.
const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "abstract",
    "final",
    "transient",
    "volatile",
    "synchronized",
    "native",
    "strictfp",
    "default",
    "sealed",
    "non",
];

/// Parse error with location information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Option<std::ops::Range<usize>>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref span) = self.span {
            write!(f, "Parse error at {:?}: {}", span, self.message)
        } else {
            write!(f, "Parse error: {}", self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// Parser state.
pub struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    pending_doc_comment: Option<String>,
}

impl Parser {
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        Self {
            tokens,
            pos: 0,
            pending_doc_comment: None,
        }
    }

    /// Parse a complete compilation unit.
    pub fn parse(&mut self) -> Result<CompilationUnit, ParseError> {
        let mut unit = CompilationUnit::default();

        while !self.is_at_end() {
            self.collect_doc_comments();

            match self.peek() {
                Some(Token::Package) => {
                    self.pending_doc_comment = None;
                    unit.package = Some(self.parse_package()?);
                }
                Some(Token::Import) => {
                    self.pending_doc_comment = None;
                    unit.imports.push(self.parse_import()?);
                }
                Some(Token::Semicolon) => {
                    self.advance();
                }
                Some(_) => {
                    unit.types.push(self.parse_type_decl()?);
                }
                None => break,
            }
        }

        Ok(unit)
    }

    fn parse_package(&mut self) -> Result<String, ParseError> {
        self.expect(Token::Package)?;
        let name = self.parse_qualified_name()?;
        self.expect(Token::Semicolon)?;
        Ok(name)
    }

    fn parse_import(&mut self) -> Result<ImportDecl, ParseError> {
        self.expect(Token::Import)?;
        let is_static = self.check(&Token::Static);
        if is_static {
            self.advance();
        }

        let mut parts = vec![self.expect_name()?];
        let mut is_wildcard = false;
        while self.check(&Token::Dot) {
            self.advance();
            if self.check(&Token::Operator) {
                // `.*`
                self.advance();
                is_wildcard = true;
                break;
            }
            parts.push(self.expect_name()?);
        }
        self.expect(Token::Semicolon)?;

        Ok(ImportDecl {
            path: parts.join("."),
            is_static,
            is_wildcard,
        })
    }

    fn parse_type_decl(&mut self) -> Result<TypeDecl, ParseError> {
        let mut annotations = Vec::new();
        let kind = loop {
            self.collect_doc_comments();
            match self.peek() {
                Some(Token::At) if self.peek_nth(1) == Some(&Token::Interface) => {
                    self.advance();
                    self.advance();
                    break TypeDeclKind::Annotation;
                }
                Some(Token::At) => annotations.push(self.parse_annotation()?),
                Some(Token::Class) => {
                    self.advance();
                    break TypeDeclKind::Class;
                }
                Some(Token::Interface) => {
                    self.advance();
                    break TypeDeclKind::Interface;
                }
                Some(Token::Enum) => {
                    self.advance();
                    break TypeDeclKind::Enum;
                }
                Some(Token::Record) => {
                    self.advance();
                    break TypeDeclKind::Record;
                }
                Some(Token::Operator) => {
                    // `non-sealed`
                    self.advance();
                }
                Some(Token::Identifier(name)) if MODIFIERS.contains(&name.as_str()) => {
                    self.advance();
                }
                _ => return Err(self.error("Expected type declaration")),
            }
        };

        let doc_comment = self.pending_doc_comment.take();
        let name = self.expect_name()?;
        if self.check(&Token::LAngle) {
            self.skip_balanced(Token::LAngle, Token::RAngle)?;
        }

        let mut fields = Vec::new();
        if kind == TypeDeclKind::Record {
            fields = self.parse_record_components()?;
        }

        // extends / implements / permits
        while !self.check(&Token::LBrace) {
            if self.advance().is_none() {
                return Err(self.error("Unexpected end of input before type body"));
            }
        }

        match kind {
            TypeDeclKind::Class | TypeDeclKind::Record => {
                fields.extend(self.parse_class_body()?);
            }
            _ => self.skip_balanced(Token::LBrace, Token::RBrace)?,
        }

        Ok(TypeDecl {
            kind,
            name,
            doc_comment,
            annotations,
            fields,
        })
    }

    fn parse_record_components(&mut self) -> Result<Vec<FieldDecl>, ParseError> {
        self.expect(Token::LParen)?;
        let mut components = Vec::new();

        while !self.check(&Token::RParen) {
            let mut annotations = Vec::new();
            while self.check(&Token::At) {
                annotations.push(self.parse_annotation()?);
            }
            let type_ref = self.parse_type()?;
            let name = self.expect_name()?;
            components.push(FieldDecl {
                name,
                type_ref,
                is_static: false,
                doc_comment: None,
                annotations,
            });

            if self.check(&Token::Comma) {
                self.advance();
            } else if !self.check(&Token::RParen) {
                return Err(self.error("Expected ',' or ')' in record header"));
            }
        }

        self.expect(Token::RParen)?;
        Ok(components)
    }

    fn parse_class_body(&mut self) -> Result<Vec<FieldDecl>, ParseError> {
        self.expect(Token::LBrace)?;
        let mut fields = Vec::new();

        loop {
            self.collect_doc_comments();
            match self.peek() {
                Some(Token::RBrace) => {
                    self.advance();
                    break;
                }
                Some(Token::Semicolon) => {
                    self.advance();
                }
                Some(_) => fields.extend(self.parse_member()?),
                None => return Err(self.error("Unexpected end of input in class body")),
            }
        }

        Ok(fields)
    }

    /// Parses one member. Returns the fields it declared (none for methods,
    /// constructors, initializers and nested types).
    fn parse_member(&mut self) -> Result<Vec<FieldDecl>, ParseError> {
        let mut annotations = Vec::new();
        let mut is_static = false;

        loop {
            self.collect_doc_comments();
            match self.peek() {
                Some(Token::At) if self.peek_nth(1) == Some(&Token::Interface) => {
                    self.pending_doc_comment = None;
                    self.skip_nested_type()?;
                    return Ok(Vec::new());
                }
                Some(Token::At) => annotations.push(self.parse_annotation()?),
                Some(Token::Static) => {
                    self.advance();
                    is_static = true;
                }
                Some(Token::Operator) => {
                    // `non-sealed`
                    self.advance();
                }
                Some(Token::Identifier(name)) if MODIFIERS.contains(&name.as_str()) => {
                    self.advance();
                }
                _ => break,
            }
        }

        match self.peek() {
            Some(Token::LBrace) => {
                // initializer block
                self.pending_doc_comment = None;
                self.skip_balanced(Token::LBrace, Token::RBrace)?;
                return Ok(Vec::new());
            }
            Some(Token::Class | Token::Interface | Token::Enum) => {
                self.pending_doc_comment = None;
                self.skip_nested_type()?;
                return Ok(Vec::new());
            }
            Some(Token::Record) if self.is_nested_record() => {
                self.pending_doc_comment = None;
                self.skip_nested_type()?;
                return Ok(Vec::new());
            }
            Some(Token::LAngle) => {
                // generic method or constructor
                self.skip_balanced(Token::LAngle, Token::RAngle)?;
            }
            _ => {}
        }

        let doc_comment = self.pending_doc_comment.take();
        let type_ref = self.parse_type()?;

        if self.check(&Token::LParen) {
            // constructor
            self.skip_method_rest()?;
            return Ok(Vec::new());
        }
        if self.check(&Token::LBrace) {
            // compact record constructor
            self.skip_balanced(Token::LBrace, Token::RBrace)?;
            return Ok(Vec::new());
        }

        let mut fields = Vec::new();
        let mut name = self.expect_name()?;

        if self.check(&Token::LParen) {
            self.skip_method_rest()?;
            return Ok(Vec::new());
        }

        loop {
            let mut declarator_type = type_ref.clone();
            while self.check(&Token::LBracket) {
                self.advance();
                self.expect(Token::RBracket)?;
                declarator_type = TypeRef::Array(Box::new(declarator_type));
            }

            if self.check(&Token::Equals) {
                self.advance();
                self.skip_initializer()?;
            }

            fields.push(FieldDecl {
                name,
                type_ref: declarator_type,
                is_static,
                doc_comment: doc_comment.clone(),
                annotations: annotations.clone(),
            });

            if self.check(&Token::Comma) {
                self.advance();
                name = self.expect_name()?;
                continue;
            }

            self.expect(Token::Semicolon)?;
            break;
        }

        Ok(fields)
    }

    fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        while self.check(&Token::At) {
            self.parse_annotation()?;
        }

        if self.check(&Token::Question) {
            self.advance();
            let bound = match self.peek() {
                Some(Token::Extends) => Some(WildcardBound::Extends),
                Some(Token::Identifier(word)) if word == "super" => Some(WildcardBound::Super),
                _ => None,
            };
            return match bound {
                Some(kind) => {
                    self.advance();
                    let inner = self.parse_type()?;
                    Ok(TypeRef::Wildcard {
                        bound: Some((kind, Box::new(inner))),
                    })
                }
                None => Ok(TypeRef::Wildcard { bound: None }),
            };
        }

        let name = self.parse_qualified_name()?;
        let mut arguments = Vec::new();

        if self.check(&Token::LAngle) {
            self.advance();
            while !self.check(&Token::RAngle) {
                arguments.push(self.parse_type()?);
                if self.check(&Token::Comma) {
                    self.advance();
                } else if !self.check(&Token::RAngle) {
                    return Err(self.error("Expected ',' or '>' in type arguments"));
                }
            }
            self.expect(Token::RAngle)?;
        }

        let mut ty = TypeRef::Named { name, arguments };
        while self.check(&Token::LBracket) && self.peek_nth(1) == Some(&Token::RBracket) {
            self.advance();
            self.advance();
            ty = TypeRef::Array(Box::new(ty));
        }

        // varargs
        if self.check(&Token::Dot)
            && self.peek_nth(1) == Some(&Token::Dot)
            && self.peek_nth(2) == Some(&Token::Dot)
        {
            self.pos += 3;
            ty = TypeRef::Array(Box::new(ty));
        }

        Ok(ty)
    }

    fn parse_annotation(&mut self) -> Result<Annotation, ParseError> {
        self.expect(Token::At)?;
        let name = self.parse_qualified_name()?;
        let mut arguments = Vec::new();

        if self.check(&Token::LParen) {
            self.advance();
            while !self.check(&Token::RParen) {
                let key = match (self.peek(), self.peek_nth(1)) {
                    (Some(Token::Identifier(key)), Some(Token::Equals)) => {
                        let key = key.clone();
                        self.pos += 2;
                        key
                    }
                    _ => "value".to_string(),
                };

                if let Some(value) = self.parse_annotation_value()? {
                    arguments.push((key, value));
                }

                if self.check(&Token::Comma) {
                    self.advance();
                } else if !self.check(&Token::RParen) {
                    return Err(self.error("Expected ',' or ')' in annotation"));
                }
            }
            self.expect(Token::RParen)?;
        }

        Ok(Annotation { name, arguments })
    }

    /// Consumes one element value. Returns the text when the value is made of
    /// string literals only (optionally concatenated with `+`).
    fn parse_annotation_value(&mut self) -> Result<Option<String>, ParseError> {
        let mut text = String::new();
        let mut only_strings = true;
        let mut depth = 0usize;

        loop {
            match self.peek() {
                None => return Err(self.error("Unexpected end of input in annotation")),
                Some(Token::Comma | Token::RParen) if depth == 0 => break,
                Some(Token::LParen | Token::LBrace | Token::LBracket) => {
                    depth += 1;
                    only_strings = false;
                }
                Some(Token::RParen | Token::RBrace | Token::RBracket) => {
                    depth = depth.saturating_sub(1);
                }
                Some(Token::StringLiteral(s)) => text.push_str(s),
                Some(Token::Operator) => {}
                Some(_) => only_strings = false,
            }
            self.advance();
        }

        Ok(only_strings.then_some(text))
    }

    fn parse_qualified_name(&mut self) -> Result<String, ParseError> {
        let mut parts = vec![self.expect_name()?];
        while self.check(&Token::Dot) && self.peek_nth(1).is_some_and(is_name_token) {
            self.advance();
            parts.push(self.expect_name()?);
        }
        Ok(parts.join("."))
    }

    fn is_nested_record(&self) -> bool {
        matches!(self.peek_nth(1), Some(Token::Identifier(_)))
            && matches!(self.peek_nth(2), Some(Token::LParen | Token::LAngle))
    }

    fn skip_nested_type(&mut self) -> Result<(), ParseError> {
        while !self.check(&Token::LBrace) {
            if self.advance().is_none() {
                return Err(self.error("Unexpected end of input in nested type"));
            }
        }
        self.skip_balanced(Token::LBrace, Token::RBrace)
    }

    /// Skips parameters, `throws` clause and body (or `;`) of a method.
    fn skip_method_rest(&mut self) -> Result<(), ParseError> {
        self.skip_balanced(Token::LParen, Token::RParen)?;
        loop {
            match self.peek() {
                Some(Token::LBrace) => return self.skip_balanced(Token::LBrace, Token::RBrace),
                Some(Token::Semicolon) => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => {
                    self.advance();
                }
                None => return Err(self.error("Unexpected end of input in method declaration")),
            }
        }
    }

    /// Skips a field initializer up to the next top-level `,` or `;`.
    /// Angle brackets count as nesting so `new HashMap<A, B>()` is not split.
    fn skip_initializer(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        let mut angle_depth = 0usize;

        loop {
            match self.peek() {
                None => return Err(self.error("Unexpected end of input in field initializer")),
                Some(Token::Semicolon) if depth == 0 => return Ok(()),
                Some(Token::Comma) if depth == 0 && angle_depth == 0 => return Ok(()),
                Some(Token::LParen | Token::LBrace | Token::LBracket) => depth += 1,
                Some(Token::RParen | Token::RBrace | Token::RBracket) => {
                    if depth == 0 {
                        return Err(self.error("Unbalanced brackets in field initializer"));
                    }
                    depth -= 1;
                }
                Some(Token::LAngle) => angle_depth += 1,
                Some(Token::RAngle) => angle_depth = angle_depth.saturating_sub(1),
                Some(_) => {}
            }
            self.advance();
        }
    }

    fn skip_balanced(&mut self, open: Token, close: Token) -> Result<(), ParseError> {
        self.expect(open.clone())?;

        let mut depth = 1;
        while depth > 0 {
            match self.advance() {
                Some(SpannedToken { token, .. }) if token == open => depth += 1,
                Some(SpannedToken { token, .. }) if token == close => depth -= 1,
                Some(_) => {}
                None => return Err(self.error(&format!("Unexpected end of input, expected {:?}", close))),
            }
        }
        Ok(())
    }

    // Helper methods

    fn collect_doc_comments(&mut self) {
        while let Some(Token::DocComment(comment)) = self.peek() {
            self.pending_doc_comment = Some(comment.clone());
            self.advance();
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|t| &t.token)
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        if self.is_at_end() {
            None
        } else {
            let token = self.tokens[self.pos].clone();
            self.pos += 1;
            Some(token)
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, expected: &Token) -> bool {
        self.peek()
            .map(|t| std::mem::discriminant(t) == std::mem::discriminant(expected))
            .unwrap_or(false)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if self.check(&expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!("Expected {:?}", expected)))
        }
    }

    /// Identifiers plus contextual keywords that are legal as names.
    fn expect_name(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(Token::Identifier(name)) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            Some(Token::Record) => {
                self.advance();
                Ok("record".to_string())
            }
            _ => Err(self.error("Expected identifier")),
        }
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError {
            message: message.to_string(),
            span: self.tokens.get(self.pos).map(|t| t.span.clone()),
        }
    }
}

fn is_name_token(token: &Token) -> bool {
    matches!(token, Token::Identifier(_) | Token::Record)
}

/// Parse Java source to AST.
pub fn parse(source: &str) -> Result<CompilationUnit, ParseError> {
    use super::lexer::tokenize;

    let tokens = tokenize(source).map_err(|e| ParseError {
        message: e.message,
        span: Some(e.span),
    })?;

    let mut parser = Parser::new(tokens);
    parser.parse()
}
