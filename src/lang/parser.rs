//! Structural recursive-descent parser
//!
//! Builds the tree in `ast` from a comment-free token stream. Bodies and
//! expressions are skipped by bracket balancing. The first error aborts the
//! parse; there is no recovery.

use thiserror::Error;

use crate::syntax::Scanner;

use super::ast::*;
use super::scanner::SourceScanner;
use super::token::{Location, TokenKind};

/// Parse failure at a single token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected} at {location}, found {found:?}")]
pub struct ParseError {
    /// Location of the offending token
    pub location: Location,
    /// What the parser was looking for
    pub expected: String,
    /// Kind of the offending token
    pub found: TokenKind,
}

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Parse a whole source file
pub fn parse(source: &str) -> ParseResult<SourceUnit> {
    Parser::new(source).parse_source_unit()
}

/// Parser state over one source text
pub struct Parser<'a> {
    scanner: SourceScanner<'a>,
    /// End offset of the last consumed token
    last_end: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser positioned on the first token
    pub fn new(source: &'a str) -> Self {
        Self {
            scanner: SourceScanner::skipping_comments(source),
            last_end: 0,
        }
    }

    /// Parse the remaining input as a source unit
    pub fn parse_source_unit(&mut self) -> ParseResult<SourceUnit> {
        let mut nodes = Vec::new();
        loop {
            let node = match self.kind() {
                TokenKind::Eos => break,
                TokenKind::Pragma => SourceUnitPart::Pragma(self.parse_pragma()?),
                TokenKind::Import => SourceUnitPart::Import(self.parse_import()?),
                TokenKind::Contract | TokenKind::Library | TokenKind::Interface => {
                    SourceUnitPart::Contract(self.parse_contract()?)
                }
                kind if starts_type_name(kind) => {
                    SourceUnitPart::Variable(self.parse_variable_declaration()?)
                }
                _ => {
                    let start = self.location().start;
                    self.skip_member()?;
                    SourceUnitPart::Other(self.span_from(start))
                }
            };
            nodes.push(node);
        }

        Ok(SourceUnit {
            location: Location::new(0, self.scanner.source().len()),
            nodes,
        })
    }

    fn parse_pragma(&mut self) -> ParseResult<PragmaDirective> {
        let start = self.bump().start;
        while !matches!(self.kind(), TokenKind::Semicolon | TokenKind::Eos) {
            self.bump();
        }
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(PragmaDirective {
            location: self.span_from(start),
        })
    }

    /// `import "p" [as X];`, `import * as X from "p";`, `import X [from "p"];`
    /// or `import {a, b as c} from "p";`
    fn parse_import(&mut self) -> ParseResult<ImportDirective> {
        let start = self.bump().start;

        let path = match self.kind() {
            TokenKind::StringLiteral => {
                let path = self.expect_string()?;
                if self.kind() == TokenKind::As {
                    self.bump();
                    self.expect_identifier()?;
                }
                path
            }
            TokenKind::Mul => {
                self.bump();
                self.expect(TokenKind::As, "'as'")?;
                self.expect_identifier()?;
                self.expect_from()?;
                self.expect_string()?
            }
            TokenKind::Identifier => {
                let name = self.expect_identifier()?;
                if self.at_word("from") {
                    self.bump();
                    self.expect_string()?
                } else {
                    name
                }
            }
            TokenKind::LBrace => {
                self.bump();
                loop {
                    self.expect_identifier()?;
                    if self.kind() == TokenKind::As {
                        self.bump();
                        self.expect_identifier()?;
                    }
                    if self.kind() != TokenKind::Comma {
                        break;
                    }
                    self.bump();
                }
                self.expect(TokenKind::RBrace, "'}'")?;
                self.expect_from()?;
                self.expect_string()?
            }
            _ => return Err(self.error("import path")),
        };

        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(ImportDirective {
            location: self.span_from(start),
            path,
        })
    }

    fn parse_contract(&mut self) -> ParseResult<ContractDefinition> {
        let kind = match self.kind() {
            TokenKind::Library => ContractKind::Library,
            TokenKind::Interface => ContractKind::Interface,
            _ => ContractKind::Contract,
        };
        let start = self.bump().start;
        let name = self.expect_identifier()?;

        if self.kind() == TokenKind::Is {
            self.bump();
            loop {
                self.parse_qualified_name()?;
                if self.kind() == TokenKind::LParen {
                    self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
                }
                if self.kind() != TokenKind::Comma {
                    break;
                }
                self.bump();
            }
        }

        self.expect(TokenKind::LBrace, "'{'")?;
        let mut members = Vec::new();
        while self.kind() != TokenKind::RBrace {
            members.push(self.parse_member()?);
        }
        self.bump();

        Ok(ContractDefinition {
            location: self.span_from(start),
            kind,
            name,
            members,
        })
    }

    fn parse_member(&mut self) -> ParseResult<ContractMember> {
        let member = match self.kind() {
            TokenKind::Function => ContractMember::Function(self.parse_function()?),
            TokenKind::Modifier => ContractMember::Modifier(self.parse_modifier()?),
            TokenKind::Event => ContractMember::Event(self.parse_event()?),
            TokenKind::Struct => ContractMember::Struct(self.parse_struct()?),
            TokenKind::Enum | TokenKind::Using => {
                let start = self.location().start;
                self.skip_member()?;
                ContractMember::Other(self.span_from(start))
            }
            TokenKind::Identifier if self.peek_kind() == TokenKind::LParen => {
                ContractMember::Function(self.parse_function()?)
            }
            TokenKind::Eos => return Err(self.error("'}'")),
            _ => ContractMember::StateVariable(self.parse_variable_declaration()?),
        };
        Ok(member)
    }

    /// `function [name](...) ... {...}` or a special function such as
    /// `constructor(...) ... {...}`, which is named after its keyword
    fn parse_function(&mut self) -> ParseResult<FunctionDefinition> {
        let start = self.location().start;
        if self.kind() == TokenKind::Function {
            self.bump();
        }
        let name = if self.kind() == TokenKind::Identifier {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;

        loop {
            match self.kind() {
                TokenKind::LBrace => {
                    self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)?;
                    break;
                }
                TokenKind::Semicolon => {
                    self.bump();
                    break;
                }
                TokenKind::LParen => {
                    self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
                }
                TokenKind::Eos | TokenKind::RBrace => return Err(self.error("function body")),
                _ => {
                    self.bump();
                }
            }
        }

        Ok(FunctionDefinition {
            location: self.span_from(start),
            name,
        })
    }

    fn parse_modifier(&mut self) -> ParseResult<ModifierDefinition> {
        let start = self.bump().start;
        let name = self.expect_identifier()?;
        if self.kind() == TokenKind::LParen {
            self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
        }
        self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)?;
        Ok(ModifierDefinition {
            location: self.span_from(start),
            name,
        })
    }

    fn parse_event(&mut self) -> ParseResult<EventDefinition> {
        let start = self.bump().start;
        let name = self.expect_identifier()?;
        self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
        if self.kind() == TokenKind::Anonymous {
            self.bump();
        }
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(EventDefinition {
            location: self.span_from(start),
            name,
        })
    }

    fn parse_struct(&mut self) -> ParseResult<StructDefinition> {
        let start = self.bump().start;
        let name = self.expect_identifier()?;
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut fields = Vec::new();
        while self.kind() != TokenKind::RBrace {
            if self.kind() == TokenKind::Eos {
                return Err(self.error("'}'"));
            }
            fields.push(self.parse_variable_declaration()?);
        }
        self.bump();
        Ok(StructDefinition {
            location: self.span_from(start),
            name,
            fields,
        })
    }

    /// `Type [modifiers] name [= expression];`
    fn parse_variable_declaration(&mut self) -> ParseResult<VariableDeclaration> {
        let start = self.location().start;
        let type_name = self.parse_type_name()?;

        let mut name = None;
        loop {
            match self.kind() {
                TokenKind::Semicolon => break,
                TokenKind::Assign => {
                    self.skip_expression()?;
                    break;
                }
                TokenKind::Identifier => name = Some(self.expect_identifier()?),
                TokenKind::LParen => self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?,
                TokenKind::Eos | TokenKind::RBrace => return Err(self.error("';'")),
                _ => {
                    self.bump();
                }
            }
        }

        let Some(name) = name else {
            return Err(self.error("variable name"));
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(VariableDeclaration {
            location: self.span_from(start),
            type_name,
            name,
        })
    }

    fn parse_type_name(&mut self) -> ParseResult<String> {
        let start = self.location().start;
        match self.kind() {
            TokenKind::Mapping => {
                self.bump();
                self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
            }
            TokenKind::Identifier => {
                self.parse_qualified_name()?;
            }
            kind if kind.is_elementary_type() => {
                self.bump();
            }
            _ => return Err(self.error("type name")),
        }
        while self.kind() == TokenKind::LBrack {
            self.skip_balanced(TokenKind::LBrack, TokenKind::RBrack)?;
        }
        Ok(self.span_from(start).slice(self.scanner.source()).to_string())
    }

    /// `Name(.Name)*`
    fn parse_qualified_name(&mut self) -> ParseResult<String> {
        let mut name = self.expect_identifier()?;
        while self.kind() == TokenKind::Period {
            self.bump();
            name.push('.');
            name.push_str(&self.expect_identifier()?);
        }
        Ok(name)
    }

    /// Skip `= expression` up to, but not including, the closing `;`
    fn skip_expression(&mut self) -> ParseResult<()> {
        self.bump();
        loop {
            match self.kind() {
                TokenKind::Semicolon => return Ok(()),
                TokenKind::LParen => self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?,
                TokenKind::LBrack => self.skip_balanced(TokenKind::LBrack, TokenKind::RBrack)?,
                TokenKind::LBrace => self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)?,
                TokenKind::Eos | TokenKind::RBrace => return Err(self.error("';'")),
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Skip a definition we do not model: up to a `;` or through a `{...}`
    /// block
    fn skip_member(&mut self) -> ParseResult<()> {
        loop {
            match self.kind() {
                TokenKind::Semicolon => {
                    self.bump();
                    return Ok(());
                }
                TokenKind::LBrace => {
                    return self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace);
                }
                TokenKind::LParen => self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?,
                TokenKind::Eos | TokenKind::RBrace => return Err(self.error("';'")),
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Consume from the current `open` token through its matching `close`
    fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) -> ParseResult<()> {
        if self.kind() != open {
            return Err(self.error(&format!("{open:?}")));
        }
        let mut depth = 0usize;
        loop {
            let kind = self.kind();
            if kind == TokenKind::Eos {
                return Err(self.error(&format!("{close:?}")));
            }
            self.bump();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
    }

    fn kind(&self) -> TokenKind {
        self.scanner.current_token()
    }

    fn location(&self) -> Location {
        self.scanner.current_location()
    }

    /// Kind of the token after the current one
    fn peek_kind(&self) -> TokenKind {
        let mut lookahead = self.scanner.clone();
        lookahead.advance()
    }

    fn text(&self) -> &'a str {
        self.scanner.current_text()
    }

    fn at_word(&self, word: &str) -> bool {
        self.kind() == TokenKind::Identifier && self.text() == word
    }

    /// Consume the current token and return its location
    fn bump(&mut self) -> Location {
        let location = self.location();
        self.last_end = location.end;
        self.scanner.advance();
        location
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Location> {
        if self.kind() == kind {
            Ok(self.bump())
        } else {
            Err(self.error(expected))
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        if self.kind() != TokenKind::Identifier {
            return Err(self.error("identifier"));
        }
        let name = self.text().to_string();
        self.bump();
        Ok(name)
    }

    fn expect_string(&mut self) -> ParseResult<String> {
        if self.kind() != TokenKind::StringLiteral {
            return Err(self.error("string literal"));
        }
        let text = self.text();
        let unquoted = text.get(1..text.len() - 1).unwrap_or("").to_string();
        self.bump();
        Ok(unquoted)
    }

    fn expect_from(&mut self) -> ParseResult<()> {
        if !self.at_word("from") {
            return Err(self.error("'from'"));
        }
        self.bump();
        Ok(())
    }

    fn span_from(&self, start: usize) -> Location {
        Location::new(start, self.last_end)
    }

    fn error(&self, expected: &str) -> ParseError {
        ParseError {
            location: self.location(),
            expected: expected.to_string(),
            found: self.kind(),
        }
    }
}

fn starts_type_name(kind: TokenKind) -> bool {
    kind == TokenKind::Identifier || kind == TokenKind::Mapping || kind.is_elementary_type()
}
