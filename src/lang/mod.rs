//! Contract-language front end
//!
//! Token kinds, the source scanner and a structural parser. These feed the
//! lexical and semantic highlighting passes in `syntax`.

mod ast;
mod parser;
mod scanner;
mod token;

pub use ast::{
    AstVisitor, ContractDefinition, ContractKind, ContractMember, EventDefinition,
    FunctionDefinition, ImportDirective, ModifierDefinition, PragmaDirective,
    SourceUnit, SourceUnitPart, StructDefinition, VariableDeclaration,
};
pub use parser::{parse, ParseError, Parser};
pub use scanner::SourceScanner;
pub use token::{Location, TokenKind};
