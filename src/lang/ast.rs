//! Syntax tree for contract sources
//!
//! Only the structure needed by highlighting and outline-style consumers is
//! kept: directives, contract definitions and their member declarations.
//! Function bodies and initialiser expressions are recorded by location only.

use super::token::Location;

/// Read-only visitor over the syntax tree
///
/// Every `visit_*` method returns whether the node's children should be
/// visited. The defaults visit everything and do nothing, so implementors
/// only override the node kinds they care about.
#[allow(unused_variables)]
pub trait AstVisitor {
    fn visit_source_unit(&mut self, node: &SourceUnit) -> bool {
        true
    }
    fn end_visit_source_unit(&mut self, node: &SourceUnit) {}

    fn visit_pragma_directive(&mut self, node: &PragmaDirective) -> bool {
        true
    }

    fn visit_import_directive(&mut self, node: &ImportDirective) -> bool {
        true
    }

    fn visit_contract_definition(&mut self, node: &ContractDefinition) -> bool {
        true
    }
    fn end_visit_contract_definition(&mut self, node: &ContractDefinition) {}

    fn visit_function_definition(&mut self, node: &FunctionDefinition) -> bool {
        true
    }

    fn visit_modifier_definition(&mut self, node: &ModifierDefinition) -> bool {
        true
    }

    fn visit_event_definition(&mut self, node: &EventDefinition) -> bool {
        true
    }

    fn visit_struct_definition(&mut self, node: &StructDefinition) -> bool {
        true
    }
    fn end_visit_struct_definition(&mut self, node: &StructDefinition) {}

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration) -> bool {
        true
    }
}

/// Root of a parsed source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub location: Location,
    pub nodes: Vec<SourceUnitPart>,
}

/// Top-level item of a source unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceUnitPart {
    Pragma(PragmaDirective),
    Import(ImportDirective),
    Contract(ContractDefinition),
    /// File-level constant or variable declaration
    Variable(VariableDeclaration),
    /// Definitions that are skipped rather than modelled (`enum`, free
    /// functions, ...)
    Other(Location),
}

/// `pragma solidity ^0.4.0;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PragmaDirective {
    pub location: Location,
}

/// Any of the `import` forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDirective {
    pub location: Location,
    /// Imported path, unquoted, or the bare identifier of `import X;`
    pub path: String,
}

/// Flavour of a contract-like definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractKind {
    Contract,
    Library,
    Interface,
}

/// `contract Name is Base { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDefinition {
    pub location: Location,
    pub kind: ContractKind,
    pub name: String,
    pub members: Vec<ContractMember>,
}

/// Declaration inside a contract body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractMember {
    Function(FunctionDefinition),
    Modifier(ModifierDefinition),
    Event(EventDefinition),
    Struct(StructDefinition),
    StateVariable(VariableDeclaration),
    /// Members that are skipped rather than modelled (`enum`, `using`, ...)
    Other(Location),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub location: Location,
    /// `None` for the unnamed fallback function
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierDefinition {
    pub location: Location,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDefinition {
    pub location: Location,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDefinition {
    pub location: Location,
    pub name: String,
    pub fields: Vec<VariableDeclaration>,
}

/// State variable or struct field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub location: Location,
    /// Source text of the type, e.g. `mapping(address => uint)`
    pub type_name: String,
    pub name: String,
}

impl SourceUnit {
    pub fn accept(&self, visitor: &mut dyn AstVisitor) {
        if visitor.visit_source_unit(self) {
            for node in &self.nodes {
                node.accept(visitor);
            }
        }
        visitor.end_visit_source_unit(self);
    }

    /// Import directives in source order
    pub fn imports(&self) -> impl Iterator<Item = &ImportDirective> {
        self.nodes.iter().filter_map(|node| match node {
            SourceUnitPart::Import(import) => Some(import),
            _ => None,
        })
    }
}

impl SourceUnitPart {
    pub fn accept(&self, visitor: &mut dyn AstVisitor) {
        match self {
            SourceUnitPart::Pragma(node) => {
                visitor.visit_pragma_directive(node);
            }
            SourceUnitPart::Import(node) => {
                visitor.visit_import_directive(node);
            }
            SourceUnitPart::Contract(node) => node.accept(visitor),
            SourceUnitPart::Variable(node) => {
                visitor.visit_variable_declaration(node);
            }
            SourceUnitPart::Other(_) => {}
        }
    }
}

impl ContractDefinition {
    pub fn accept(&self, visitor: &mut dyn AstVisitor) {
        if visitor.visit_contract_definition(self) {
            for member in &self.members {
                member.accept(visitor);
            }
        }
        visitor.end_visit_contract_definition(self);
    }
}

impl ContractMember {
    pub fn accept(&self, visitor: &mut dyn AstVisitor) {
        match self {
            ContractMember::Function(node) => {
                visitor.visit_function_definition(node);
            }
            ContractMember::Modifier(node) => {
                visitor.visit_modifier_definition(node);
            }
            ContractMember::Event(node) => {
                visitor.visit_event_definition(node);
            }
            ContractMember::Struct(node) => node.accept(visitor),
            ContractMember::StateVariable(node) => {
                visitor.visit_variable_declaration(node);
            }
            ContractMember::Other(_) => {}
        }
    }
}

impl StructDefinition {
    pub fn accept(&self, visitor: &mut dyn AstVisitor) {
        if visitor.visit_struct_definition(self) {
            for field in &self.fields {
                visitor.visit_variable_declaration(field);
            }
        }
        visitor.end_visit_struct_definition(self);
    }
}
