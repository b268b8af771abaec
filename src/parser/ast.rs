// AST (Abstract Syntax Tree) definitions for the Rill front end

use crate::parser::lexer::{Token, TokenKind};
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Raised when an array literal mixes token kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedArrayError {
    pub expected: TokenKind,
    pub found: Token,
}

/// A homogeneous, fixed sequence of tokens backing an array literal.
///
/// All elements share one [`TokenKind`]. Construction never coerces: a
/// heterogeneous input is rejected with a [`MixedArrayError`] naming the first
/// offending element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenArray {
    elements: Vec<Token>,
}

impl TokenArray {
    pub fn new(elements: Vec<Token>) -> Result<Self, MixedArrayError> {
        if let Some(first) = elements.first() {
            let expected = first.kind;
            if let Some(bad) = elements.iter().find(|t| t.kind != expected) {
                return Err(MixedArrayError {
                    expected,
                    found: bad.clone(),
                });
            }
        }
        Ok(Self { elements })
    }

    /// Kind shared by every element, `None` when empty
    pub fn element_kind(&self) -> Option<TokenKind> {
        self.elements.first().map(|t| t.kind)
    }

    pub fn elements(&self) -> &[Token] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element texts joined by commas, e.g. `1,2,3`
    pub fn string_representation(&self) -> String {
        self.elements
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// `var`/`const` declaration, also used for function parameters.
///
/// Parameters carry no initializer and may omit the keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub keyword: Option<Token>,
    pub name: Token,
    pub var_type: Token,
    pub init: Option<Box<AstNode>>,
    pub location: SourceLocation,
}

impl VarDecl {
    pub fn is_const(&self) -> bool {
        matches!(&self.keyword, Some(k) if k.kind == TokenKind::Const)
    }
}

/// Brace-delimited statement list
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<AstNode>,
    pub location: SourceLocation,
}

/// Function parameter list: `( decl, decl, ... )`
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterList {
    pub params: Vec<VarDecl>,
    pub location: SourceLocation,
}

/// AST nodes representing statements and expressions
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // Expressions
    IntLiteral(Token),
    FloatLiteral(Token),
    StringLiteral(Token),
    ArrayLiteral {
        array: TokenArray,
        location: SourceLocation,
    },
    Identifier(Token),
    UnaryOp {
        op: Token,
        operand: Box<AstNode>,
    },
    BinaryOp {
        left: Box<AstNode>,
        op: Token,
        right: Box<AstNode>,
    },
    /// `x++` / `x--`, either as a statement or inside an expression
    IncDec {
        target: Token,
        op: Token,
    },

    // Statements
    VarDecl(VarDecl),
    Assignment {
        target: Token,
        op: Token,
        value: Box<AstNode>,
    },
    Block(Block),
    If {
        condition: Box<AstNode>,
        body: Block,
        location: SourceLocation,
    },
    While {
        condition: Box<AstNode>,
        body: Block,
        location: SourceLocation,
    },
    FunctionDecl {
        name: Token,
        params: ParameterList,
        return_type: Token,
        body: Block,
        location: SourceLocation,
    },
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::IntLiteral(tok)
            | AstNode::FloatLiteral(tok)
            | AstNode::StringLiteral(tok)
            | AstNode::Identifier(tok) => tok.location,
            AstNode::ArrayLiteral { location, .. } => *location,
            AstNode::UnaryOp { op, .. } => op.location,
            AstNode::BinaryOp { left, .. } => left.location(),
            AstNode::IncDec { target, .. } => target.location,
            AstNode::VarDecl(decl) => decl.location,
            AstNode::Assignment { target, .. } => target.location,
            AstNode::Block(block) => block.location,
            AstNode::If { location, .. } => *location,
            AstNode::While { location, .. } => *location,
            AstNode::FunctionDecl { location, .. } => *location,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub nodes: Vec<AstNode>, // Top-level statements in source order
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
