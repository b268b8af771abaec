//! Indented AST dump
//!
//! Every node renders as one labeled line. Children follow on their own lines,
//! indented by [`INDENT_WIDTH`] spaces per level. Nodes with children end their
//! label with `->`; a child reached through a named edge is prefixed with that
//! edge (`Left: `, `Right: `, `Value: `, `Condition: `, `Body: `).
//!
//! ```text
//! FullVarDeclNode ->
//!    Key(var)
//!    IdNode(x)
//!    Type(int)
//!    Value: BinOpNode ->
//!       Left: IntNode(1)
//!       Op(+)
//!       Right: IntNode(2)
//! ```

use crate::constants::INDENT_WIDTH;
use crate::parser::ast::*;
use crate::parser::lexer::Token;

#[derive(Debug, Clone, Copy)]
pub struct AstPrinter {
    indent_width: usize,
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self {
            indent_width: INDENT_WIDTH,
        }
    }
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(indent_width: usize) -> Self {
        Self { indent_width }
    }

    /// Write the dump of `node` to stdout; does nothing for `None`
    pub fn print(&self, node: Option<&AstNode>) {
        if let Some(node) = node {
            print!("{}", self.render(node));
        }
    }

    /// Dump of a single node, one line per entry, newline-terminated
    pub fn render(&self, node: &AstNode) -> String {
        let mut out = String::new();
        self.write_node(&mut out, node, 0, "");
        out
    }

    /// Dump of every top-level statement in order
    pub fn render_program(&self, program: &Program) -> String {
        program.nodes.iter().map(|node| self.render(node)).collect()
    }

    fn line(&self, out: &mut String, depth: usize, text: &str) {
        out.push_str(&" ".repeat(depth * self.indent_width));
        out.push_str(text);
        out.push('\n');
    }

    fn write_node(&self, out: &mut String, node: &AstNode, depth: usize, edge: &str) {
        match node {
            AstNode::IntLiteral(tok) => self.leaf(out, depth, edge, "IntNode", tok),
            AstNode::FloatLiteral(tok) => self.leaf(out, depth, edge, "FloatNode", tok),
            AstNode::StringLiteral(tok) => self.leaf(out, depth, edge, "StrNode", tok),
            AstNode::Identifier(tok) => self.leaf(out, depth, edge, "IdNode", tok),
            AstNode::ArrayLiteral { array, .. } => self.line(
                out,
                depth,
                &format!("{edge}ArrayNode({})", array.string_representation()),
            ),
            AstNode::UnaryOp { op, operand } => {
                self.line(out, depth, &format!("{edge}UnOpNode ->"));
                self.line(out, depth + 1, &format!("Op({})", op.text));
                self.write_node(out, operand, depth + 1, "Right: ");
            }
            AstNode::BinaryOp { left, op, right } => {
                self.line(out, depth, &format!("{edge}BinOpNode ->"));
                self.write_node(out, left, depth + 1, "Left: ");
                self.line(out, depth + 1, &format!("Op({})", op.text));
                self.write_node(out, right, depth + 1, "Right: ");
            }
            AstNode::IncDec { target, op } => {
                self.line(out, depth, &format!("{edge}IncDecNode ->"));
                self.leaf(out, depth + 1, "", "IdNode", target);
                self.line(out, depth + 1, &format!("Op({})", op.text));
            }
            AstNode::VarDecl(decl) => self.write_var_decl(out, decl, depth, edge),
            AstNode::Assignment { target, op, value } => {
                self.line(out, depth, &format!("{edge}AssignNode ->"));
                self.leaf(out, depth + 1, "", "IdNode", target);
                self.line(out, depth + 1, &format!("Op({})", op.text));
                self.write_node(out, value, depth + 1, "Value: ");
            }
            AstNode::Block(block) => self.write_block(out, block, depth, edge),
            AstNode::If {
                condition, body, ..
            } => self.write_conditional(out, "IfNode", condition, body, depth, edge),
            AstNode::While {
                condition, body, ..
            } => self.write_conditional(out, "WhileNode", condition, body, depth, edge),
            AstNode::FunctionDecl {
                name,
                params,
                return_type,
                body,
                ..
            } => {
                self.line(out, depth, &format!("{edge}FuncDeclNode ->"));
                self.leaf(out, depth + 1, "", "IdNode", name);
                if params.params.is_empty() {
                    self.line(out, depth + 1, "ParamListNode (empty)");
                } else {
                    self.line(out, depth + 1, "ParamListNode ->");
                    for param in &params.params {
                        self.write_var_decl(out, param, depth + 2, "");
                    }
                }
                self.line(out, depth + 1, &format!("ReturnType({})", return_type.text));
                self.write_block(out, body, depth + 1, "Body: ");
            }
        }
    }

    fn leaf(&self, out: &mut String, depth: usize, edge: &str, label: &str, tok: &Token) {
        self.line(out, depth, &format!("{edge}{label}({})", tok.text));
    }

    fn write_var_decl(&self, out: &mut String, decl: &VarDecl, depth: usize, edge: &str) {
        let label = if decl.init.is_some() {
            "FullVarDeclNode"
        } else {
            "EmptyVarDeclNode"
        };
        self.line(out, depth, &format!("{edge}{label} ->"));
        if let Some(keyword) = &decl.keyword {
            self.line(out, depth + 1, &format!("Key({})", keyword.text));
        }
        self.leaf(out, depth + 1, "", "IdNode", &decl.name);
        self.line(out, depth + 1, &format!("Type({})", decl.var_type.text));
        if let Some(init) = &decl.init {
            self.write_node(out, init, depth + 1, "Value: ");
        }
    }

    fn write_block(&self, out: &mut String, block: &Block, depth: usize, edge: &str) {
        if block.statements.is_empty() {
            self.line(out, depth, &format!("{edge}BlockNode (empty)"));
            return;
        }
        self.line(out, depth, &format!("{edge}BlockNode ->"));
        for statement in &block.statements {
            self.write_node(out, statement, depth + 1, "");
        }
    }

    fn write_conditional(
        &self,
        out: &mut String,
        label: &str,
        condition: &AstNode,
        body: &Block,
        depth: usize,
        edge: &str,
    ) {
        self.line(out, depth, &format!("{edge}{label} ->"));
        self.write_node(out, condition, depth + 1, "Condition: ");
        self.write_block(out, body, depth + 1, "Body: ");
    }
}

/// One line per token: location, kind name and text
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|tok| {
            format!(
                "{:<8}{:<15}{}\n",
                tok.location.to_string(),
                tok.kind.name(),
                tok.text
            )
        })
        .collect()
}
