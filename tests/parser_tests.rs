// Integration tests for the Rill lexer and parser

use rill::parser::ast::AstNode;
use rill::parser::lexer::{tokenize, Lexer, TokenKind};
use rill::parser::{
    parse_expression_source, parse_source, ArrayPolicy, AstPrinter, ParseError, Parser,
    ParserConfig, Precedence, SourceLocation,
};

fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source)
        .expect("Lexing failed")
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

#[test]
fn test_integer_text_is_one_int_token() {
    let samples = [
        "0",
        "7",
        "42",
        "007",
        "000",
        "1000000",
        "12345678901234567890123456789",
        "99999999999999999999999999999999999999999999",
    ];
    for text in samples {
        let tokens = kinds_and_texts(text);
        assert_eq!(tokens.len(), 2, "{text:?}");
        assert_eq!(tokens[0], (TokenKind::Int, text.to_string()), "{text:?}");
        assert_eq!(tokens[1].0, TokenKind::Eof, "{text:?}");
    }
}

#[test]
fn test_float_text_is_one_float_token() {
    let samples = [
        "0.0",
        "3.14",
        "00.5",
        "1.",
        ".5",
        "10.000",
        "123456789012345678901234567890.0987654321",
    ];
    for text in samples {
        let tokens = kinds_and_texts(text);
        assert_eq!(tokens.len(), 2, "{text:?}");
        assert_eq!(tokens[0], (TokenKind::Float, text.to_string()), "{text:?}");
        assert_eq!(tokens[1].0, TokenKind::Eof, "{text:?}");
    }
}

#[test]
fn test_declaration_tokens() {
    let tokens = kinds_and_texts("var x: int = 1 + 2;");
    let expected = vec![
        (TokenKind::Var, "var"),
        (TokenKind::Ident, "x"),
        (TokenKind::Colon, ":"),
        (TokenKind::VariableType, "int"),
        (TokenKind::Eq, "="),
        (TokenKind::Int, "1"),
        (TokenKind::Plus, "+"),
        (TokenKind::Int, "2"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Eof, "EOF"),
    ];

    assert_eq!(tokens.len(), expected.len());
    for ((kind, text), (want_kind, want_text)) in tokens.iter().zip(expected) {
        assert_eq!(*kind, want_kind);
        assert_eq!(text, want_text);
    }
}

#[test]
fn test_declaration_tree() {
    let program = parse_source("var x: int = 1 + 2;").expect("Parsing failed");
    assert_eq!(program.nodes.len(), 1);

    let AstNode::VarDecl(decl) = &program.nodes[0] else {
        panic!("expected declaration, got {:?}", program.nodes[0]);
    };
    assert_eq!(decl.name.text, "x");
    assert_eq!(decl.var_type.text, "int");

    match decl.init.as_deref() {
        Some(AstNode::BinaryOp { left, op, right }) => {
            assert_eq!(op.kind, TokenKind::Plus);
            assert!(matches!(left.as_ref(), AstNode::IntLiteral(t) if t.text == "1"));
            assert!(matches!(right.as_ref(), AstNode::IntLiteral(t) if t.text == "2"));
        }
        other => panic!("expected binary initializer, got {:?}", other),
    }
}

#[test]
fn test_if_tree() {
    let program = parse_source("if (x < 3) { x = x + 1; }").expect("Parsing failed");
    let AstNode::If {
        condition, body, ..
    } = &program.nodes[0]
    else {
        panic!("expected if, got {:?}", program.nodes[0]);
    };

    match condition.as_ref() {
        AstNode::BinaryOp { left, op, right } => {
            assert_eq!(op.kind, TokenKind::Lt);
            assert!(matches!(left.as_ref(), AstNode::Identifier(t) if t.text == "x"));
            assert!(matches!(right.as_ref(), AstNode::IntLiteral(t) if t.text == "3"));
        }
        other => panic!("expected comparison, got {:?}", other),
    }

    assert_eq!(body.statements.len(), 1);
    assert!(matches!(
        &body.statements[0],
        AstNode::Assignment { target, .. } if target.text == "x"
    ));
}

#[test]
fn test_missing_operand_reports_semicolon() {
    let err = parse_source("x +;").unwrap_err();
    assert!(matches!(err, ParseError::ExpectedExpression { .. }));
    assert_eq!(err.location(), Some(SourceLocation::new(1, 4)));
    assert!(err.to_string().contains("found ';'"));
}

#[test]
fn test_unknown_symbol_is_lexical_error() {
    let err = Lexer::new("x = 1 $ 2;").tokenize().unwrap_err();
    assert_eq!(err.location, SourceLocation::new(1, 7));
    assert!(err.to_string().contains("'$'"));
}

#[test]
fn test_array_literals() {
    match parse_expression_source("[1, 2, 3]").expect("Parsing failed") {
        AstNode::ArrayLiteral { array, .. } => {
            assert_eq!(array.len(), 3);
            assert!(array.elements().iter().all(|t| t.kind == TokenKind::Int));
        }
        other => panic!("expected array, got {:?}", other),
    }

    let err = parse_expression_source("[1, \"a\"]").unwrap_err();
    match err {
        ParseError::MixedArray { expected, found, .. } => {
            assert_eq!(expected, TokenKind::Int);
            assert_eq!(found.location, SourceLocation::new(1, 5));
        }
        other => panic!("expected mixed array error, got {:?}", other),
    }
}

#[test]
fn test_array_statement_still_needs_semicolon() {
    let err = parse_source("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    assert!(parse_source("[1, 2, 3];").is_ok());
}

#[test]
fn test_deep_nesting_is_reported_not_fatal() {
    let source = format!("x = {}1{};", "(".repeat(3000), ")".repeat(3000));
    let err = parse_source(&source).unwrap_err();
    assert!(matches!(err, ParseError::TooDeep { .. }));
    assert!(err.to_string().starts_with("Syntax error at line 1"));
}

#[test]
fn test_lenient_arrays_warn() {
    let config = ParserConfig::default().with_array_policy(ArrayPolicy::WarnAndClear);
    let mut parser = Parser::with_config(config);
    let program = parser
        .parse_source("var xs: array = [\"a\", b];")
        .expect("Parsing failed");

    assert_eq!(program.nodes.len(), 1);
    assert_eq!(parser.warnings().len(), 1);
}

#[test]
fn test_empty_sources() {
    for source in ["", "   \n\t", "// only a comment"] {
        assert_eq!(parse_source(source), Err(ParseError::EmptyInput), "{source:?}");
    }
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Ident);
    for _ in 0..3 {
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }
}

#[test]
fn test_precedence_modes_differ() {
    let source = "flag = a + b < c;";
    let printer = AstPrinter::new();

    let default_dump = printer.render_program(&parse_source(source).unwrap());
    let standard = ParserConfig::default().with_precedence(Precedence::Standard);
    let standard_dump = printer.render_program(
        &Parser::with_config(standard)
            .parse_source(source)
            .unwrap(),
    );

    // a + (b < c)
    assert!(default_dump.contains("   Value: BinOpNode ->\n      Left: IdNode(a)\n      Op(+)\n"));
    // (a + b) < c
    assert!(standard_dump.contains("      Op(<)\n      Right: IdNode(c)\n"));
    assert_ne!(default_dump, standard_dump);
}

#[test]
fn test_full_program() {
    let source = r#"
        // Sum of the first ten integers
        func sum(const limit: int) -> int {
            var total: int = 0;
            var i: int = 1;
            while (i <= limit) {
                total += i;
                i++;
            }
        }

        var names: array = ["ada", "grace"];
        if (!done) {
            message = "still " + "working";
        }
    "#;

    let program = parse_source(source).expect("Parsing failed");
    assert_eq!(program.nodes.len(), 3);
    assert!(matches!(program.nodes[0], AstNode::FunctionDecl { .. }));
    assert!(matches!(program.nodes[1], AstNode::VarDecl(_)));
    assert!(matches!(program.nodes[2], AstNode::If { .. }));
    assert_eq!(program.nodes[0].location(), SourceLocation::new(3, 9));
}

#[test]
fn test_printing_is_deterministic() {
    let program = parse_source("while (i < 10) { i += 2; }").unwrap();
    let printer = AstPrinter::new();
    assert_eq!(printer.render_program(&program), printer.render_program(&program));
}

#[test]
fn test_lex_lines() {
    let tokens = Lexer::default()
        .lex(&["var a: int;", "a = 2;"])
        .expect("Lexing failed");
    let two = tokens.iter().find(|t| t.text == "2").unwrap();
    assert_eq!(two.location, SourceLocation::new(2, 5));
}
