//! Parser integration tests.
//!
//! Verifies that the parser correctly builds AST structures from DuelScript
//! source and recovers from syntax errors.

use bumpalo::Bump;
use duelscript_ast::{Expr, LiteralValue, Stmt, TokenKind};
use duelscript_parser::{parse_source, ParseOutput};

/// Helper: parse source text and hand the output to `check`.
fn with_output<R>(source: &str, check: impl FnOnce(&ParseOutput<'_>) -> R) -> R {
    let arena = Bump::new();
    let output = parse_source(&arena, source);
    check(&output)
}

/// Helper: assert that parsing produces the expected number of top-level statements.
fn assert_statement_count(source: &str, expected: usize) {
    with_output(source, |output| {
        assert_eq!(output.program.len(), expected, "source: {}", source);
    });
}

/// Helper: assert that `source` parses cleanly.
fn assert_clean(source: &str) {
    with_output(source, |output| {
        assert!(!output.had_error, "source: {}\n{:?}", source, output.diagnostics);
        assert!(output.diagnostics.is_empty(), "source: {}", source);
    });
}

/// Helper: rendered diagnostics.
fn messages(source: &str) -> Vec<String> {
    with_output(source, |output| {
        output
            .diagnostics
            .diagnostics()
            .iter()
            .map(|d| d.to_string())
            .collect()
    })
}

fn expression_of<'a>(stmt: &Stmt<'a>) -> &'a Expr<'a> {
    match stmt {
        Stmt::Expression(statement) => statement.expression,
        other => panic!("expected expression statement, got {}", other.kind_name()),
    }
}

fn number_of(expr: &Expr<'_>) -> f64 {
    match expr {
        Expr::Literal(literal) => match literal.value {
            LiteralValue::Number(n) => n,
            other => panic!("expected number, got {:?}", other),
        },
        other => panic!("expected literal, got {}", other.kind_name()),
    }
}

fn variable_name<'a>(expr: &Expr<'a>) -> &'a str {
    match expr {
        Expr::Variable(variable) => variable.name.lexeme,
        other => panic!("expected variable, got {}", other.kind_name()),
    }
}

// ============================================================================
// Variable Declarations
// ============================================================================

#[test]
fn test_parse_builtin_type_declaration() {
    with_output("DarkMagician atk = 2500;", |output| {
        assert!(!output.had_error);
        match &output.program.statements[0] {
            Stmt::VarDecl(decl) => {
                assert_eq!(decl.type_name.kind, TokenKind::KeywordDarkMagician);
                assert_eq!(decl.name.lexeme, "atk");
                assert_eq!(decl.initializer.map(number_of), Some(2500.0));
            }
            other => panic!("expected VarDecl, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_parse_declaration_without_initializer() {
    with_output("TimeWizard turns;", |output| match &output.program.statements[0] {
        Stmt::VarDecl(decl) => assert!(decl.initializer.is_none()),
        other => panic!("expected VarDecl, got {}", other.kind_name()),
    });
}

#[test]
fn test_parse_user_type_declaration() {
    with_output("Duelist d = Duelist();", |output| {
        assert!(!output.had_error);
        match &output.program.statements[0] {
            Stmt::VarDecl(decl) => {
                assert_eq!(decl.type_name.kind, TokenKind::Identifier);
                assert_eq!(decl.type_name.lexeme, "Duelist");
                assert_eq!(decl.name.lexeme, "d");
                assert!(matches!(decl.initializer, Some(Expr::Call(_))));
            }
            other => panic!("expected VarDecl, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_identifier_followed_by_call_is_expression() {
    with_output("Duelist(1); hero.hp;", |output| {
        assert!(!output.had_error);
        assert!(matches!(expression_of(&output.program.statements[0]), Expr::Call(_)));
        assert!(matches!(expression_of(&output.program.statements[1]), Expr::Get(_)));
    });
}

#[test]
fn test_yugi_call_is_expression() {
    with_output("Yugi();", |output| {
        assert!(!output.had_error);
        match expression_of(&output.program.statements[0]) {
            Expr::Call(call) => assert_eq!(variable_name(call.callee), "Yugi"),
            other => panic!("expected call, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_parse_multiple_declarations() {
    assert_statement_count(
        "DarkMagician a = 1; BlueEyesWhiteDragon b = 2; RedEyesBlackDragon c = 3;",
        3,
    );
}

#[test]
fn test_declaration_missing_semicolon() {
    assert_eq!(
        messages("DarkMagician a = 1"),
        vec!["[Line 1] Error at end: Expect ';' after variable declaration."]
    );
}

// ============================================================================
// Rituals (functions)
// ============================================================================

#[test]
fn test_parse_main_ritual() {
    with_output("Ritual Yugi() {\n  Summon << \"It's time to duel!\";\n}", |output| {
        assert!(!output.had_error);
        match &output.program.statements[0] {
            Stmt::Function(function) => {
                assert_eq!(function.name.kind, TokenKind::KeywordYugi);
                assert!(function.params.is_empty());
                assert_eq!(function.body.statements.len(), 1);
                assert!(matches!(function.body.statements[0], Stmt::Summon(_)));
            }
            other => panic!("expected Function, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_parse_ritual_with_params() {
    with_output(
        "Ritual attack(DarkMagician atk, Duelist target) { Tribute atk; }",
        |output| {
            assert!(!output.had_error);
            match &output.program.statements[0] {
                Stmt::Function(function) => {
                    assert_eq!(function.name.lexeme, "attack");
                    let params: Vec<(&str, &str)> = function
                        .params
                        .iter()
                        .map(|p| (p.type_name.lexeme, p.name.lexeme))
                        .collect();
                    assert_eq!(params, vec![("DarkMagician", "atk"), ("Duelist", "target")]);
                }
                other => panic!("expected Function, got {}", other.kind_name()),
            }
        },
    );
}

#[test]
fn test_ritual_parameter_needs_type() {
    assert_eq!(
        messages("Ritual f(5) {}"),
        vec!["[Line 1] Error at '5': Expect parameter type (e.g., DarkMagician)."]
    );
}

#[test]
fn test_ritual_needs_name() {
    assert_eq!(
        messages("Ritual () {}"),
        vec!["[Line 1] Error at '(': Expect function name."]
    );
}

#[test]
fn test_ritual_needs_body() {
    assert_eq!(
        messages("Ritual f();"),
        vec!["[Line 1] Error at ';': Expect '{' before function body."]
    );
}

// ============================================================================
// Classes and structs
// ============================================================================

#[test]
fn test_parse_class() {
    let source = "\
LordOfD Duelist {
    DarkMagician lifePoints = 4000;
    ;
    Deck deck;
    Ritual draw(TimeWizard count) { Tribute count; }
};";
    with_output(source, |output| {
        assert!(!output.had_error, "{:?}", output.diagnostics);
        match &output.program.statements[0] {
            Stmt::Class(class) => {
                assert_eq!(class.name.lexeme, "Duelist");
                let fields: Vec<&str> = class.fields.iter().map(|f| f.name.lexeme).collect();
                assert_eq!(fields, vec!["lifePoints", "deck"]);
                assert_eq!(class.methods.len(), 1);
                assert_eq!(class.methods[0].name.lexeme, "draw");
                assert_eq!(class.methods[0].params.len(), 1);
            }
            other => panic!("expected Class, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_class_requires_trailing_semicolon() {
    assert_eq!(
        messages("LordOfD Duelist { }"),
        vec!["[Line 1] Error at end: Expect ';' after class declaration."]
    );
}

#[test]
fn test_class_rejects_statements() {
    // Recovery resumes after `1;`, so the closing brace is reported as well.
    let reported = messages("LordOfD Duelist { Summon << 1; };");
    assert_eq!(
        reported[0],
        "[Line 1] Error at 'Summon': Expect method (Ritual) or field declaration inside class."
    );
    assert_eq!(reported[1], "[Line 1] Error at '}': Expect expression.");
}

#[test]
fn test_method_messages_name_the_method() {
    assert_eq!(
        messages("LordOfD Duelist { Ritual 7 };"),
        vec!["[Line 1] Error at '7': Expect method name."]
    );
}

#[test]
fn test_parse_struct() {
    with_output("ToonWorld Card { DarkMagician atk; Card next; };", |output| {
        assert!(!output.had_error);
        match &output.program.statements[0] {
            Stmt::Struct(decl) => {
                assert_eq!(decl.name.lexeme, "Card");
                let types: Vec<&str> = decl.fields.iter().map(|f| f.type_name.lexeme).collect();
                assert_eq!(types, vec!["DarkMagician", "Card"]);
            }
            other => panic!("expected Struct, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_struct_rejects_methods() {
    assert_eq!(
        messages("ToonWorld Card { Ritual flip() {} };"),
        vec!["[Line 1] Error at 'Ritual': Expect field declaration inside struct."]
    );
}

// ============================================================================
// Include / Using
// ============================================================================

#[test]
fn test_parse_include_and_using() {
    with_output("#SetField \"spells.ds\";\nKaiba Joey;", |output| {
        assert!(!output.had_error);
        match &output.program.statements[0] {
            Stmt::Include(include) => assert_eq!(include.path.lexeme, "spells.ds"),
            other => panic!("expected Include, got {}", other.kind_name()),
        }
        match &output.program.statements[1] {
            Stmt::Using(using) => {
                assert_eq!(using.namespace.kind, TokenKind::KeywordKaiba);
                assert_eq!(using.name.kind, TokenKind::KeywordJoey);
            }
            other => panic!("expected Using, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_include_requires_string() {
    assert_eq!(
        messages("#SetField spells;"),
        vec!["[Line 1] Error at 'spells': Expect module name (string) after #SetField."]
    );
}

#[test]
fn test_using_requires_joey() {
    assert_eq!(
        messages("Kaiba Yugi;"),
        vec!["[Line 1] Error at 'Yugi': Expect 'Joey' after 'Kaiba'."]
    );
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_parse_if_else() {
    let source = "JudgmentOfAnubis (atk > 2000) Summon << atk; SolemnJudgment { Draw >> atk; }";
    with_output(source, |output| {
        assert!(!output.had_error);
        match &output.program.statements[0] {
            Stmt::If(statement) => {
                assert!(matches!(statement.condition, Expr::Binary(_)));
                assert!(matches!(statement.then_branch, Stmt::Summon(_)));
                match statement.else_branch {
                    Some(Stmt::Block(block)) => {
                        assert!(matches!(block.statements[0], Stmt::Draw(_)));
                    }
                    other => panic!("expected else block, got {:?}", other),
                }
            }
            other => panic!("expected If, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_parse_if_without_else() {
    with_output("JudgmentOfAnubis (true) { }", |output| match &output.program.statements[0] {
        Stmt::If(statement) => assert!(statement.else_branch.is_none()),
        other => panic!("expected If, got {}", other.kind_name()),
    });
}

#[test]
fn test_if_requires_paren() {
    assert_eq!(
        messages("JudgmentOfAnubis true { }"),
        vec!["[Line 1] Error at 'true': Expect '(' after 'JudgmentOfAnubis'."]
    );
}

#[test]
fn test_parse_while() {
    with_output("SwordsOfRevealingLight (turn < 3) { turn = turn + 1; }", |output| {
        assert!(!output.had_error);
        match &output.program.statements[0] {
            Stmt::While(statement) => {
                assert!(matches!(statement.condition, Expr::Binary(_)));
                assert!(matches!(statement.body, Stmt::Block(_)));
            }
            other => panic!("expected While, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_parse_return() {
    with_output("Tribute; Tribute 1 + 2;", |output| {
        assert!(!output.had_error);
        match (&output.program.statements[0], &output.program.statements[1]) {
            (Stmt::Return(bare), Stmt::Return(valued)) => {
                assert!(bare.value.is_none());
                assert_eq!(bare.keyword.kind, TokenKind::KeywordTribute);
                assert!(matches!(valued.value, Some(Expr::Binary(_))));
            }
            _ => panic!("expected two returns"),
        }
    });
}

#[test]
fn test_summon_chain_is_left_associative() {
    with_output("Summon << \"atk: \" << atk << 1;", |output| {
        assert!(!output.had_error);
        let expression = match &output.program.statements[0] {
            Stmt::Summon(summon) => summon.expression,
            other => panic!("expected Summon, got {}", other.kind_name()),
        };
        let Expr::Binary(outer) = expression else {
            panic!("expected binary");
        };
        assert_eq!(outer.operator.kind, TokenKind::SummonOp);
        assert_eq!(number_of(outer.right), 1.0);
        let Expr::Binary(inner) = outer.left else {
            panic!("expected nested binary");
        };
        assert!(matches!(inner.left, Expr::Literal(_)));
        assert_eq!(variable_name(inner.right), "atk");
    });
}

#[test]
fn test_summon_requires_operator() {
    assert_eq!(
        messages("Summon atk;"),
        vec!["[Line 1] Error at 'atk': Expect '<<' after 'Summon'."]
    );
}

#[test]
fn test_parse_draw() {
    with_output("Draw >> card;", |output| {
        assert!(!output.had_error);
        match &output.program.statements[0] {
            Stmt::Draw(draw) => assert_eq!(draw.name.lexeme, "card"),
            other => panic!("expected Draw, got {}", other.kind_name()),
        }
    });
    assert_eq!(
        messages("Draw card;"),
        vec!["[Line 1] Error at 'card': Expect '>>' after 'Draw'."]
    );
}

#[test]
fn test_nested_blocks() {
    with_output("{ { DarkMagician a; } Summon << a; }", |output| {
        assert!(!output.had_error);
        match &output.program.statements[0] {
            Stmt::Block(block) => {
                assert_eq!(block.statements.len(), 2);
                assert!(matches!(block.statements[0], Stmt::Block(_)));
            }
            other => panic!("expected Block, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_unterminated_block() {
    assert_eq!(
        messages("{ Summon << 1;"),
        vec!["[Line 1] Error at end: Expect '}' after block."]
    );
}

// ============================================================================
// Assignment
// ============================================================================

#[test]
fn test_assignment_to_variable() {
    with_output("x = 1;", |output| {
        assert!(!output.had_error);
        match expression_of(&output.program.statements[0]) {
            Expr::Assign(assign) => {
                assert_eq!(assign.name.lexeme, "x");
                assert_eq!(number_of(assign.value), 1.0);
            }
            other => panic!("expected Assign, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_assignment_to_property() {
    with_output("obj.field = 1;", |output| {
        assert!(!output.had_error);
        match expression_of(&output.program.statements[0]) {
            Expr::Set(set) => {
                assert_eq!(variable_name(set.object), "obj");
                assert_eq!(set.name.lexeme, "field");
                assert_eq!(number_of(set.value), 1.0);
            }
            other => panic!("expected Set, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_assignment_to_nested_property_keeps_object_chain() {
    with_output("a.b.c = 5;", |output| match expression_of(&output.program.statements[0]) {
        Expr::Set(set) => {
            assert_eq!(set.name.lexeme, "c");
            match set.object {
                Expr::Get(get) => {
                    assert_eq!(get.name.lexeme, "b");
                    assert_eq!(variable_name(get.object), "a");
                }
                other => panic!("expected Get, got {}", other.kind_name()),
            }
        }
        other => panic!("expected Set, got {}", other.kind_name()),
    });
}

#[test]
fn test_assignment_is_right_associative() {
    with_output("a = b = 3;", |output| match expression_of(&output.program.statements[0]) {
        Expr::Assign(outer) => {
            assert_eq!(outer.name.lexeme, "a");
            match outer.value {
                Expr::Assign(inner) => assert_eq!(inner.name.lexeme, "b"),
                other => panic!("expected Assign, got {}", other.kind_name()),
            }
        }
        other => panic!("expected Assign, got {}", other.kind_name()),
    });
}

#[test]
fn test_invalid_assignment_target_continues() {
    with_output("1 = 2;\nx = 3;", |output| {
        assert!(output.had_error);
        assert_eq!(output.program.len(), 2);
        // The target degrades to the already parsed left-hand side.
        assert_eq!(number_of(expression_of(&output.program.statements[0])), 1.0);
        assert!(matches!(expression_of(&output.program.statements[1]), Expr::Assign(_)));
    });
    assert_eq!(
        messages("1 = 2;"),
        vec!["[Line 1] Error at '=': Invalid assignment target."]
    );
}

#[test]
fn test_call_is_not_an_assignment_target() {
    with_output("f() = 1;", |output| {
        assert!(output.had_error);
        assert_eq!(output.program.len(), 1);
        assert!(matches!(expression_of(&output.program.statements[0]), Expr::Call(_)));
    });
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_multiplication_binds_tighter() {
    with_output("1 + 2 * 3;", |output| match expression_of(&output.program.statements[0]) {
        Expr::Binary(add) => {
            assert_eq!(add.operator.kind, TokenKind::Plus);
            assert_eq!(number_of(add.left), 1.0);
            match add.right {
                Expr::Binary(mul) => {
                    assert_eq!(mul.operator.kind, TokenKind::Star);
                    assert_eq!(number_of(mul.left), 2.0);
                    assert_eq!(number_of(mul.right), 3.0);
                }
                other => panic!("expected Binary, got {}", other.kind_name()),
            }
        }
        other => panic!("expected Binary, got {}", other.kind_name()),
    });
}

#[test]
fn test_grouping_overrides_precedence() {
    with_output("(1 + 2) * 3;", |output| match expression_of(&output.program.statements[0]) {
        Expr::Binary(mul) => {
            assert_eq!(mul.operator.kind, TokenKind::Star);
            assert!(matches!(mul.left, Expr::Grouping(_)));
        }
        other => panic!("expected Binary, got {}", other.kind_name()),
    });
}

#[test]
fn test_binary_is_left_associative() {
    with_output("10 - 4 - 3;", |output| match expression_of(&output.program.statements[0]) {
        Expr::Binary(outer) => {
            assert_eq!(number_of(outer.right), 3.0);
            assert!(matches!(outer.left, Expr::Binary(_)));
        }
        other => panic!("expected Binary, got {}", other.kind_name()),
    });
}

#[test]
fn test_comparison_binds_tighter_than_equality() {
    with_output("a < b == c >= d;", |output| match expression_of(&output.program.statements[0]) {
        Expr::Binary(eq) => {
            assert_eq!(eq.operator.kind, TokenKind::EqualEqual);
            assert!(matches!(eq.left, Expr::Binary(b) if b.operator.kind == TokenKind::Less));
            assert!(matches!(eq.right, Expr::Binary(b) if b.operator.kind == TokenKind::GreaterEqual));
        }
        other => panic!("expected Binary, got {}", other.kind_name()),
    });
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    with_output("-1 * !x;", |output| match expression_of(&output.program.statements[0]) {
        Expr::Binary(mul) => {
            assert!(matches!(mul.left, Expr::Unary(u) if u.operator.kind == TokenKind::Minus));
            assert!(matches!(mul.right, Expr::Unary(u) if u.operator.kind == TokenKind::Bang));
        }
        other => panic!("expected Binary, got {}", other.kind_name()),
    });
}

#[test]
fn test_literals() {
    with_output("\"Exodia\"; true; false; 3.5;", |output| {
        let values: Vec<LiteralValue> = output
            .program
            .statements
            .iter()
            .map(|s| match expression_of(s) {
                Expr::Literal(literal) => literal.value,
                other => panic!("expected literal, got {}", other.kind_name()),
            })
            .collect();
        assert_eq!(
            values,
            vec![
                LiteralValue::String("Exodia"),
                LiteralValue::Boolean(true),
                LiteralValue::Boolean(false),
                LiteralValue::Number(3.5),
            ]
        );
    });
}

// ============================================================================
// Calls and property access
// ============================================================================

#[test]
fn test_call_property_chaining() {
    with_output("a.b(1).c;", |output| {
        assert!(!output.had_error);
        let Expr::Get(outer) = expression_of(&output.program.statements[0]) else {
            panic!("expected Get");
        };
        assert_eq!(outer.name.lexeme, "c");
        let Expr::Call(call) = outer.object else {
            panic!("expected Call");
        };
        assert_eq!(call.arguments.len(), 1);
        assert_eq!(number_of(&call.arguments[0]), 1.0);
        assert_eq!(call.paren.kind, TokenKind::RightParen);
        let Expr::Get(inner) = call.callee else {
            panic!("expected Get");
        };
        assert_eq!(inner.name.lexeme, "b");
        assert_eq!(variable_name(inner.object), "a");
    });
}

#[test]
fn test_chained_calls() {
    with_output("summon()(1, 2)();", |output| {
        let Expr::Call(outer) = expression_of(&output.program.statements[0]) else {
            panic!("expected Call");
        };
        assert!(outer.arguments.is_empty());
        let Expr::Call(middle) = outer.callee else {
            panic!("expected Call");
        };
        assert_eq!(middle.arguments.len(), 2);
        assert!(matches!(middle.callee, Expr::Call(_)));
    });
}

#[test]
fn test_property_name_required() {
    assert_eq!(
        messages("deck.;"),
        vec!["[Line 1] Error at ';': Expect property name after '.'."]
    );
}

fn numbered_list(prefix: &str, count: usize) -> String {
    (0..count)
        .map(|i| format!("{}{}", prefix, i))
        .collect::<Vec<_>>()
        .join(", ")
}

#[test]
fn test_argument_cap() {
    let source = format!("f({});", numbered_list("", 256));
    with_output(&source, |output| {
        assert!(output.had_error);
        assert_eq!(output.diagnostics.with_code(2003).count(), 1);
        assert_eq!(output.diagnostics.len(), 1);
        match expression_of(&output.program.statements[0]) {
            Expr::Call(call) => {
                assert_eq!(call.arguments.len(), 256);
                assert_eq!(number_of(&call.arguments[255]), 255.0);
            }
            other => panic!("expected Call, got {}", other.kind_name()),
        }
    });
}

#[test]
fn test_argument_cap_boundary() {
    let source = format!("f({});", numbered_list("", 255));
    assert_clean(&source);
}

#[test]
fn test_parameter_cap() {
    let source = format!("Ritual f({}) {{ }}", numbered_list("DarkMagician p", 256));
    with_output(&source, |output| {
        assert!(output.had_error);
        let diags: Vec<String> = output.diagnostics.with_code(2004).map(|d| d.to_string()).collect();
        assert_eq!(diags, vec!["[Line 1] Error at 'DarkMagician': Can't have more than 255 parameters."]);
        match &output.program.statements[0] {
            Stmt::Function(function) => {
                assert_eq!(function.params.len(), 256);
                assert_eq!(function.params[255].name.lexeme, "p255");
            }
            other => panic!("expected Function, got {}", other.kind_name()),
        }
    });
}

// ============================================================================
// Error recovery
// ============================================================================

#[test]
fn test_balanced_recovery() {
    let source = "DarkMagician a = 1;\nSummon 5;\nDarkMagician b = 2;";
    with_output(source, |output| {
        assert!(output.had_error);
        let names: Vec<&str> = output
            .program
            .statements
            .iter()
            .map(|s| match s {
                Stmt::VarDecl(decl) => decl.name.lexeme,
                other => panic!("unexpected {}", other.kind_name()),
            })
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    });
    assert_eq!(
        messages(source),
        vec!["[Line 2] Error at '5': Expect '<<' after 'Summon'."]
    );
}

#[test]
fn test_recovery_stops_at_declaration_keyword() {
    let source = "x = (1 2 Ritual f() { }";
    with_output(source, |output| {
        assert!(output.had_error);
        assert_eq!(output.program.len(), 1);
        assert!(matches!(output.program.statements[0], Stmt::Function(_)));
    });
}

#[test]
fn test_recovery_inside_ritual_body() {
    let source = "Ritual Yugi() {\n  Summon << ;\n}\nRitual after() { }";
    with_output(source, |output| {
        assert!(output.had_error);
        let kinds: Vec<&str> = output.program.statements.iter().map(|s| s.kind_name()).collect();
        // The broken ritual is dropped; the `}` that closed it is reported on its own.
        assert_eq!(kinds, vec!["Function"]);
        assert_eq!(output.diagnostics.error_count(), 2);
    });
}

#[test]
fn test_malformed_class_does_not_hide_struct() {
    let source = "LordOfD { DarkMagician x; };\nToonWorld Card { DarkMagician atk; };";
    with_output(source, |output| {
        assert!(output.had_error);
        assert_eq!(output.program.len(), 1);
        assert!(matches!(output.program.statements[0], Stmt::Struct(_)));
    });
}

#[test]
fn test_errors_only_at_end() {
    with_output("DarkMagician", |output| {
        assert!(output.had_error);
        assert!(output.program.is_empty());
    });
}

#[test]
fn test_scanner_errors_do_not_set_flag() {
    with_output("x = 1 @;", |output| {
        assert!(!output.had_error);
        assert_eq!(output.program.len(), 1);
        assert_eq!(output.diagnostics.with_code(1001).count(), 1);
    });
}

#[test]
fn test_deep_nesting_is_reported() {
    // Run on a thread with a roomy stack; the guard, not the stack size,
    // has to stop the recursion.
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let source = format!("{}1{};\nDarkMagician ok = 1;", "(".repeat(500), ")".repeat(500));
            with_output(&source, |output| {
                assert!(output.had_error);
                assert_eq!(output.diagnostics.with_code(2019).count(), 1);
                assert_eq!(output.program.len(), 1);
                assert!(matches!(output.program.statements[0], Stmt::VarDecl(_)));
            });

            let source = format!("{}x;", "!".repeat(500));
            with_output(&source, |output| {
                assert!(output.had_error);
                assert_eq!(output.diagnostics.with_code(2019).count(), 1);
            });
        })
        .expect("spawn parser thread");
    handle.join().expect("parser thread panicked");
}

#[test]
fn test_realistic_program() {
    let source = r#"#SetField "monsters.ds";
Kaiba Joey;

MillenniumEye: a duelist and their deck
ToonWorld Card {
    DarkMagician atk;
    DarkMagician def;
};

LordOfD Duelist {
    TimeWizard lifePoints = 4000;
    Ritual takeDamage(DarkMagician amount) {
        lifePoints = lifePoints - amount;
        JudgmentOfAnubis (lifePoints <= 0) {
            Summon << "Defeated!";
        }
    }
};

Ritual Yugi() {
    Duelist kaiba = Duelist();
    kaiba.lifePoints = 8000;
    SwordsOfRevealingLight (kaiba.lifePoints > 0) {
        kaiba.takeDamage(2500);
    }
    ShadowRealm{ banished }
    Draw >> kaiba;
    Tribute;
}
"#;
    with_output(source, |output| {
        assert!(!output.had_error, "{:?}", output.diagnostics);
        assert!(output.diagnostics.is_empty());
        let kinds: Vec<&str> = output.program.statements.iter().map(|s| s.kind_name()).collect();
        assert_eq!(kinds, vec!["Include", "Using", "Struct", "Class", "Function"]);
    });
}
