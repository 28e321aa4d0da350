use pretty_assertions::assert_eq;

use rox::ast_printer::AstPrinter;
use rox::expr::Expr;
use rox::parse;
use rox::stmt::Stmt;

fn printed(source: &str) -> Vec<String> {
    let parsed = parse(source);
    assert!(
        !parsed.had_error(),
        "unexpected errors: {:?}",
        parsed.errors
    );

    parsed.statements.iter().map(AstPrinter::print_stmt).collect()
}

fn error_messages(source: &str) -> Vec<String> {
    parse(source).errors.iter().map(|e| e.to_string()).collect()
}

#[test]
fn precedence_levels() {
    assert_eq!(
        printed("1 + 2 * 3 - 4 / 2;"),
        vec!["(; (- (+ 1.0 (* 2.0 3.0)) (/ 4.0 2.0)))"]
    );
    assert_eq!(
        printed("!a == b < c or d and e;"),
        vec!["(; (or (== (! a) (< b c)) (and d e)))"]
    );
    assert_eq!(printed("-(1 + 2);"), vec!["(; (- (group (+ 1.0 2.0))))"]);
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(printed("a = b = 3;"), vec!["(; (= a (= b 3.0)))"]);
}

#[test]
fn property_assignment_becomes_set() {
    assert_eq!(
        printed("a.b(x).c = 1;"),
        vec!["(; (= (. (call (. a b) x) c) 1.0))"]
    );
}

#[test]
fn chained_calls_and_gets() {
    assert_eq!(
        printed("f(1)(2, 3).g;"),
        vec!["(; (. (call (call f 1.0) 2.0 3.0) g))"]
    );
}

#[test]
fn declarations() {
    assert_eq!(
        printed("var a; var b = \"s\"; fun f(x, y) { return x; } print b;"),
        vec![
            "(var a)",
            "(var b = s)",
            "(fun f (x y) (return x))",
            "(print b)"
        ]
    );
}

#[test]
fn class_with_superclass_and_methods() {
    assert_eq!(
        printed("class B < A { init(x) { this.x = x; } m() { return super.m(); } }"),
        vec!["(class B < A (method init (x) (; (= (. this x) x))) (method m () (return (call (super m)))))"]
    );
}

#[test]
fn for_loop_is_lowered_to_while() {
    assert_eq!(
        printed("for (var i = 0; i < 3; i = i + 1) print i;"),
        vec!["(block (var i = 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"]
    );
    assert_eq!(printed("for (;;) {}"), vec!["(while true (block))"]);
}

#[test]
fn if_else_binds_to_nearest_if() {
    assert_eq!(
        printed("if (a) if (b) print 1; else print 2;"),
        vec!["(if a (if b (print 1.0) (print 2.0)))"]
    );
}

#[test]
fn every_reference_gets_its_own_identity() {
    let parsed = parse("a; a;");

    let ids: Vec<_> = parsed
        .statements
        .iter()
        .map(|stmt| match stmt {
            Stmt::Expression(Expr::Variable { id, .. }) => *id,
            other => panic!("unexpected statement {:?}", other),
        })
        .collect();

    assert_ne!(ids[0], ids[1]);
}

#[test]
fn invalid_assignment_target_is_reported_but_parsing_continues() {
    let parsed = parse("1 + 2 = 3; print 4;");

    assert_eq!(
        parsed.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        vec!["[line 1] Error at '=': Invalid assignment target."]
    );
    assert_eq!(parsed.statements.len(), 2);
}

#[test]
fn panic_mode_reports_each_statement_error_once() {
    let errors = error_messages("var = 1;\nprint (;\nvar ok = 2;\nprint ok");

    assert_eq!(
        errors,
        vec![
            "[line 1] Error at '=': Expect variable name.",
            "[line 2] Error at ';': Expect expression.",
            "[line 4] Error at end: Expect ';' after value.",
        ]
    );
}

#[test]
fn recovery_keeps_good_statements() {
    let parsed = parse("print 1;\nvar 2;\nprint 3;");

    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(
        parsed
            .statements
            .iter()
            .map(AstPrinter::print_stmt)
            .collect::<Vec<_>>(),
        vec!["(print 1.0)", "(print 3.0)"]
    );
}

#[test]
fn errors_inside_blocks_recover_within_the_block() {
    let parsed = parse("{ var = 1; print 2; }\nprint 3;");

    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.statements.len(), 2);
}

#[test]
fn too_many_arguments() {
    let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
    let source = format!("f({});", args.join(", "));
    let parsed = parse(&source);

    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(
        parsed.errors[0].message(),
        "Can't have more than 255 arguments."
    );
    // Non-fatal: the call itself still parses.
    assert_eq!(parsed.statements.len(), 1);
}

#[test]
fn too_many_parameters() {
    let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
    let source = format!("fun f({}) {{}}", params.join(", "));
    let parsed = parse(&source);

    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(
        parsed.errors[0].message(),
        "Can't have more than 255 parameters."
    );
}

#[test]
fn lexical_errors_are_reported_alongside_syntax_errors() {
    let errors = error_messages("var a = @;");

    assert_eq!(
        errors,
        vec![
            "[line 1] Error: Unexpected character: @",
            "[line 1] Error at ';': Expect expression.",
        ]
    );
}
