mod common;

use pretty_assertions::assert_eq;

use rox::{parse, Lox, Status};

use common::run;

/// Parse cleanly, then return the resolver's diagnostics.
fn static_errors(source: &str) -> Vec<String> {
    let parsed = parse(source);
    assert!(!parsed.had_error(), "syntax errors: {:?}", parsed.errors);

    let mut lox = Lox::with_output(Box::new(std::io::sink()), Box::new(std::io::sink()));

    lox.resolve(&parsed.statements)
        .iter()
        .map(|e| e.to_string())
        .collect()
}

#[test]
fn clean_program_has_no_errors() {
    let source = "
        var g = 1;
        fun outer(a) {
            var b = a;
            fun inner() { return a + b + g; }
            return inner;
        }
        class A { init() { this.x = 1; } get() { return this.x; } }
        class B < A { get() { return super.get() + 1; } }
    ";

    assert_eq!(static_errors(source), Vec::<String>::new());
}

#[test]
fn return_at_top_level() {
    assert_eq!(
        static_errors("return 1;"),
        vec!["[line 1] Error at 'return': Can't return from top-level code."]
    );
}

#[test]
fn return_value_from_initializer() {
    assert_eq!(
        static_errors("class A {\n  init() { return 1; }\n}"),
        vec!["[line 2] Error at 'return': Can't return a value from an initializer."]
    );
}

#[test]
fn bare_return_in_initializer_is_allowed() {
    assert_eq!(
        static_errors("class A { init() { return; } }"),
        Vec::<String>::new()
    );
}

#[test]
fn class_inheriting_from_itself() {
    assert_eq!(
        static_errors("class A < A {}"),
        vec!["[line 1] Error at 'A': A class can't inherit from itself."]
    );
}

#[test]
fn local_read_in_own_initializer() {
    assert_eq!(
        static_errors("{ var a = a; }"),
        vec!["[line 1] Error at 'a': Can't read local variable in its own initializer."]
    );
}

#[test]
fn global_read_in_own_initializer_is_allowed() {
    assert_eq!(static_errors("var a = a;"), Vec::<String>::new());
}

#[test]
fn duplicate_local_declaration() {
    assert_eq!(
        static_errors("{ var a = 1; var a = 2; }"),
        vec!["[line 1] Error at 'a': Already a variable with this name in this scope."]
    );
    assert_eq!(
        static_errors("fun f(x, x) {}"),
        vec!["[line 1] Error at 'x': Already a variable with this name in this scope."]
    );
}

#[test]
fn duplicate_global_declaration_is_allowed() {
    assert_eq!(static_errors("var a = 1; var a = 2;"), Vec::<String>::new());
}

#[test]
fn this_outside_class() {
    assert_eq!(
        static_errors("print this;"),
        vec!["[line 1] Error at 'this': Can't use 'this' outside of a class."]
    );
    assert_eq!(
        static_errors("fun f() { return this; }"),
        vec!["[line 1] Error at 'this': Can't use 'this' outside of a class."]
    );
}

#[test]
fn super_outside_class() {
    assert_eq!(
        static_errors("super.m();"),
        vec!["[line 1] Error at 'super': Can't use 'super' outside of a class."]
    );
}

#[test]
fn super_without_superclass() {
    assert_eq!(
        static_errors("class A { m() { super.m(); } }"),
        vec!["[line 1] Error at 'super': Can't use 'super' in a class with no superclass."]
    );
}

#[test]
fn calling_init_directly() {
    assert_eq!(
        static_errors("class A { init() {} }\nvar a = A();\na.init();"),
        vec!["[line 3] Error at 'init': Can't call an initializer directly."]
    );
}

#[test]
fn super_init_is_allowed() {
    assert_eq!(
        static_errors("class A { init() {} }\nclass B < A { init() { super.init(); } }"),
        Vec::<String>::new()
    );
}

#[test]
fn errors_accumulate() {
    let errors = static_errors("return;\nprint this;\n{ var a = 1; var a = 2; }");

    assert_eq!(
        errors,
        vec![
            "[line 1] Error at 'return': Can't return from top-level code.",
            "[line 2] Error at 'this': Can't use 'this' outside of a class.",
            "[line 3] Error at 'a': Already a variable with this name in this scope.",
        ]
    );
}

#[test]
fn static_error_prevents_execution() {
    let (status, out, err) = run("print \"before\";\nreturn;\nprint \"after\";");

    assert_eq!(status, Status::StaticError);
    assert_eq!(status.exit_code(), 65);
    assert_eq!(out, "");
    assert_eq!(
        err,
        "[line 2] Error at 'return': Can't return from top-level code.\n"
    );
}

#[test]
fn syntax_error_prevents_execution() {
    let (status, out, err) = run("print \"before\";\nprint ;");

    assert_eq!(status, Status::StaticError);
    assert_eq!(out, "");
    assert_eq!(err, "[line 2] Error at ';': Expect expression.\n");
}

#[test]
fn closures_capture_the_binding_visible_at_declaration() {
    let lines = common::output_lines(
        "
        var a = \"global\";
        {
            fun show() { print a; }
            show();
            var a = \"block\";
            show();
        }
        ",
    );

    assert_eq!(lines, vec!["global", "global"]);
}

#[test]
fn distances_survive_nested_functions() {
    let lines = common::output_lines(
        "
        fun outer() {
            var x = 1;
            fun middle() {
                fun inner() { x = x + 1; return x; }
                return inner;
            }
            return middle();
        }
        var f = outer();
        print f();
        print f();
        ",
    );

    assert_eq!(lines, vec!["2", "3"]);
}
