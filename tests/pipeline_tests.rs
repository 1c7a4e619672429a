//! End-to-end tests for the compiler pipeline
//!
//! Each fixture under `tests/fixtures/valid` is lexed, parsed and lowered; the TAC listings are
//! pinned with inline snapshots. Fixtures under `tests/fixtures/invalid` must fail at a known stage.
//!
//! Review changes: `cargo insta review`

use std::fs;
use std::path::Path;

use tacfront::symbols::SymbolKind;
use tacfront::{Compilation, compile};

fn load_fixture(kind: &str, name: &str) -> String {
    let path = format!("tests/fixtures/{kind}/{name}.src");
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read fixture: {path}"))
}

fn compile_fixture(name: &str) -> Compilation {
    let source = load_fixture("valid", name);
    compile(&source).unwrap_or_else(|e| panic!("{name} failed to compile: {e}"))
}

// ============================================================================
// Fixture sweeps
// ============================================================================

#[test]
fn test_valid_fixtures() {
    let dir = Path::new("tests/fixtures/valid");
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|e| e == "src") {
            let source = fs::read_to_string(&path).unwrap();
            let result = compile(&source);
            assert!(result.is_ok(), "{} should compile, got {:?}", path.display(), result.err());
        }
    }
}

#[test]
fn test_invalid_fixtures_fail_at_expected_stage() {
    let cases = [
        ("bare_bang", "lex"),
        ("unknown_char", "lex"),
        ("missing_semicolon", "parse"),
        ("fractional_array_size", "parse"),
        ("unbraced_while", "parse"),
        ("if_without_parens", "parse"),
    ];
    for (name, stage) in cases {
        let source = load_fixture("invalid", name);
        let err = compile(&source).expect_err(name);
        assert_eq!(err.stage(), stage, "{name}: {err}");
    }
}

#[test]
fn test_missing_semicolon_points_at_next_token() {
    let err = compile(&load_fixture("invalid", "missing_semicolon")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected SEMICOLON but found ID at line 2, column 1"
    );
}

#[test]
fn test_unknown_character_position() {
    let err = compile(&load_fixture("invalid", "unknown_char")).unwrap_err();
    assert_eq!(err.to_string(), "unexpected character '$' at line 2, column 5");
}

#[test]
fn test_oversized_arrays_fail_in_generation() {
    for source in [
        "array a[3000000000000000000];",
        "array a[2000000000000000000]; array b[2000000000000000000];",
    ] {
        let err = compile(source).expect_err(source);
        assert_eq!(err.stage(), "generate", "{source}: {err}");
    }
}

#[test]
fn test_deeply_nested_input_fails_in_parsing() {
    let depth = 10_000;
    let source = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let err = compile(&source).unwrap_err();
    assert_eq!(err.stage(), "parse");
    assert!(err.to_string().starts_with("nesting deeper than"), "{err}");
}

// ============================================================================
// TAC listings
// ============================================================================

#[test]
fn test_routines_tac() {
    let compilation = compile_fixture("routines");
    insta::assert_snapshot!(compilation.tac.to_string(), @r"
    t0 = 10.0
    N = t0
    label func_square
    t1 = v * v
    return t1
    label proc_fill
    t2 = 0.0
    i = t2
    label L0
    t3 = i < n
    if_false t3 goto L1
    param i
    t4 = call square, 1
    store data, i, t4
    t5 = 1.0
    t6 = i + t5
    i = t6
    goto L0
    label L1
    param N
    t7 = call fill, 1
    t8 = 2.0
    t9 = load data, t8
    t10 = 1.0
    t11 = t9 + t10
    field_store p, x, t11
    ");
}

#[test]
fn test_branches_tac() {
    let compilation = compile_fixture("branches");
    insta::assert_snapshot!(compilation.tac.to_string(), @r"
    t0 = 1.0
    x = t0
    if_false x goto L0
    t1 = 2.0
    x = t1
    goto L1
    label L0
    t2 = 3.0
    x = t2
    label L1
    t3 = 2.0
    t4 = x >= t3
    if_false t4 goto L2
    y = x
    goto L3
    label L2
    t5 = 0.0
    y = t5
    label L3
    ");
}

#[test]
fn test_nesting_tac() {
    let compilation = compile_fixture("nesting");
    insta::assert_snapshot!(compilation.tac.to_string(), @r"
    t0 = 0.0
    total = t0
    t1 = 0.0
    i = t1
    label L0
    t2 = 3.0
    t3 = i <= t2
    if_false t3 goto L1
    t4 = 2.0
    t5 = i != t4
    if_false t5 goto L2
    t6 = 2.5
    t7 = i * t6
    t8 = total + t7
    total = t8
    goto L3
    label L2
    label L3
    t9 = 1.0
    t10 = i + t9
    i = t10
    goto L0
    label L1
    return total
    ");
}

#[test]
fn test_calls_tac() {
    let compilation = compile_fixture("calls");
    insta::assert_snapshot!(compilation.tac.to_string(), @r"
    label proc_log
    return
    t0 = 1.0
    t1 = 2.0
    param t0
    param t1
    t2 = call max, 2
    t3 = 0.0
    t4 = 3.0
    t5 = t3 - t4
    param t2
    param t5
    t6 = call log, 2
    t7 = call rand, 0
    r = t7
    ");
}

// ============================================================================
// Symbol table contents
// ============================================================================

#[test]
fn test_routines_symbols() {
    let compilation = compile_fixture("routines");
    let symbols = &compilation.symbols;

    let n = symbols.lookup("N").unwrap();
    assert_eq!(n.kind, SymbolKind::Const);
    assert_eq!(n.address, Some(0));

    let data = symbols.lookup("data").unwrap();
    assert_eq!(data.kind, SymbolKind::Array);
    assert_eq!(data.address, Some(8));
    assert_eq!(data.size, Some(80));

    let point = symbols.lookup("Point").unwrap();
    assert_eq!(point.kind, SymbolKind::Type);
    assert_eq!(point.extra.get("fields").map(String::as_str), Some("x, y"));

    let square = symbols.lookup("square").unwrap();
    assert_eq!(square.kind, SymbolKind::Func);
    assert_eq!(square.params.as_deref(), Some(&["v".to_string()][..]));
    assert_eq!(square.label.as_deref(), Some("func_square"));

    let fill = symbols.lookup("fill").unwrap();
    assert_eq!(fill.kind, SymbolKind::Proc);
    assert_eq!(fill.label.as_deref(), Some("proc_fill"));

    // Routine locals are gone once their scope closes; `p` was introduced at the top level.
    assert!(symbols.lookup("v").is_none());
    assert!(symbols.lookup("i").is_none());
    assert_eq!(symbols.lookup("p").map(|e| e.kind), Some(SymbolKind::Var));
}

#[test]
fn test_inferred_callees_are_recorded() {
    let compilation = compile_fixture("calls");
    let max = compilation.symbols.lookup("max").unwrap();
    assert_eq!(max.kind, SymbolKind::Func);
    assert_eq!(max.label.as_deref(), Some("func_max"));
    assert_eq!(max.extra.get("arity").map(String::as_str), Some("2"));
    assert_eq!(max.extra.get("inferred").map(String::as_str), Some("true"));

    let rand = compilation.symbols.lookup("rand").unwrap();
    assert_eq!(rand.extra.get("arity").map(String::as_str), Some("0"));

    // Declared routines are not marked as inferred.
    let log = compilation.symbols.lookup("log").unwrap();
    assert!(!log.extra.contains_key("inferred"));
}

#[test]
fn test_branch_locals_do_not_leak() {
    let compilation = compile_fixture("branches");
    assert!(compilation.symbols.lookup("x").is_some());
    assert!(compilation.symbols.lookup("y").is_none());
}

#[test]
fn test_temps_and_labels_are_unique() {
    for name in ["routines", "branches", "nesting", "calls"] {
        let compilation = compile_fixture(name);
        let mut defined: Vec<String> = compilation
            .tac
            .lines()
            .iter()
            .filter_map(|line| line.strip_prefix("label ").map(str::to_string))
            .collect();
        let total = defined.len();
        defined.sort();
        defined.dedup();
        assert_eq!(defined.len(), total, "{name}: duplicate label");
    }
}

#[test]
fn test_redeclaration_warns_and_overwrites() {
    let compilation = compile("const A = 1; array A[3];").unwrap();
    assert_eq!(compilation.warnings.len(), 1);
    assert_eq!(compilation.warnings[0].name, "A");
    assert_eq!(compilation.symbols.lookup("A").map(|e| e.kind), Some(SymbolKind::Array));
}

// ============================================================================
// Graph text
// ============================================================================

#[test]
fn test_graph_edges_match_tree_for_fixtures() {
    for name in ["routines", "branches", "nesting", "calls"] {
        let compilation = compile_fixture(name);
        let dot = compilation.dot();
        assert!(dot.starts_with("digraph AST {\nnode [shape=box];\n"), "{name}");
        assert!(dot.ends_with('}'), "{name}");
        assert_eq!(
            dot.matches("->").count(),
            tacfront::graph::tree_edge_count(&compilation.program),
            "{name}"
        );
    }
}
