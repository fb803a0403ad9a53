use hycomb::error::CompilerError;
use hycomb::symbol::{self, ParseRule, SymbolTable};
use hycomb::term::Term;
use hycomb::term::defs::{I, K};
use hycomb::term::func::var;

#[test]
fn standard_table_declares_every_symbol_once() {
    let table = symbol::symbols();
    assert_eq!(table.len(), 38);
    assert_eq!(table.arity(symbol::TOP), Some(0));
    assert_eq!(table.arity(symbol::QUOTE), Some(1));
    assert_eq!(table.arity(symbol::APP), Some(2));
    assert_eq!(table.arity(symbol::LETREC), Some(3));
    assert_eq!(table.arity("FOO"), None);
    assert_eq!(table.get(symbol::VAR).unwrap().parse_rule, ParseRule::Name);
}

#[test]
fn declaration_order_is_preserved() {
    let names: Vec<&str> = symbol::symbols().iter().map(|s| s.name).take(4).collect();
    assert_eq!(names, vec!["TOP", "BOT", "I", "K"]);
    assert_eq!(symbol::symbols().iter().last().unwrap().name, "EQUAL");
}

#[test]
fn duplicate_declaration_is_rejected() {
    let mut table = SymbolTable::new();
    table.declare("FOO", 2, ParseRule::Children).unwrap();
    let err = table.declare("FOO", 1, ParseRule::Children).unwrap_err();
    assert!(matches!(err, CompilerError::DuplicateSymbol(ref s) if s == "FOO"));
    assert_eq!(table.arity("FOO"), Some(2));
}

#[test]
fn arity_map_matches_table() {
    let arities = symbol::symbols().arities();
    assert_eq!(arities.len(), 38);
    assert_eq!(arities["STACK"], 2);
    assert_eq!(arities["NIL"], 0);
}

#[test]
fn vocabularies() {
    let combinators = symbol::combinator_vocabulary();
    assert!(combinators.contains(&"S"));
    assert!(combinators.contains(&"QEQUAL"));
    assert!(combinators.contains(&"APP"));
    assert!(!combinators.contains(&"NIL"));
    assert!(!combinators.contains(&"LAMBDA"));

    let lambdas = symbol::lambda_vocabulary();
    assert!(lambdas.contains(&"LAMBDA"));
    assert!(lambdas.contains(&"LETREC"));
    assert!(!lambdas.contains(&"S"));
}

#[test]
fn checked_constructors_validate_arity() {
    assert_eq!(Term::symbol("K").unwrap(), K);
    assert_eq!(Term::node("I", Vec::new()).unwrap(), I);

    let err = Term::node("APP", vec![I]).unwrap_err();
    assert!(matches!(
        err,
        CompilerError::ArityMismatch { expected: 2, found: 1, .. }
    ));
    assert!(Term::symbol("APP").unwrap_err().is_arity_mismatch());
    assert!(Term::node("FOO", vec![]).unwrap_err().is_unrecognized_token());
}

#[test]
fn checked_constructors_validate_names() {
    assert_eq!(
        Term::node("VAR", vec![Term::name("x")]).unwrap(),
        var("x")
    );
    assert!(Term::node("VAR", vec![I]).unwrap_err().is_invalid_variable());
    assert!(
        Term::node("APP", vec![Term::name("x"), I])
            .unwrap_err()
            .is_invalid_variable()
    );
}
