use hycomb::codec::{Line, parse, parse_line, print, print_line};
use hycomb::error::CompilerError;
use hycomb::term::defs::{HOLE, I, K};
use hycomb::term::func::{app, assert, cursor, define, lambda, letrec, quote, var};

#[test]
fn parse_print_inverses() {
    let examples = [
        "VAR x",
        "QUOTE APP LAMBDA CURSOR VAR x VAR x HOLE",
        "LETREC VAR i LAMBDA VAR x VAR x APP VAR i VAR i",
    ];
    for src in examples {
        assert_eq!(print(&parse(src).unwrap()), src);
    }
}

#[test]
fn parse_builds_expected_trees() {
    assert_eq!(parse("VAR x").unwrap(), var("x"));
    assert_eq!(
        parse("QUOTE APP LAMBDA CURSOR VAR x VAR x HOLE").unwrap(),
        quote(app(lambda(cursor(var("x")), var("x")), HOLE))
    );
    let i = var("i");
    assert_eq!(
        parse("LETREC VAR i LAMBDA VAR x VAR x APP VAR i VAR i").unwrap(),
        letrec(i.clone(), lambda(var("x"), var("x")), app(i.clone(), i))
    );
}

#[test]
fn parse_accepts_arbitrary_whitespace() {
    assert_eq!(parse("  APP\tK \n VAR a2  ").unwrap(), app(K, var("a2")));
}

#[test]
fn parse_accepts_global_names() {
    assert_eq!(parse("VAR nat.succ").unwrap(), var("nat.succ"));
}

#[test]
fn unknown_head_is_unrecognized() {
    match parse("APP FOO I").unwrap_err() {
        CompilerError::UnrecognizedToken { token, position } => {
            assert_eq!(token, "FOO");
            assert_eq!(position, 4);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(parse("x").unwrap_err().is_unrecognized_token());
}

#[test]
fn premature_end_counts_missing_terms() {
    assert!(matches!(
        parse("APP VAR x").unwrap_err(),
        CompilerError::UnexpectedEnd { expected: 1 }
    ));
    assert!(matches!(
        parse("APP").unwrap_err(),
        CompilerError::UnexpectedEnd { expected: 2 }
    ));
    assert!(matches!(
        parse("").unwrap_err(),
        CompilerError::UnexpectedEnd { expected: 1 }
    ));
    assert!(parse("VAR").unwrap_err().is_unexpected_end());
}

#[test]
fn trailing_tokens_are_rejected() {
    match parse("VAR x VAR y").unwrap_err() {
        CompilerError::TrailingTokens { token, position } => {
            assert_eq!(token, "VAR");
            assert_eq!(position, 6);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn var_requires_a_name() {
    assert!(parse("VAR K").unwrap_err().is_invalid_variable());
}

#[test]
fn malformed_words_fail_to_lex() {
    assert!(parse("APP I $").unwrap_err().is_lex());
    assert!(parse("VAR Xy").unwrap_err().is_lex());
}

#[test]
fn lines_round_trip() {
    let def = Line::definition("util.id", "I");
    assert_eq!(parse_line(&def).unwrap(), define(var("util.id"), I));
    assert_eq!(print_line(&parse_line(&def).unwrap()).unwrap(), def);

    let check = Line::assertion("APP K I");
    assert_eq!(parse_line(&check).unwrap(), assert(app(K, I)));
    assert_eq!(print_line(&parse_line(&check).unwrap()).unwrap(), check);
}

#[test]
fn invalid_line_name_is_rejected() {
    let line = Line::definition("Not A Name", "I");
    assert!(parse_line(&line).unwrap_err().is_invalid_variable());
}

#[test]
fn print_line_requires_define_or_assert() {
    assert!(print_line(&I).unwrap_err().is_unmatched_expression());
}
