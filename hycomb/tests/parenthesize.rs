use hycomb::parenthesize::parenthesize;
use hycomb::term::defs::{I, K, NIL};
use hycomb::term::func::{
    app, app_all, assert, comp, cursor, define, join, lambda, letrec, less, paren, quote, rand,
    stack, var,
};

#[test]
fn atoms_and_left_nested_applications_need_no_grouping() {
    let (f, x, y) = (var("f"), var("x"), var("y"));
    for t in [
        x.clone(),
        K,
        app_all(f.clone(), [x.clone(), y.clone()]),
        comp(comp(f.clone(), x.clone()), y.clone()),
        join(join(f, x), y),
        lambda(var("z"), var("z")),
    ] {
        assert_eq!(parenthesize(&t).unwrap(), t);
    }
}

#[test]
fn nested_argument_is_grouped() {
    let (x, y, z) = (var("x"), var("y"), var("z"));
    let t = app(x.clone(), app(y.clone(), z.clone()));
    assert_eq!(parenthesize(&t).unwrap(), app(x, paren(app(y, z))));
}

#[test]
fn looser_operators_are_grouped_inside_tighter_ones() {
    let (f, x, y) = (var("f"), var("x"), var("y"));
    let t = comp(f.clone(), app(x.clone(), y.clone()));
    assert_eq!(
        parenthesize(&t).unwrap(),
        comp(f.clone(), paren(app(x.clone(), y.clone())))
    );

    let t = app(lambda(x.clone(), x.clone()), y.clone());
    assert_eq!(
        parenthesize(&t).unwrap(),
        app(paren(lambda(x.clone(), x.clone())), y.clone())
    );

    let t = join(lambda(x.clone(), x.clone()), y.clone());
    assert_eq!(
        parenthesize(&t).unwrap(),
        join(paren(lambda(x.clone(), x.clone())), y)
    );
}

#[test]
fn bracketed_forms_count_as_atoms() {
    let (x, y) = (var("x"), var("y"));
    let t = app(
        quote(join(x.clone(), y.clone())),
        rand(lambda(x.clone(), x.clone()), less(join(x.clone(), y.clone()), I)),
    );
    assert_eq!(parenthesize(&t).unwrap(), t);
}

#[test]
fn letrec_definition_is_grouped_when_inline() {
    let (x, y) = (var("x"), var("y"));
    let t = letrec(x.clone(), lambda(y.clone(), y.clone()), x.clone());
    assert_eq!(
        parenthesize(&t).unwrap(),
        letrec(x.clone(), paren(lambda(y.clone(), y)), x)
    );
}

#[test]
fn cursor_is_transparent() {
    let (x, y, z) = (var("x"), var("y"), var("z"));
    let t = app(x.clone(), cursor(app(y.clone(), z.clone())));
    assert_eq!(
        parenthesize(&t).unwrap(),
        app(x, cursor(paren(app(y, z))))
    );
}

#[test]
fn top_level_lines() {
    let (f, x, y) = (var("f"), var("x"), var("y"));
    let t = define(f.clone(), join(x.clone(), y.clone()));
    assert_eq!(parenthesize(&t).unwrap(), t);

    let t = assert(lambda(x.clone(), x.clone()));
    assert_eq!(
        parenthesize(&t).unwrap(),
        assert(paren(lambda(x.clone(), x)))
    );
}

#[test]
fn binder_must_be_a_pattern() {
    let (x, y) = (var("x"), var("y"));
    let t = lambda(app(x.clone(), y.clone()), x);
    assert!(parenthesize(&t).unwrap_err().is_unmatched_expression());
}

#[test]
fn existing_parens_are_kept() {
    let (f, x, y) = (var("f"), var("x"), var("y"));
    let t = app(f.clone(), paren(x.clone()));
    assert_eq!(parenthesize(&t).unwrap(), t);

    let t = app(f.clone(), paren(app(x.clone(), app(y.clone(), I))));
    assert_eq!(
        parenthesize(&t).unwrap(),
        app(f, paren(app(x, paren(app(y, I)))))
    );

    let grouped = parenthesize(&app(var("g"), join(var("a"), var("b")))).unwrap();
    assert_eq!(parenthesize(&grouped).unwrap(), grouped);
}

#[test]
fn lines_below_the_top_level_are_unmatched() {
    let (f, x) = (var("f"), var("x"));
    let t = app(f.clone(), assert(x.clone()));
    assert!(parenthesize(&t).unwrap_err().is_unmatched_expression());

    let t = app(f.clone(), define(x.clone(), I));
    assert!(parenthesize(&t).unwrap_err().is_unmatched_expression());

    let t = assert(assert(x.clone()));
    assert!(parenthesize(&t).unwrap_err().is_unmatched_expression());
}

#[test]
fn spines_are_unmatched() {
    let (f, x) = (var("f"), var("x"));
    let spine = stack(f.clone(), stack(x.clone(), NIL));
    assert!(parenthesize(&spine).unwrap_err().is_unmatched_expression());
    assert!(parenthesize(&app(f, spine)).unwrap_err().is_unmatched_expression());
}
