use hycomb::normalize::{
    count_occurrences, normalize_affine_beta_eta, normalize_alpha, simplify, substitute,
};
use hycomb::term::defs::{BOT, HOLE, I, TOP};
use hycomb::term::func::{app, app_all, join, lambda, letrec, quote, var};

#[test]
fn count_occurrences_examples() {
    let (x, y) = (var("x"), var("y"));
    let examples = [
        (x.clone(), 1),
        (y.clone(), 0),
        (I, 0),
        (app(y.clone(), y.clone()), 0),
        (app(x.clone(), y.clone()), 1),
        (app_all(x.clone(), [x.clone(), x.clone(), y.clone(), x.clone()]), 4),
    ];
    for (term, expected) in examples {
        assert_eq!(count_occurrences("x", &term), expected, "in {term}");
    }
}

#[test]
fn count_occurrences_stops_at_shadowing_binders() {
    let (x, y) = (var("x"), var("y"));
    let t = app(lambda(x.clone(), x.clone()), x.clone());
    assert_eq!(count_occurrences("x", &t), 1);
    let t = letrec(x.clone(), x.clone(), app(x.clone(), y));
    assert_eq!(count_occurrences("x", &t), 0);
}

#[test]
fn substitute_examples() {
    let (x, y, z) = (var("x"), var("y"), var("z"));
    let xyz = app_all(x.clone(), [y.clone(), z.clone()]);
    let examples = [
        ((y.clone(), z.clone()), z.clone()),
        ((y.clone(), x.clone()), y.clone()),
        ((xyz.clone(), xyz.clone()), app_all(xyz.clone(), [y.clone(), z.clone()])),
        (
            (z.clone(), lambda(y.clone(), app(x.clone(), y.clone()))),
            lambda(y.clone(), app(z.clone(), y.clone())),
        ),
    ];
    for ((def, body), expected) in examples {
        assert_eq!(substitute("x", &def, &body), expected);
    }
}

#[test]
fn substitute_respects_shadowing() {
    let (x, y) = (var("x"), var("y"));
    let body = lambda(x.clone(), x.clone());
    assert_eq!(substitute("x", &y, &body), body);
}

#[test]
fn normalize_affine_beta_eta_examples() {
    let (x, y, z) = (var("x"), var("y"), var("z"));
    let xx = app(x.clone(), x.clone());
    let yz = app(y.clone(), z.clone());
    let examples = [
        (x.clone(), x.clone()),
        (app_all(TOP, [x.clone(), y.clone(), z.clone()]), TOP),
        (app_all(BOT, [x.clone(), y.clone(), z.clone()]), BOT),
        (join(TOP, x.clone()), TOP),
        (join(x.clone(), TOP), TOP),
        (join(BOT, x.clone()), x.clone()),
        (join(x.clone(), BOT), x.clone()),
        (
            app(lambda(x.clone(), app(y.clone(), x.clone())), yz.clone()),
            app(y.clone(), yz.clone()),
        ),
        (
            app(lambda(x.clone(), xx.clone()), y.clone()),
            app(y.clone(), y.clone()),
        ),
        (
            app(lambda(x.clone(), xx.clone()), yz.clone()),
            app(lambda(x.clone(), xx.clone()), yz.clone()),
        ),
        (lambda(x.clone(), app(y.clone(), x.clone())), y.clone()),
        (lambda(x.clone(), xx.clone()), lambda(x.clone(), xx.clone())),
        (HOLE, HOLE),
        (
            app_all(HOLE, [x.clone(), app(TOP, y.clone())]),
            app_all(HOLE, [x.clone(), TOP]),
        ),
    ];
    for (input, expected) in examples {
        assert_eq!(normalize_affine_beta_eta(&input).unwrap(), expected, "for {input}");
    }
}

#[test]
fn joins_reduce_after_bot_is_dropped() {
    let (x, y) = (var("x"), var("y"));
    let t = app(join(BOT, lambda(x.clone(), x.clone())), y.clone());
    assert_eq!(normalize_affine_beta_eta(&t).unwrap(), y);
}

#[test]
fn argument_reducing_to_a_variable_is_duplicated() {
    let (x, y, z) = (var("x"), var("y"), var("z"));
    let id = lambda(z.clone(), z.clone());
    let t = app(lambda(x.clone(), app(x.clone(), x.clone())), app(id, y.clone()));
    assert_eq!(normalize_affine_beta_eta(&t).unwrap(), app(y.clone(), y));
}

#[test]
fn letrec_is_left_in_place() {
    let (x, y) = (var("x"), var("y"));
    let t = app(letrec(x.clone(), y.clone(), x.clone()), y.clone());
    assert_eq!(normalize_affine_beta_eta(&t).unwrap(), t);
}

#[test]
fn normalize_alpha_examples() {
    let (a, b) = (var("a"), var("b"));
    let (x, y) = (var("x"), var("y"));
    let examples = [
        (x.clone(), x.clone()),
        (lambda(x.clone(), x.clone()), lambda(a.clone(), a.clone())),
        (
            letrec(x.clone(), y.clone(), x.clone()),
            letrec(a.clone(), y.clone(), a.clone()),
        ),
        (
            app(lambda(x.clone(), x.clone()), letrec(x.clone(), x.clone(), x.clone())),
            app(lambda(a.clone(), a.clone()), letrec(b.clone(), b.clone(), b.clone())),
        ),
        (
            app(lambda(x.clone(), x.clone()), x.clone()),
            app(lambda(a.clone(), a.clone()), x.clone()),
        ),
    ];
    for (input, expected) in examples {
        assert_eq!(normalize_alpha(&input).unwrap(), expected, "for {input}");
    }
}

#[test]
fn normalize_alpha_skips_free_names() {
    let (a, b, x) = (var("a"), var("b"), var("x"));
    let t = lambda(x.clone(), app(x, a.clone()));
    assert_eq!(normalize_alpha(&t).unwrap(), lambda(b.clone(), app(b, a)));
}

#[test]
fn normalize_alpha_renames_compound_binders() {
    let (a, x) = (var("a"), var("x"));
    let t = lambda(quote(x.clone()), x);
    assert_eq!(normalize_alpha(&t).unwrap(), lambda(quote(a.clone()), a));
}

#[test]
fn normalize_alpha_rejects_repeated_binder() {
    let x = var("x");
    let t = lambda(app(x.clone(), x.clone()), x);
    assert!(normalize_alpha(&t).unwrap_err().is_invalid_variable());
}

#[test]
fn simplify_composes_both_passes() {
    let (a, x, y) = (var("a"), var("x"), var("y"));
    let t = app(lambda(x.clone(), lambda(y.clone(), app(y.clone(), x.clone()))), I);
    assert_eq!(simplify(&t).unwrap(), lambda(a.clone(), app(a, I)));
}

#[test]
fn substitute_renames_capturing_binders() {
    let (a, x, y) = (var("a"), var("x"), var("y"));
    let body = lambda(y.clone(), x.clone());
    assert_eq!(substitute("x", &y, &body), lambda(a.clone(), y.clone()));

    // The renamed binder avoids every name of the binding term and of the argument.
    let (b, c, f) = (var("b"), var("c"), var("f"));
    let body = lambda(y.clone(), app_all(x.clone(), [y.clone(), a.clone()]));
    let def = app(f.clone(), app(y.clone(), b.clone()));
    assert_eq!(
        substitute("x", &def, &body),
        lambda(c.clone(), app_all(def.clone(), [c, a])),
    );
}

#[test]
fn substitute_renames_letrec_binders_in_both_scopes() {
    let (a, x, y) = (var("a"), var("x"), var("y"));
    let body = letrec(y.clone(), app(y.clone(), x.clone()), app(x.clone(), y.clone()));
    assert_eq!(
        substitute("x", &y, &body),
        letrec(
            a.clone(),
            app(a.clone(), y.clone()),
            app(y.clone(), a.clone()),
        ),
    );
}

#[test]
fn simplify_does_not_capture_free_variables() {
    let (a, f, x, y) = (var("a"), var("f"), var("x"), var("y"));
    let konst = lambda(x.clone(), lambda(y.clone(), x.clone()));
    assert_eq!(
        simplify(&app(konst.clone(), y.clone())).unwrap(),
        lambda(a.clone(), y.clone()),
    );
    assert_eq!(
        simplify(&app(konst, app(f.clone(), y.clone()))).unwrap(),
        lambda(a.clone(), app(f, y)),
    );
}
