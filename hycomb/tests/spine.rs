use hycomb::spine::{from_stack, stack_all, to_stack, to_stack_onto};
use hycomb::term::defs::{I, K, NIL, S};
use hycomb::term::func::{app, app_all, join, stack, var};

#[test]
fn to_stack_from_stack_examples() {
    let (x, y, z) = (var("x"), var("y"), var("z"));
    let examples = [
        (I, stack(I, NIL)),
        (app(x.clone(), y.clone()), stack_all([x.clone(), y.clone()], NIL)),
        (
            app_all(x.clone(), [y.clone(), z.clone()]),
            stack_all([x.clone(), y.clone(), z.clone()], NIL),
        ),
        (
            app_all(S, [app(K, x.clone()), y.clone(), z.clone()]),
            stack_all([S, app(K, x), y, z], NIL),
        ),
    ];
    for (term, spine) in examples {
        assert_eq!(to_stack(&term).unwrap(), spine);
        assert_eq!(from_stack(&spine).unwrap(), term);
    }
}

#[test]
fn only_the_head_chain_is_unfolded() {
    let t = join(app(var("f"), var("x")), I);
    assert_eq!(to_stack(&t).unwrap(), stack(t.clone(), NIL));
}

#[test]
fn to_stack_onto_continues_an_existing_spine() {
    let (x, y, z) = (var("x"), var("y"), var("z"));
    let tail = stack(z.clone(), NIL);
    assert_eq!(
        to_stack_onto(&app(x.clone(), y.clone()), vec![K], tail).unwrap(),
        stack_all([x, y, K, z], NIL)
    );
}

#[test]
fn from_stack_rejects_non_spines() {
    assert!(from_stack(&NIL).unwrap_err().is_unmatched_expression());
    assert!(from_stack(&I).unwrap_err().is_unmatched_expression());
    assert!(
        from_stack(&stack(I, K))
            .unwrap_err()
            .is_unmatched_expression()
    );
}
