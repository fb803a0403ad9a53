use hycomb::codec::{parse, print};
use hycomb::normalize::simplify;
use hycomb::spine::{from_stack, to_stack};
use hycomb::symbol::{self, ParseRule};
use hycomb::term::Term;
use hycomb::term::defs::{BOT, HOLE, I, TOP};
use hycomb::term::func::{app, comp, join, lambda, quote, rand, var};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const NAMES: &[&str] = &["x", "y", "z", "f", "a", "b2", "nat.succ"];
const CASES: usize = 300;

fn random_name(rng: &mut impl Rng) -> Term {
    var(NAMES[rng.random_range(0..NAMES.len())])
}

/// Any well-formed term over the full symbol table.
fn random_term(budget: usize, rng: &mut impl Rng) -> Term {
    let all: Vec<_> = symbol::symbols().iter().collect();
    let candidates: Vec<_> = if budget == 0 {
        all.into_iter()
            .filter(|s| s.arity == 0 || s.parse_rule == ParseRule::Name)
            .collect()
    } else {
        all
    };
    let symbol = candidates[rng.random_range(0..candidates.len())];
    if symbol.parse_rule == ParseRule::Name {
        return random_name(rng);
    }
    let args = (0..symbol.arity)
        .map(|_| random_term(budget.saturating_sub(1), rng))
        .collect();
    Term::node(symbol.name, args).unwrap()
}

/// Lambda terms with plain variable binders.
fn random_lambda(budget: usize, rng: &mut impl Rng) -> Term {
    if budget == 0 || rng.random_bool(0.25) {
        return match rng.random_range(0..6) {
            0 => TOP,
            1 => BOT,
            2 => I,
            3 => HOLE,
            _ => random_name(rng),
        };
    }
    let next = budget - 1;
    match rng.random_range(0..6) {
        0 | 1 => app(random_lambda(next, rng), random_lambda(next, rng)),
        2 => lambda(random_name(rng), random_lambda(next, rng)),
        3 => join(random_lambda(next, rng), random_lambda(next, rng)),
        4 => comp(random_lambda(next, rng), random_lambda(next, rng)),
        5 => {
            if rng.random_bool(0.5) {
                rand(random_lambda(next, rng), random_lambda(next, rng))
            } else {
                quote(random_lambda(next, rng))
            }
        }
        _ => unreachable!(),
    }
}

#[test]
fn codec_round_trip() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
    for _ in 0..CASES {
        let t = random_term(5, &mut rng);
        let text = print(&t);
        assert_eq!(parse(&text).unwrap(), t, "for {text}");
        assert_eq!(print(&parse(&text).unwrap()), text);
    }
}

#[test]
fn spine_round_trip() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x57ac);
    for _ in 0..CASES {
        let t = random_term(5, &mut rng);
        assert_eq!(from_stack(&to_stack(&t).unwrap()).unwrap(), t, "for {t}");
    }
}

#[test]
fn simplify_is_idempotent() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x1de);
    for _ in 0..CASES {
        let t = random_lambda(6, &mut rng);
        let once = simplify(&t).unwrap();
        assert_eq!(simplify(&once).unwrap(), once, "for {t}");
    }
}

#[test]
fn join_lattice_laws() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x1a7);
    for _ in 0..CASES {
        let x = random_lambda(5, &mut rng);
        assert_eq!(simplify(&join(TOP, x.clone())).unwrap(), TOP, "for {x}");
        assert_eq!(
            simplify(&join(BOT, x.clone())).unwrap(),
            simplify(&x).unwrap(),
            "for {x}"
        );
    }
}
