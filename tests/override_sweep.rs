//! Seeded sweep over random override-style descriptions:
//!  - nested ranges plus singleton overrides, shuffled line order
//!  - every character must end up owned by the most specific rule
//!  - sequential and parallel compilation must agree
//!
//! Knobs: SCANC_SWEEP_SEED (default 7), SCANC_SWEEP_CASES (default 300).

mod common;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use scanc::{CompileOptions, compile};

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}

fn random_case(rng: &mut StdRng) -> (Vec<(char, char)>, Vec<char>) {
    let n_ranges = rng.random_range(0..24);
    let proposals: Vec<(char, char)> = (0..n_ranges)
        .map(|_| {
            let lo = rng.random_range(0u32..75);
            let len = rng.random_range(0u32..40);
            (common::at(lo), common::at(lo + len))
        })
        .collect();
    let ranges = common::laminar(proposals);
    let n_singles = rng.random_range(0..12);
    let singles = common::singles((0..n_singles).map(|_| common::at(rng.random_range(0u32..75))));
    (ranges, singles)
}

fn shuffled(text: &str, rng: &mut StdRng) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    lines.shuffle(rng);
    lines.join("\n")
}

#[test]
fn random_overrides_reconcile_to_most_specific_owner() {
    let seed = env_u64("SCANC_SWEEP_SEED", 7);
    let cases = env_usize("SCANC_SWEEP_CASES", 300);
    let mut rng = StdRng::seed_from_u64(seed);

    for case in 0..cases {
        let (ranges, singles) = random_case(&mut rng);
        let text = shuffled(&common::description(&ranges, &singles), &mut rng);

        let table = match compile(&text, &CompileOptions::default()) {
            Ok(t) => t,
            Err(e) => panic!("case {case} (seed {seed}) failed: {e}\n{text}"),
        };
        common::check_disjoint(&table);
        common::check_coverage(&table, &ranges, &singles);

        let seq = compile(&text, &CompileOptions::sequential()).unwrap();
        assert_eq!(seq.states(), table.states(), "case {case} (seed {seed})");
    }
}
