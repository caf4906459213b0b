// src/scanner/mod.rs
pub mod canon;
pub mod io;
pub mod pattern;
pub mod reconcile;
pub mod rules;
pub mod states;

use std::time::Instant;

use log::debug;

pub use canon::{render_rule, render_state, sort_rules};
pub use io::{load_states_json_bytes, save_states_json, states_to_json};
pub use pattern::{Escaped, Pattern, decode, unescape};
pub use reconcile::{reconcile, reconcile_states};
pub use rules::{Rule, parse_rules};
pub use states::{State, StateTable, group_states};

use crate::{config::CompileOptions, error::CompileError};

/// Compile a scanner description into per-state, pairwise-disjoint rules:
/// parse, group by state, reconcile and (optionally) sort.
pub fn compile(text: &str, opts: &CompileOptions) -> Result<StateTable, CompileError> {
    let t0 = Instant::now();
    let rules = parse_rules(text)?;
    let mut table = group_states(rules)?;
    reconcile_states(&mut table, opts.parallel)?;
    if opts.sort {
        canon::sort_states(&mut table);
    }
    debug!(
        "[scanner] compiled {} states, {} rules in {:?}",
        table.len(),
        table.iter().map(|s| s.rules.len()).sum::<usize>(),
        t0.elapsed()
    );
    Ok(table)
}
