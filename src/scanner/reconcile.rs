// src/scanner/reconcile.rs
//
// Ranges in a state may overlap on purpose: a broad default range plus
// narrower overrides. Reconciliation makes the overrides authoritative by
// cutting them out of the broader range, until every state's patterns are
// disjoint.
//
//   A. sub-ranges: a range contained in a wider one splits the wider one,
//      e.g. 2..8 inside 0..9 leaves 0..1 and 9..9. Partial overlaps are errors.
//   B. mid-ranges: a singleton inside a range splits it, e.g. 5 in 0..9
//      leaves 0..4 and 6..9. A range equal to the singleton is dropped.
//   C. collapse: a one-character range like 9..9 becomes the singleton 9.
//
// A and B each run to a fixed point. Every step scans an immutable snapshot
// for one edit and applies it to get the next snapshot.
//
// In pass A the narrowest range is cut out of its narrowest container first.
// Cutting can leave a piece of a broad range with exactly the span of a
// narrower declared range; that piece is dropped. Two ranges declared with
// the same span are an error.

use log::{debug, trace};
use rayon::prelude::*;

use super::pattern::{Pattern, char_after, char_before};
use super::rules::Rule;
use super::states::{State, StateTable};
use crate::error::CompileError;

/// A rule under reconciliation. `declared` is the width of the range the
/// rule was written with, inherited by every piece split from it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    rule: Rule,
    declared: u32,
}

impl Slot {
    fn new(rule: Rule) -> Self {
        let declared = rule.pattern.width().unwrap_or(0);
        Self { rule, declared }
    }

    /// Current span and width of a range slot.
    fn range(&self) -> Option<((char, char), u32)> {
        Some((self.rule.pattern.span()?, self.rule.pattern.width()?))
    }
}

/// A change to one state's rule list, found on a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Edit {
    /// Rewrite the pattern of slot `at`.
    Replace { at: usize, pattern: Pattern },
    /// Slot `at` keeps `low`; a copy matching `high` is appended.
    Split {
        at: usize,
        low: Pattern,
        high: Pattern,
    },
    /// Drop slot `at`.
    Remove { at: usize },
}

fn apply(slots: &mut Vec<Slot>, edit: Edit) {
    trace!("[reconcile] {edit:?}");
    match edit {
        Edit::Replace { at, pattern } => slots[at].rule.pattern = pattern,
        Edit::Split { at, low, high } => {
            let rest = Slot {
                rule: slots[at].rule.with_pattern(high),
                declared: slots[at].declared,
            };
            slots[at].rule.pattern = low;
            slots.push(rest);
        }
        Edit::Remove { at } => {
            slots.remove(at);
        }
    }
}

/// Repeat `step` on the current snapshot until it finds nothing to change.
/// Returns the number of edits applied.
fn fixpoint<F>(slots: &mut Vec<Slot>, mut step: F) -> Result<usize, CompileError>
where
    F: FnMut(&[Slot]) -> Result<Option<Edit>, CompileError>,
{
    let mut edits = 0usize;
    while let Some(edit) = step(slots.as_slice())? {
        apply(slots, edit);
        edits += 1;
    }
    Ok(edits)
}

#[inline]
fn partial_overlap((slo, shi): (char, char), (tlo, thi): (char, char)) -> bool {
    (slo < tlo && shi >= tlo && shi < thi) || (tlo < slo && thi >= slo && thi < shi)
}

#[inline]
fn within((slo, shi): (char, char), (tlo, thi): (char, char)) -> bool {
    slo >= tlo && shi <= thi
}

fn overlap_error(s: &Rule, t: &Rule) -> CompileError {
    CompileError::OverlappingRanges {
        first: s.pattern.escaped(s.lookahead),
        second: t.pattern.escaped(t.lookahead),
        first_line: s.line,
        second_line: t.line,
    }
}

/// The edit that removes range `s` from the range `t` containing it.
fn cut(at: usize, (slo, shi): (char, char), (tlo, thi): (char, char)) -> Edit {
    if slo == tlo {
        Edit::Replace {
            at,
            pattern: Pattern::Range(char_after(shi), thi),
        }
    } else if shi == thi {
        Edit::Replace {
            at,
            pattern: Pattern::Range(tlo, char_before(slo)),
        }
    } else {
        Edit::Split {
            at,
            low: Pattern::Range(tlo, char_before(slo)),
            high: Pattern::Range(char_after(shi), thi),
        }
    }
}

/// Pass A step. Partial overlaps fail; of two equal spans the one declared
/// wider goes; otherwise the narrowest contained range is cut out of its
/// narrowest container. The contained range itself is never changed.
fn sub_range_edit(slots: &[Slot]) -> Result<Option<Edit>, CompileError> {
    let ranges: Vec<(usize, (char, char), u32)> = slots
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.range().map(|(span, w)| (i, span, w)))
        .collect();

    for (k, &(i, si, wi)) in ranges.iter().enumerate() {
        for &(j, sj, wj) in &ranges[k + 1..] {
            if partial_overlap(si, sj) {
                let (s, t) = if wi <= wj { (i, j) } else { (j, i) };
                return Err(overlap_error(&slots[s].rule, &slots[t].rule));
            }
        }
    }

    for (k, &(i, si, _)) in ranges.iter().enumerate() {
        for &(j, sj, _) in &ranges[k + 1..] {
            if si != sj {
                continue;
            }
            let (di, dj) = (slots[i].declared, slots[j].declared);
            if di == dj {
                return Err(overlap_error(&slots[i].rule, &slots[j].rule));
            }
            let at = if di > dj { i } else { j };
            return Ok(Some(Edit::Remove { at }));
        }
    }

    let mut best: Option<(u32, u32, usize, usize)> = None;
    for &(i, si, wi) in &ranges {
        for &(j, sj, wj) in &ranges {
            if i == j || wj < wi || !within(si, sj) {
                continue;
            }
            let candidate = (wi, wj, i, j);
            if best.is_none_or(|b| candidate < b) {
                best = Some(candidate);
            }
        }
    }
    Ok(best.and_then(|(_, _, s, t)| {
        let sspan = slots[s].rule.pattern.span()?;
        let tspan = slots[t].rule.pattern.span()?;
        Some(cut(t, sspan, tspan))
    }))
}

/// Pass B step: find a singleton inside a range and carve it out.
fn mid_range_edit(slots: &[Slot]) -> Option<Edit> {
    for s in slots {
        let Pattern::Single(c) = s.rule.pattern else {
            continue;
        };
        for (j, t) in slots.iter().enumerate() {
            let Some((lo, hi)) = t.rule.pattern.span() else {
                continue;
            };
            if !(lo <= c && c <= hi) {
                continue;
            }
            let edit = if c == lo && c == hi {
                Edit::Remove { at: j }
            } else {
                cut(j, (c, c), (lo, hi))
            };
            return Some(edit);
        }
    }
    None
}

/// Pass C: one-character ranges become singletons.
fn collapse(rules: &mut [Rule]) {
    for rule in rules {
        if let Pattern::Range(lo, hi) = rule.pattern {
            if lo == hi {
                rule.pattern = Pattern::Single(lo);
            }
        }
    }
}

/// Reconcile one state's rules so that all its patterns are disjoint.
pub fn reconcile(rules: Vec<Rule>) -> Result<Vec<Rule>, CompileError> {
    let mut slots: Vec<Slot> = rules.into_iter().map(Slot::new).collect();
    let splits = fixpoint(&mut slots, sub_range_edit)?;
    let carves = fixpoint(&mut slots, |snapshot| Ok(mid_range_edit(snapshot)))?;
    let mut rules: Vec<Rule> = slots.into_iter().map(|s| s.rule).collect();
    collapse(&mut rules);
    debug!(
        "[reconcile] {} sub-range edits, {} mid-range edits, {} rules",
        splits,
        carves,
        rules.len()
    );
    Ok(rules)
}

fn reconcile_state(state: &mut State) -> Result<(), CompileError> {
    state.rules = reconcile(std::mem::take(&mut state.rules))?;
    Ok(())
}

/// Reconcile every state of the table. States are independent, so with
/// `parallel` each one runs as its own rayon task. Errors are reported for
/// the lowest failing row either way.
pub fn reconcile_states(table: &mut StateTable, parallel: bool) -> Result<(), CompileError> {
    let states = table.states_mut();
    let results: Vec<Result<(), CompileError>> = if parallel {
        states.par_iter_mut().map(reconcile_state).collect()
    } else {
        states.iter_mut().map(reconcile_state).collect()
    };
    results.into_iter().collect()
}
