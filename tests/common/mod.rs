//! Shared generator for override-style scanner descriptions and a
//! brute-force oracle for which rule should own each character.
#![allow(dead_code)]

use scanc::StateTable;

pub const FIRST: char = '0';
pub const LAST: char = 'z';

/// Character at `offset` from `FIRST`, clamped to the alphabet.
pub fn at(offset: u32) -> char {
    let last = LAST as u32 - FIRST as u32;
    char::from_u32(FIRST as u32 + offset.min(last)).unwrap()
}

pub fn alphabet() -> impl Iterator<Item = char> {
    FIRST..=LAST
}

fn within(s: (char, char), t: (char, char)) -> bool {
    s.0 >= t.0 && s.1 <= t.1
}

fn disjoint(s: (char, char), t: (char, char)) -> bool {
    s.1 < t.0 || t.1 < s.0
}

/// Keep the proposals that form a properly nested family: every pair is
/// disjoint or one strictly contains the other.
pub fn laminar(proposals: impl IntoIterator<Item = (char, char)>) -> Vec<(char, char)> {
    let mut kept: Vec<(char, char)> = Vec::new();
    for p in proposals {
        // A backslash can't start a plain pattern token.
        if p.0 > p.1 || p.0 == '\\' {
            continue;
        }
        let ok = kept
            .iter()
            .all(|&a| p != a && (disjoint(p, a) || within(p, a) || within(a, p)));
        if ok {
            kept.push(p);
        }
    }
    kept
}

/// Distinct singletons other than backslash.
pub fn singles(chars: impl IntoIterator<Item = char>) -> Vec<char> {
    let mut out: Vec<char> = Vec::new();
    for c in chars {
        if c != '\\' && !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

/// Ranges become rules `s lo..hi rI`, singletons `s c sJ`; each target is a
/// state of its own so the winner of every character is identifiable.
pub fn description(ranges: &[(char, char)], singles: &[char]) -> String {
    let mut lines = Vec::new();
    let mut targets = Vec::new();
    for (i, (lo, hi)) in ranges.iter().enumerate() {
        lines.push(format!("s {lo}..{hi} r{i}"));
        targets.push(format!("r{i}"));
    }
    for (j, c) in singles.iter().enumerate() {
        lines.push(format!("s {c} s{j}"));
        targets.push(format!("s{j}"));
    }
    for t in targets {
        lines.push(format!("{t} x s"));
    }
    lines.push("s \\s s".to_string());
    lines.join("\n")
}

/// Target the most specific declared rule gives `c`: its singleton if any,
/// else the narrowest range containing it.
pub fn expected_owner(ranges: &[(char, char)], singles: &[char], c: char) -> Option<String> {
    if let Some(j) = singles.iter().position(|&s| s == c) {
        return Some(format!("s{j}"));
    }
    ranges
        .iter()
        .enumerate()
        .filter(|(_, r)| r.0 <= c && c <= r.1)
        .min_by_key(|(_, r)| r.1 as u32 - r.0 as u32)
        .map(|(i, _)| format!("r{i}"))
}

/// Panics unless every character of state `s` is owned as the oracle says.
pub fn check_coverage(table: &StateTable, ranges: &[(char, char)], singles: &[char]) {
    let state = table.get("s").expect("state s");
    for c in alphabet() {
        let owners: Vec<&str> = state
            .rules
            .iter()
            .filter(|r| r.pattern.contains(c))
            .map(|r| r.target.as_str())
            .collect();
        match expected_owner(ranges, singles, c) {
            Some(want) => assert_eq!(owners, [want.as_str()], "char {c:?}"),
            None => assert!(owners.is_empty(), "char {c:?} owned by {owners:?}"),
        }
    }
}

/// Panics if two range rules of any state share a character, or if a
/// one-character range survived.
pub fn check_disjoint(table: &StateTable) {
    for state in table {
        let spans: Vec<(char, char)> = state.rules.iter().filter_map(|r| r.pattern.span()).collect();
        for (i, a) in spans.iter().enumerate() {
            assert!(a.0 < a.1, "uncollapsed range {a:?} in {}", state.name);
            for b in &spans[i + 1..] {
                assert!(disjoint(*a, *b), "{a:?} and {b:?} overlap in {}", state.name);
            }
        }
    }
}
