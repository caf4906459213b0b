// src/scanner/canon.rs
use super::rules::Rule;
use super::states::{State, StateTable};

/// Order a state's rules by the unescaped text of their patterns. Equal
/// patterns keep their relative order.
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by_cached_key(|r| r.pattern.raw());
}

pub fn sort_states(table: &mut StateTable) {
    for state in table.states_mut() {
        sort_rules(&mut state.rules);
    }
}

/// One rule in description syntax, columns padded to `width`.
pub fn render_rule(rule: &Rule, width: usize) -> String {
    let pattern = rule.pattern.escaped(rule.lookahead);
    let mut out = format!(
        "{:<width$} {:<width$} {:<width$}",
        rule.base, pattern, rule.target
    );
    out.truncate(out.trim_end().len());
    if let Some(ty) = &rule.ty {
        // Type starts in its own column unless the target overflowed it.
        let col = 3 * width + 2;
        let pad = col.saturating_sub(out.chars().count()).max(1);
        out.extend(std::iter::repeat_n(' ', pad));
        out.push_str(ty);
    }
    out
}

pub fn render_state(state: &State, width: usize) -> String {
    let mut out = String::new();
    for rule in &state.rules {
        out.push_str(&render_rule(rule, width));
        out.push('\n');
    }
    out
}

impl StateTable {
    /// All states in row order, separated by blank lines.
    pub fn render(&self, width: usize) -> String {
        self.iter()
            .map(|s| render_state(s, width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::pattern::Pattern;

    fn rule(pattern: Pattern, lookahead: bool, ty: Option<&str>) -> Rule {
        Rule {
            line: 1,
            base: "start".into(),
            lookahead,
            pattern,
            target: "id".into(),
            ty: ty.map(str::to_string),
        }
    }

    #[test]
    fn sorts_by_pattern_text() {
        let mut rules = vec![
            rule(Pattern::Range('a', 'z'), false, None),
            rule(Pattern::Single('0'), false, None),
            rule(Pattern::Single(' '), true, None),
            rule(Pattern::Range('0', '9'), false, None),
            rule(Pattern::Single('\n'), true, None),
        ];
        sort_rules(&mut rules);
        let got: Vec<_> = rules.iter().map(|r| r.pattern.raw()).collect();
        assert_eq!(got, ["\n", " ", "0", "0..9", "a..z"]);
    }

    #[test]
    fn renders_columns() {
        let r = rule(Pattern::Range('a', 'z'), false, Some("Id"));
        assert_eq!(render_rule(&r, 9), "start     a..z      id       Id");
        let r = rule(Pattern::Single(' '), true, None);
        assert_eq!(render_rule(&r, 9), r"start     \s        id");
        let r = rule(Pattern::Single('\\'), false, None);
        assert_eq!(render_rule(&r, 0), r"start \\ id");
    }
}
