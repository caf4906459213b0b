// src/scanner/states.rs
use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use super::rules::Rule;
use crate::error::CompileError;

/// A named row of the transition table and the rules leaving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub row: usize,
    pub name: String,
    pub rules: Vec<Rule>,
}

/// States in first-seen order, addressable by name.
#[derive(Debug, Clone, Default)]
pub struct StateTable {
    states: Vec<State>,
    index: HashMap<String, usize>,
}

impl StateTable {
    /// Rebuild a table from states already in row order.
    pub fn from_states(states: Vec<State>) -> Self {
        let index = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();
        Self { states, index }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn row_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&State> {
        self.row_of(name).map(|i| &self.states[i])
    }

    /// States in row order.
    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub(crate) fn states_mut(&mut self) -> &mut [State] {
        &mut self.states
    }

    pub fn into_states(self) -> Vec<State> {
        self.states
    }
}

impl<'a> IntoIterator for &'a StateTable {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Group atomic rules by base state, assigning rows in first-seen order, and
/// check that every target names some state.
pub fn group_states(rules: Vec<Rule>) -> Result<StateTable, CompileError> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut names: Vec<String> = Vec::new();
    for rule in &rules {
        if !index.contains_key(&rule.base) {
            index.insert(rule.base.clone(), names.len());
            names.push(rule.base.clone());
        }
    }

    if let Some(rule) = rules.iter().find(|r| !index.contains_key(&r.target)) {
        return Err(CompileError::UnknownTarget {
            line: rule.line,
            target: rule.target.clone(),
        });
    }

    let mut states: Vec<State> = names
        .into_iter()
        .enumerate()
        .map(|(row, name)| State {
            row,
            name,
            rules: Vec::new(),
        })
        .collect();
    for rule in rules {
        let row = index[&rule.base];
        states[row].rules.push(rule);
    }

    debug!("[states] grouped into {} states", states.len());
    Ok(StateTable { states, index })
}
