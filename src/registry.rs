//! # bunit: Test Registry
//!
//! The registry is the single source of truth for what exists to run. It maps a
//! group name to an ordered set of named tests.
//!
//! ## Ordering
//! Groups run in the order they were first registered, and tests within a group
//! run in the order their names were first registered. Re-registering an existing
//! `(group, name)` pair replaces the action in place and keeps its position.
//!
//! ## Lifecycle
//! The registry is filled during an explicit registration phase and then handed
//! to the [`Runner`](crate::Runner) by shared reference, which freezes it for the
//! rest of the run.

use std::collections::HashMap;

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::test::{TestFn, TestUnit};

/// The tests registered under one group name.
#[derive(Debug)]
pub struct Group {
    name: String,
    tests: Vec<TestUnit>,
    index: HashMap<String, usize>,
}

impl Group {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tests(&self) -> &[TestUnit] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TestUnit> {
        self.index.get(name).map(|&slot| &self.tests[slot])
    }

    fn upsert(&mut self, unit: TestUnit) {
        match self.index.get(unit.name()) {
            Some(&slot) => {
                debug!(group = %self.name, test = unit.name(), "replacing earlier registration");
                self.tests[slot] = unit;
            }
            None => {
                self.index.insert(unit.name().to_string(), self.tests.len());
                self.tests.push(unit);
            }
        }
    }
}

/// Registry of all declared tests, keyed by group then by test name.
#[derive(Debug, Default)]
pub struct Registry {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
    total: OnceCell<usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `action` under `(group, name)`, creating the group if needed.
    /// The last registration of a pair wins.
    pub fn register(&mut self, group: &str, name: &str, action: TestFn) {
        self.add(TestUnit::new(name, Some(group), action));
    }

    /// Registers an already constructed unit under its own group and name.
    pub fn add(&mut self, unit: TestUnit) {
        // Any mutation invalidates the cached total.
        self.total = OnceCell::new();

        let slot = match self.index.get(unit.group()) {
            Some(&slot) => slot,
            None => {
                self.index
                    .insert(unit.group().to_string(), self.groups.len());
                self.groups.push(Group::new(unit.group()));
                self.groups.len() - 1
            }
        };
        self.groups[slot].upsert(unit);
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Sum of the per-group test counts, computed once.
    pub fn total_test_count(&self) -> usize {
        *self
            .total
            .get_or_init(|| self.groups.iter().map(Group::len).sum())
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.index.get(name).map(|&slot| &self.groups[slot])
    }

    pub fn get(&self, group: &str, name: &str) -> Option<&TestUnit> {
        self.group(group).and_then(|g| g.get(name))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
