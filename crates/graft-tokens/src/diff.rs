//! Remote variable set vs. stored tokens.

use std::collections::{HashMap, HashSet};

use graft_core::{Divergence, DivergenceKind, RemoteVariableSet, Token};
use serde::Serialize;
use tracing::{debug, warn};

use crate::value::{resolve_value, values_equal};

/// Per-kind totals of a divergence report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DivergenceCounts {
    pub added: usize,
    pub modified: usize,
    pub removed: usize,
}

impl DivergenceCounts {
    pub fn of(divergences: &[Divergence]) -> Self {
        let mut counts = Self::default();
        for d in divergences {
            match d.kind {
                DivergenceKind::Added => counts.added += 1,
                DivergenceKind::Modified => counts.modified += 1,
                DivergenceKind::Removed => counts.removed += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.added + self.modified + self.removed
    }
}

/// Diff `set` against the stored tokens of `project_id`.
///
/// Local tokens are matched by remote variable id first and by name second. Every
/// token name appears at most once in the result. Only linked tokens can be
/// reported as removed; unlinked ones are owned locally. Runs in linear time over
/// both inputs.
pub fn detect_divergences(project_id: &str, set: &RemoteVariableSet, local_tokens: &[Token]) -> Vec<Divergence> {
    let local: Vec<&Token> = local_tokens
        .iter()
        .filter(|t| t.project_id == project_id)
        .collect();

    let mut by_id: HashMap<&str, usize> = HashMap::with_capacity(local.len());
    let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(local.len());
    for (index, token) in local.iter().enumerate() {
        if let Some(id) = token.figma_variable_id.as_deref() {
            by_id.entry(id).or_insert(index);
        }
        by_name.entry(token.name.as_str()).or_insert(index);
    }

    let mut matched = vec![false; local.len()];
    let mut reported: HashSet<String> = HashSet::new();
    let mut divergences = Vec::new();

    for (variable_id, variable) in &set.variables {
        let index = by_id
            .get(variable_id.as_str())
            .or_else(|| by_name.get(variable.name.as_str()))
            .copied();
        if let Some(index) = index {
            matched[index] = true;
        }

        let remote_value = match resolve_value(set, variable) {
            Ok(value) => value,
            Err(err) => {
                warn!(variable = variable_id.as_str(), error = %err, "skipping unconvertible variable");
                continue;
            }
        };

        match index {
            None => {
                if reported.insert(variable.name.clone()) {
                    divergences.push(Divergence {
                        token_name: variable.name.clone(),
                        local_value: None,
                        figma_value: Some(remote_value),
                        kind: DivergenceKind::Added,
                    });
                }
            }
            Some(index) => {
                let token = local[index];
                if !values_equal(&token.value, &remote_value) && reported.insert(token.name.clone()) {
                    divergences.push(Divergence {
                        token_name: token.name.clone(),
                        local_value: Some(token.value.clone()),
                        figma_value: Some(remote_value),
                        kind: DivergenceKind::Modified,
                    });
                }
            }
        }
    }

    for (index, token) in local.iter().enumerate() {
        if token.figma_variable_id.is_some() && !matched[index] && reported.insert(token.name.clone()) {
            divergences.push(Divergence {
                token_name: token.name.clone(),
                local_value: Some(token.value.clone()),
                figma_value: None,
                kind: DivergenceKind::Removed,
            });
        }
    }

    debug!(project = project_id, counts = ?DivergenceCounts::of(&divergences), "divergences detected");
    divergences
}
