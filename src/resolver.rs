//! Dependency resolver for mod toggling
//!
//! Given a requested set of state changes, computes and applies the full
//! consistent set of renames. Enable-requests always run first and
//! unconditionally: enabling a mod cannot break anyone's hard dependency,
//! and it guarantees the dependent scans for the disable half see the
//! post-enable state. Each disable-request is then checked against every
//! other currently-enabled mod's declared dependencies:
//!
//! - hard dependents present: the operator picks cancel, force (with a
//!   second explicit confirmation), or a cascade of the whole chain;
//! - only soft dependents: a single Y/N about degraded functionality;
//! - neither: the mod is disabled without ceremony.
//!
//! A failed rename is reported for that mod and the batch continues;
//! partial completion is expected and visible, never swallowed.

use std::collections::{HashSet, VecDeque};

use crate::error::Result;
use crate::prompt::{HardChoice, Prompt};
use crate::registry::{ModRegistry, ModState};
use crate::report::ToggleSummary;

/// A partitioned batch of state changes, as registry indices
#[derive(Debug, Default)]
pub struct ToggleRequest {
    pub enable: Vec<usize>,
    pub disable: Vec<usize>,
}

impl ToggleRequest {
    /// Flip each selected mod: disabled ones become enable-requests,
    /// enabled ones become disable-requests
    pub fn toggles(registry: &ModRegistry, indices: &[usize]) -> Self {
        let mut request = Self::default();
        for &index in indices {
            match registry.entry(index).state {
                ModState::Disabled => request.enable.push(index),
                ModState::Enabled => request.disable.push(index),
            }
        }
        request
    }

    pub fn is_empty(&self) -> bool {
        self.enable.is_empty() && self.disable.is_empty()
    }
}

/// Apply a toggle batch, prompting through `prompt` where policy demands
///
/// Only prompt failures (no terminal, interrupt) propagate; rename errors
/// land in the summary.
pub fn apply(
    registry: &mut ModRegistry,
    request: &ToggleRequest,
    prompt: &mut dyn Prompt,
) -> Result<ToggleSummary> {
    let mut summary = ToggleSummary::default();

    for &index in &request.enable {
        let identity = registry.entry(index).identity.clone();
        if registry.entry(index).state == ModState::Enabled {
            summary.record_skipped(&identity, "already enabled");
            continue;
        }
        match registry.set_state(index, ModState::Enabled) {
            Ok(()) => summary.record_changed(&identity, ModState::Enabled),
            Err(e) => summary.record_failed(&identity, &e.to_string()),
        }
    }

    for &index in &request.disable {
        apply_disable(registry, index, prompt, &mut summary)?;
    }

    Ok(summary)
}

fn apply_disable(
    registry: &mut ModRegistry,
    index: usize,
    prompt: &mut dyn Prompt,
    summary: &mut ToggleSummary,
) -> Result<()> {
    let identity = registry.entry(index).identity.clone();

    // an earlier cascade in the same batch may already have taken it
    if registry.entry(index).state == ModState::Disabled {
        summary.record_skipped(&identity, "already disabled");
        return Ok(());
    }

    let (hard, soft) = dependents_of(registry, index);

    if !hard.is_empty() {
        match prompt.choose_hard_dependents(&identity, &hard)? {
            HardChoice::Cancel => {
                summary.record_skipped(
                    &identity,
                    &format!("left enabled; disable {} first", hard.join(", ")),
                );
            }
            HardChoice::Force => {
                if prompt.confirm_force(&identity)? {
                    force_disable(registry, index, &hard, &soft, summary);
                } else {
                    summary.record_skipped(&identity, "force-disable declined");
                }
            }
            HardChoice::Cascade => cascade(registry, index, summary),
        }
        return Ok(());
    }

    if !soft.is_empty() {
        if prompt.confirm_soft(&identity, &soft)? {
            disable_one(registry, index, summary);
            for dependent in &soft {
                summary.record_soft_affected(dependent);
            }
        } else {
            summary.record_skipped(&identity, "operator declined");
        }
        return Ok(());
    }

    disable_one(registry, index, summary);
    Ok(())
}

fn disable_one(registry: &mut ModRegistry, index: usize, summary: &mut ToggleSummary) -> bool {
    let identity = registry.entry(index).identity.clone();
    match registry.set_state(index, ModState::Disabled) {
        Ok(()) => {
            summary.record_changed(&identity, ModState::Disabled);
            true
        }
        Err(e) => {
            summary.record_failed(&identity, &e.to_string());
            false
        }
    }
}

fn force_disable(
    registry: &mut ModRegistry,
    index: usize,
    hard: &[String],
    soft: &[String],
    summary: &mut ToggleSummary,
) {
    if disable_one(registry, index, summary) {
        println!(
            "Note: {} remain(s) enabled with an unsatisfied hard dependency",
            hard.join(", ")
        );
        for dependent in soft {
            summary.record_soft_affected(dependent);
        }
    }
}

/// Enabled mods (other than the target) declaring an edge at the target
fn dependents_of(registry: &ModRegistry, target: usize) -> (Vec<String>, Vec<String>) {
    let target_identity = registry.entry(target).identity.clone();
    let mut hard = Vec::new();
    let mut soft = Vec::new();

    for index in registry.enabled_indices() {
        if index == target {
            continue;
        }
        let deps = registry.read_dependencies(index);
        let identity = &registry.entry(index).identity;
        if deps.hard.contains(&target_identity) {
            hard.push(identity.clone());
        }
        if deps.soft.contains(&target_identity) {
            soft.push(identity.clone());
        }
    }

    (hard, soft)
}

/// Breadth-first disable of the hard-dependency chain rooted at `start`
///
/// The processed set and the queued set double as the cycle guard: edges
/// are not guaranteed acyclic, so each mod is enqueued at most once and
/// the traversal stays linear in module count. A mod that fails to
/// disable does not enqueue its own dependents; it is still functionally
/// enabled. Soft dependents are never enqueued; they are collected once
/// at the end as a may-degrade list.
fn cascade(registry: &mut ModRegistry, start: usize, summary: &mut ToggleSummary) {
    let mut queue: VecDeque<usize> = VecDeque::from([start]);
    let mut queued: HashSet<usize> = HashSet::from([start]);
    let mut disabled: HashSet<usize> = HashSet::new();

    while let Some(current) = queue.pop_front() {
        if disabled.contains(&current) || registry.entry(current).state == ModState::Disabled {
            continue;
        }

        if !disable_one(registry, current, summary) {
            continue;
        }
        disabled.insert(current);

        let current_identity = registry.entry(current).identity.clone();
        for index in registry.enabled_indices() {
            if disabled.contains(&index) || queued.contains(&index) {
                continue;
            }
            if registry
                .read_dependencies(index)
                .hard
                .contains(&current_identity)
            {
                queue.push_back(index);
                queued.insert(index);
            }
        }
    }

    let disabled_identities: Vec<String> = disabled
        .iter()
        .map(|&i| registry.entry(i).identity.clone())
        .collect();
    for index in registry.enabled_indices() {
        let deps = registry.read_dependencies(index);
        if deps.soft.iter().any(|s| disabled_identities.contains(s)) {
            summary.record_soft_affected(&registry.entry(index).identity);
        }
    }
}
