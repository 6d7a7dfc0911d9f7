//! Objective collection and its derived display subset.
//!
//! Pure bookkeeping: timers live in the application layer and call back into
//! the board.

use std::collections::HashSet;

use super::model::{Objective, ObjectiveBoardView, ObjectiveCard};
use crate::ids::ObjectiveId;

/// Home-screen objective state.
#[derive(Debug, Clone)]
pub struct ObjectiveBoard {
    objectives: Vec<Objective>,
    display_count: usize,
    max_visible: usize,
    /// Ids whose completion was already observed.
    completion_seen: HashSet<ObjectiveId>,
    /// Dismissed or auto-removed ids; later loads do not bring them back.
    retired: HashSet<ObjectiveId>,
    /// Celebrations currently showing the banner.
    celebrations: usize,
}

impl ObjectiveBoard {
    pub fn new(max_visible: usize) -> Self {
        Self {
            objectives: Vec::new(),
            display_count: max_visible.min(1),
            max_visible,
            completion_seen: HashSet::new(),
            retired: HashSet::new(),
            celebrations: 0,
        }
    }

    /// Replaces the whole collection and returns objectives whose completion
    /// is seen for the first time.
    pub fn replace(&mut self, objectives: Vec<Objective>) -> Vec<Objective> {
        self.objectives = objectives
            .into_iter()
            .filter(|o| !self.retired.contains(&o.id))
            .collect();

        let mut newly_complete = Vec::new();
        for objective in self.objectives.iter().filter(|o| o.is_complete()) {
            if self.completion_seen.insert(objective.id.clone()) {
                #[cfg(feature = "tracing")]
                tracing::debug!(objective_id = %objective.id, "objective completion observed");
                newly_complete.push(objective.clone());
            }
        }
        newly_complete
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn get(&self, id: &ObjectiveId) -> Option<&Objective> {
        self.objectives.iter().find(|o| &o.id == id)
    }

    pub fn display_count(&self) -> usize {
        self.display_count
    }

    /// Top objectives by descending progress. Ties keep fetch order.
    pub fn visible_set(&self) -> Vec<&Objective> {
        let mut ranked: Vec<&Objective> = self.objectives.iter().collect();
        ranked.sort_by(|a, b| b.progress.total_cmp(&a.progress));
        ranked.truncate(self.display_count.min(self.max_visible));
        ranked
    }

    /// Grows the display subset by one. Returns whether the ramp has more
    /// steps left.
    pub fn tick_reveal(&mut self) -> bool {
        if self.display_count < self.max_visible {
            self.display_count += 1;
        }
        self.display_count < self.max_visible
    }

    pub fn reveal_complete(&self) -> bool {
        self.display_count >= self.max_visible
    }

    /// Removes an objective. Returns `false` if it was not present.
    pub fn dismiss(&mut self, id: &ObjectiveId) -> bool {
        self.retired.insert(id.clone());
        let before = self.objectives.len();
        self.objectives.retain(|o| &o.id != id);
        self.objectives.len() != before
    }

    pub fn show_celebration(&mut self) {
        self.celebrations += 1;
    }

    pub fn hide_celebration(&mut self) {
        self.celebrations = self.celebrations.saturating_sub(1);
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrations > 0
    }

    pub fn view(&self) -> ObjectiveBoardView {
        ObjectiveBoardView {
            cards: self
                .visible_set()
                .into_iter()
                .map(ObjectiveCard::from)
                .collect(),
            celebrating: self.is_celebrating(),
        }
    }
}
