//! Stage ordering engine.
//!
//! Four structural edits - add, update, remove, move - all maintaining the
//! invariant that `stages[i].order == i + 1` for every position, with no gaps
//! and no duplicates. None of these operations can fail: out-of-range indices
//! are no-ops, and the only externally visible failure in the whole editing
//! flow is the save gate in the validator.

use super::types::{PipelineConfig, Stage};

impl PipelineConfig {
    /// Append a stage, assigning `order = len + 1`.
    pub fn add_stage(&mut self, mut stage: Stage) {
        stage.order = self.stages.len() + 1;
        self.stages.push(stage);
    }

    /// Replace the stage at `index` in place.
    ///
    /// The original id is preserved so edits never re-key a stage, and
    /// `order` keeps the positional value regardless of what the caller set.
    /// Out-of-range indices are ignored.
    pub fn update_stage(&mut self, index: usize, mut stage: Stage) {
        let Some(existing) = self.stages.get_mut(index) else {
            return;
        };
        stage.id = existing.id.clone();
        stage.order = existing.order;
        *existing = stage;
    }

    /// Remove the stage at `index`, then renumber. Out-of-range is a no-op.
    ///
    /// Removing the only stage leaves an empty list, which makes the
    /// configuration unsavable until a stage is added back.
    pub fn remove_stage(&mut self, index: usize) {
        if index >= self.stages.len() {
            return;
        }
        self.stages.remove(index);
        self.renumber();
    }

    /// Move the stage at `from` to position `to` (splice-move, not swap),
    /// then renumber. No-op when `from == to` or either index is out of
    /// range.
    pub fn move_stage(&mut self, from: usize, to: usize) {
        let len = self.stages.len();
        if from == to || from >= len || to >= len {
            return;
        }
        let stage = self.stages.remove(from);
        self.stages.insert(to, stage);
        self.renumber();
    }

    fn renumber(&mut self) {
        for (i, stage) in self.stages.iter_mut().enumerate() {
            stage.order = i + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::StageColor;

    fn config_with(names: &[&str]) -> PipelineConfig {
        let mut config = PipelineConfig::new("org-1");
        config.name = "Test Pipeline".to_string();
        for name in names {
            config.add_stage(Stage::new(*name, StageColor::Blue, 10));
        }
        config
    }

    fn assert_contiguous(config: &PipelineConfig) {
        for (i, stage) in config.stages.iter().enumerate() {
            assert_eq!(stage.order, i + 1, "order gap at position {}", i);
        }
    }

    fn names(config: &PipelineConfig) -> Vec<&str> {
        config.stages.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_add_assigns_next_order() {
        let config = config_with(&["A", "B", "C"]);
        assert_eq!(config.stages[2].order, 3);
        assert_contiguous(&config);
    }

    #[test]
    fn test_remove_renumbers_without_gaps() {
        let mut config = config_with(&["A", "B", "C", "D"]);
        config.remove_stage(1);
        assert_eq!(names(&config), vec!["A", "C", "D"]);
        assert_contiguous(&config);
    }

    #[test]
    fn test_remove_last_stage_empties_and_blocks_save() {
        let mut config = config_with(&["A"]);
        config.remove_stage(0);
        assert!(config.stages.is_empty());
        assert!(!config.can_save());
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut config = config_with(&["A", "B"]);
        config.remove_stage(5);
        assert_eq!(config.stages.len(), 2);
        assert_contiguous(&config);
    }

    #[test]
    fn test_move_is_splice_not_swap() {
        let mut config = config_with(&["A", "B", "C", "D"]);
        config.move_stage(0, 2);
        // A removed from front, reinserted at index 2: B C A D, not C B A D.
        assert_eq!(names(&config), vec!["B", "C", "A", "D"]);
        assert_contiguous(&config);
    }

    #[test]
    fn test_move_same_index_is_noop() {
        let mut config = config_with(&["A", "B", "C"]);
        let before: Vec<String> = config.stages.iter().map(|s| s.id.clone()).collect();
        config.move_stage(1, 1);
        let after: Vec<String> = config.stages.iter().map(|s| s.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_move_then_reverse_restores_order() {
        let mut config = config_with(&["A", "B", "C", "D", "E"]);
        let before = names(&config)
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        config.move_stage(1, 3);
        config.move_stage(3, 1);
        assert_eq!(names(&config), before);
        assert_contiguous(&config);
    }

    #[test]
    fn test_update_preserves_id_and_order() {
        let mut config = config_with(&["A", "B"]);
        let original_id = config.stages[1].id.clone();

        let mut replacement = Stage::new("B renamed", StageColor::Red, 60);
        replacement.order = 99;
        config.update_stage(1, replacement);

        assert_eq!(config.stages[1].id, original_id);
        assert_eq!(config.stages[1].name, "B renamed");
        assert_eq!(config.stages[1].order, 2);
        assert_contiguous(&config);
    }

    #[test]
    fn test_ids_stable_across_mixed_edit_sequence() {
        let mut config = config_with(&["A", "B", "C", "D"]);
        let mut ids: Vec<String> = config.stages.iter().map(|s| s.id.clone()).collect();

        config.move_stage(3, 0);
        config.remove_stage(2);
        config.add_stage(Stage::new("E", StageColor::Purple, 80));
        config.move_stage(0, 3);

        ids.remove(1); // B was at index 2 after the first move
        let surviving: Vec<&String> = ids.iter().collect();
        for id in surviving {
            assert!(
                config.stages.iter().any(|s| &s.id == id),
                "id {} lost during edits",
                id
            );
        }
        // No duplicates introduced either.
        let mut seen = std::collections::HashSet::new();
        for stage in &config.stages {
            assert!(seen.insert(stage.id.clone()), "duplicate id {}", stage.id);
        }
        assert_contiguous(&config);
    }

    #[test]
    fn test_invariant_holds_after_long_random_sequence() {
        // Deterministic pseudo-random walk over the four operations.
        let mut config = config_with(&["A", "B", "C"]);
        let mut seed: u64 = 0x5eed;
        for step in 0..200 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let len = config.stages.len();
            match seed % 4 {
                0 => config.add_stage(Stage::new(format!("S{}", step), StageColor::Gray, 25)),
                1 if len > 0 => config.remove_stage((seed >> 8) as usize % len),
                2 if len > 1 => {
                    let from = (seed >> 8) as usize % len;
                    let to = (seed >> 16) as usize % len;
                    config.move_stage(from, to);
                }
                3 if len > 0 => {
                    let idx = (seed >> 8) as usize % len;
                    config.update_stage(idx, Stage::new(format!("U{}", step), StageColor::Teal, 40));
                }
                _ => {}
            }
            assert_contiguous(&config);
        }
    }
}
