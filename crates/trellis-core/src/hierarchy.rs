//! Expand/collapse view state for the subtask tree, kept as a flat set keyed
//! by task id rather than inside the rendered nodes, so it stays addressable
//! regardless of nesting depth.

use std::collections::BTreeSet;

use crate::model::Task;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HierarchyState {
    expanded: BTreeSet<u64>,
}

impl HierarchyState {
    /// The node handed in as the tree root starts expanded; every descendant
    /// starts collapsed.
    pub fn new(root_id: u64) -> Self {
        let mut expanded = BTreeSet::new();
        expanded.insert(root_id);
        Self { expanded }
    }

    pub fn is_expanded(&self, id: u64) -> bool {
        self.expanded.contains(&id)
    }

    /// Flips one node. Childless nodes have no transition; siblings and
    /// ancestors are untouched. Returns whether anything changed.
    pub fn toggle(&mut self, id: u64, has_subtasks: bool) -> bool {
        if !has_subtasks {
            return false;
        }
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyRow<'a> {
    pub task: &'a Task,
    pub level: usize,
    pub expanded: bool,
}

impl HierarchyRow<'_> {
    pub fn has_subtasks(&self) -> bool {
        self.task.has_subtasks()
    }
}

/// Preorder walk of the task tree, descending only into expanded nodes.
pub fn flatten<'a>(root: &'a Task, state: &HierarchyState) -> Vec<HierarchyRow<'a>> {
    let mut rows = Vec::new();
    push_rows(root, 0, state, &mut rows);
    rows
}

fn push_rows<'a>(
    task: &'a Task,
    level: usize,
    state: &HierarchyState,
    rows: &mut Vec<HierarchyRow<'a>>,
) {
    let expanded = state.is_expanded(task.id);
    rows.push(HierarchyRow {
        task,
        level,
        expanded,
    });

    if expanded {
        for subtask in &task.subtasks {
            push_rows(subtask, level + 1, state, rows);
        }
    }
}

/// Deletion is offered on descendants only, and only when the caller wired a
/// handler. The root is never deletable from within its own tree.
pub fn can_delete(level: usize, handler_supplied: bool) -> bool {
    level > 0 && handler_supplied
}

pub fn delete_prompt(title: &str) -> String {
    format!("Are you sure you want to delete \"{title}\"?")
}

/// A task that is itself a subtask gets a simplified single-node view with a
/// link back to its parent instead of the full subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    FullTree,
    SubtaskView { parent_id: u64 },
}

impl DisplayMode {
    pub fn for_task(task: &Task) -> Self {
        match task.parent_task {
            Some(parent_id) => DisplayMode::SubtaskView { parent_id },
            None => DisplayMode::FullTree,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn tree() -> Task {
        serde_json::from_value(json!({
            "id": 1, "title": "root", "status": "todo", "priority": "medium",
            "subtasks": [
                {"id": 2, "title": "left", "parent_task": 1, "subtasks": [
                    {"id": 4, "title": "left-leaf", "parent_task": 2}
                ]},
                {"id": 3, "title": "right", "parent_task": 1}
            ]
        }))
        .expect("tree fixture")
    }

    #[test]
    fn root_starts_expanded_and_descendants_collapsed() {
        let root = tree();
        let state = HierarchyState::new(root.id);
        let rows = flatten(&root, &state);

        let ids: Vec<u64> = rows.iter().map(|row| row.task.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(rows[0].expanded);
        assert!(!rows[1].expanded);
    }

    #[test]
    fn toggling_a_node_reveals_its_children_only() {
        let root = tree();
        let mut state = HierarchyState::new(root.id);

        assert!(state.toggle(2, true));
        let ids: Vec<u64> = flatten(&root, &state)
            .iter()
            .map(|row| row.task.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 4, 3]);

        assert!(state.toggle(2, true));
        let ids: Vec<u64> = flatten(&root, &state)
            .iter()
            .map(|row| row.task.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn childless_nodes_have_no_transition() {
        let root = tree();
        let mut state = HierarchyState::new(root.id);

        assert!(!state.toggle(3, false));
        assert!(!state.is_expanded(3));
    }

    #[test]
    fn levels_follow_nesting_depth() {
        let root = tree();
        let mut state = HierarchyState::new(root.id);
        state.toggle(2, true);

        let rows = flatten(&root, &state);
        let levels: Vec<usize> = rows.iter().map(|row| row.level).collect();
        assert_eq!(levels, vec![0, 1, 2, 1]);
    }

    #[test]
    fn collapsing_the_root_hides_the_subtree() {
        let root = tree();
        let mut state = HierarchyState::new(root.id);
        state.toggle(1, true);

        assert_eq!(flatten(&root, &state).len(), 1);
    }

    #[test]
    fn deletion_gate_requires_depth_and_handler() {
        assert!(!can_delete(0, true));
        assert!(!can_delete(1, false));
        assert!(can_delete(1, true));
        assert!(can_delete(3, true));
    }

    #[test]
    fn subtask_gets_the_simplified_view() {
        let root = tree();
        assert_eq!(DisplayMode::for_task(&root), DisplayMode::FullTree);
        assert_eq!(
            DisplayMode::for_task(&root.subtasks[0]),
            DisplayMode::SubtaskView { parent_id: 1 }
        );
    }

    #[test]
    fn delete_prompt_names_the_task() {
        assert_eq!(
            delete_prompt("Ship v2"),
            "Are you sure you want to delete \"Ship v2\"?"
        );
    }
}
