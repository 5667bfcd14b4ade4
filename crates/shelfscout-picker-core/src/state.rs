use serde::Serialize;

use crate::selection::Selection;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PickerState {
    pub selection: Selection,
    pub seeded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    /// One-shot seed from the native select's pre-marked options. Repeat
    /// initializes are ignored so a late DOMContentLoaded cannot re-seed.
    Initialize { options: Vec<(String, bool)> },
    Add { id: String, display_name: String },
    Remove { id: String },
    Toggle { id: String, display_name: String },
    Clear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    pub selection_changed: bool,
    pub render_due: bool,
    pub close_dropdown: bool,
}

pub fn apply_action(state: &mut PickerState, action: PickerAction) -> ActionOutcome {
    match action {
        PickerAction::Initialize { options } => {
            if state.seeded {
                return ActionOutcome::default();
            }
            state.seeded = true;
            let mut changed = false;
            for (value, selected) in options {
                if !selected {
                    continue;
                }
                let Some(value) = normalize_id(&value) else {
                    continue;
                };
                if state.selection.insert(&value) {
                    changed = true;
                }
            }
            ActionOutcome {
                selection_changed: changed,
                render_due: true,
                close_dropdown: false,
            }
        }
        PickerAction::Add { id, .. } => {
            let Some(id) = normalize_id(&id) else {
                return ActionOutcome::default();
            };
            ActionOutcome {
                selection_changed: state.selection.insert(&id),
                render_due: true,
                close_dropdown: false,
            }
        }
        PickerAction::Remove { id } => {
            let Some(id) = normalize_id(&id) else {
                return ActionOutcome::default();
            };
            ActionOutcome {
                selection_changed: state.selection.remove(&id),
                render_due: true,
                close_dropdown: false,
            }
        }
        PickerAction::Toggle { id, .. } => {
            let Some(id) = normalize_id(&id) else {
                return ActionOutcome::default();
            };
            if state.selection.contains(&id) {
                state.selection.remove(&id);
            } else {
                state.selection.insert(&id);
            }
            ActionOutcome {
                selection_changed: true,
                render_due: true,
                close_dropdown: true,
            }
        }
        PickerAction::Clear => ActionOutcome {
            selection_changed: state.selection.clear(),
            render_due: true,
            close_dropdown: false,
        },
    }
}

fn normalize_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(id: &str) -> PickerAction {
        PickerAction::Add {
            id: id.to_string(),
            display_name: String::new(),
        }
    }

    #[test]
    fn initialize_seeds_from_selected_options() {
        let mut state = PickerState::default();
        let outcome = apply_action(
            &mut state,
            PickerAction::Initialize {
                options: vec![
                    ("A".to_string(), true),
                    ("B".to_string(), false),
                    ("C".to_string(), true),
                ],
            },
        );

        assert!(outcome.selection_changed);
        assert!(outcome.render_due);
        assert!(!outcome.close_dropdown);
        assert!(state.seeded);
        let ids: Vec<&str> = state.selection.iter().collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn initialize_with_nothing_selected_still_marks_seeded() {
        let mut state = PickerState::default();
        let outcome = apply_action(
            &mut state,
            PickerAction::Initialize {
                options: vec![("A".to_string(), false)],
            },
        );

        assert!(!outcome.selection_changed);
        assert!(outcome.render_due);
        assert!(state.seeded);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn second_initialize_is_ignored() {
        let mut state = PickerState::default();
        apply_action(
            &mut state,
            PickerAction::Initialize {
                options: vec![("A".to_string(), true)],
            },
        );
        let outcome = apply_action(
            &mut state,
            PickerAction::Initialize {
                options: vec![("Z".to_string(), true)],
            },
        );

        assert_eq!(outcome, ActionOutcome::default());
        let ids: Vec<&str> = state.selection.iter().collect();
        assert_eq!(ids, vec!["A"]);
    }

    #[test]
    fn duplicate_add_reports_no_change_but_still_renders() {
        let mut state = PickerState::default();
        let first = apply_action(&mut state, add("42"));
        let second = apply_action(&mut state, add("42"));

        assert!(first.selection_changed);
        assert!(!second.selection_changed);
        assert!(second.render_due);
        assert_eq!(state.selection.len(), 1);
    }

    #[test]
    fn remove_absent_id_reports_no_change_but_still_renders() {
        let mut state = PickerState::default();
        apply_action(&mut state, add("1"));
        let outcome = apply_action(
            &mut state,
            PickerAction::Remove {
                id: "2".to_string(),
            },
        );

        assert!(!outcome.selection_changed);
        assert!(outcome.render_due);
        assert_eq!(state.selection.len(), 1);
    }

    #[test]
    fn remove_updates_membership() {
        let mut state = PickerState::default();
        apply_action(&mut state, add("1"));
        apply_action(&mut state, add("2"));
        let outcome = apply_action(
            &mut state,
            PickerAction::Remove {
                id: "1".to_string(),
            },
        );

        assert!(outcome.selection_changed);
        let ids: Vec<&str> = state.selection.iter().collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn toggle_selects_then_deselects_and_always_closes_the_dropdown() {
        let mut state = PickerState::default();
        let toggle = PickerAction::Toggle {
            id: "7".to_string(),
            display_name: "Worker Placement".to_string(),
        };

        let first = apply_action(&mut state, toggle.clone());
        assert!(first.selection_changed);
        assert!(first.close_dropdown);
        assert!(state.selection.contains("7"));

        let second = apply_action(&mut state, toggle);
        assert!(second.selection_changed);
        assert!(second.close_dropdown);
        assert!(!state.selection.contains("7"));
    }

    #[test]
    fn blank_ids_are_ignored() {
        let mut state = PickerState::default();
        let outcome = apply_action(
            &mut state,
            PickerAction::Toggle {
                id: "   ".to_string(),
                display_name: "Ghost".to_string(),
            },
        );

        assert_eq!(outcome, ActionOutcome::default());
        assert!(state.selection.is_empty());
    }

    #[test]
    fn ids_are_trimmed_before_membership_checks() {
        let mut state = PickerState::default();
        apply_action(&mut state, add(" 42 "));
        let outcome = apply_action(&mut state, add("42"));

        assert!(!outcome.selection_changed);
        assert_eq!(state.selection.len(), 1);
    }

    #[test]
    fn clear_empties_selection() {
        let mut state = PickerState::default();
        apply_action(&mut state, add("1"));
        apply_action(&mut state, add("2"));
        apply_action(&mut state, add("3"));

        let outcome = apply_action(&mut state, PickerAction::Clear);
        assert!(outcome.selection_changed);
        assert!(outcome.render_due);
        assert!(state.selection.is_empty());

        let again = apply_action(&mut state, PickerAction::Clear);
        assert!(!again.selection_changed);
        assert!(again.render_due);
    }
}
