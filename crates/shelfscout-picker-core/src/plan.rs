use serde::Serialize;

use crate::catalog::OptionCatalog;
use crate::config::PickerConfig;
use crate::selection::Selection;

pub const COUNT_PLACEHOLDER: &str = "{count}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: String,
    pub label: String,
    /// True when no row declared this id and the label is the raw id. That
    /// usually means the selection holds a stale identifier, so the shell
    /// logs it instead of passing it off silently.
    pub label_is_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    pub badges: Vec<Badge>,
    pub count_label: String,
    pub clear_visible: bool,
}

impl RenderPlan {
    pub fn fallback_ids(&self) -> impl Iterator<Item = &str> {
        self.badges
            .iter()
            .filter(|badge| badge.label_is_fallback)
            .map(|badge| badge.id.as_str())
    }
}

pub fn build_render_plan(
    selection: &Selection,
    catalog: &OptionCatalog,
    config: &PickerConfig,
) -> RenderPlan {
    let badges = selection
        .iter()
        .map(|id| match catalog.display_name(id) {
            Some(name) => Badge {
                id: id.to_string(),
                label: name.to_string(),
                label_is_fallback: false,
            },
            None => Badge {
                id: id.to_string(),
                label: id.to_string(),
                label_is_fallback: true,
            },
        })
        .collect();

    RenderPlan {
        badges,
        count_label: count_label_text(&config.count_label_template, selection.len()),
        clear_visible: !selection.is_empty(),
    }
}

/// Substitutes the cardinality into the configured template. A template
/// without the placeholder is used verbatim.
pub fn count_label_text(template: &str, count: usize) -> String {
    template.replace(COUNT_PLACEHOLDER, &count.to_string())
}

/// One flag per option value, in the order given: true iff the value is a
/// member of the selection.
pub fn selected_flags<'a, I>(selection: &Selection, values: I) -> Vec<bool>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(|value| selection.contains(value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PickerAction, PickerState, apply_action};

    fn catalog() -> OptionCatalog {
        let mut catalog = OptionCatalog::new();
        catalog.push("42", "Drafting");
        catalog.push("7", "Worker Placement");
        catalog.push("11", "Deck Building");
        catalog
    }

    #[test]
    fn single_selection_renders_one_badge_count_and_visible_clear() {
        let mut state = PickerState::default();
        apply_action(
            &mut state,
            PickerAction::Add {
                id: "42".to_string(),
                display_name: "Drafting".to_string(),
            },
        );

        let plan = build_render_plan(&state.selection, &catalog(), &PickerConfig::default());

        assert_eq!(plan.badges.len(), 1);
        assert_eq!(plan.badges[0].label, "Drafting");
        assert!(!plan.badges[0].label_is_fallback);
        assert_eq!(plan.count_label, "Select mechanisms (1 selected)");
        assert!(plan.clear_visible);
    }

    #[test]
    fn empty_selection_renders_zero_count_and_hides_clear() {
        let plan = build_render_plan(
            &Selection::new(),
            &catalog(),
            &PickerConfig::default(),
        );

        assert!(plan.badges.is_empty());
        assert_eq!(plan.count_label, "Select mechanisms (0 selected)");
        assert!(!plan.clear_visible);
    }

    #[test]
    fn badges_follow_selection_insertion_order() {
        let mut selection = Selection::new();
        selection.insert("11");
        selection.insert("42");

        let plan = build_render_plan(&selection, &catalog(), &PickerConfig::default());

        let labels: Vec<&str> = plan.badges.iter().map(|badge| badge.label.as_str()).collect();
        assert_eq!(labels, vec!["Deck Building", "Drafting"]);
    }

    #[test]
    fn unknown_id_falls_back_to_raw_id_and_is_marked() {
        let mut selection = Selection::new();
        selection.insert("99");

        let plan = build_render_plan(&selection, &catalog(), &PickerConfig::default());

        assert_eq!(plan.badges.len(), 1);
        assert_eq!(plan.badges[0].label, "99");
        assert!(plan.badges[0].label_is_fallback);
        let fallbacks: Vec<&str> = plan.fallback_ids().collect();
        assert_eq!(fallbacks, vec!["99"]);
    }

    #[test]
    fn selected_flags_mirror_membership() {
        let mut state = PickerState::default();
        for id in ["1", "2"] {
            apply_action(
                &mut state,
                PickerAction::Add {
                    id: id.to_string(),
                    display_name: String::new(),
                },
            );
        }
        apply_action(
            &mut state,
            PickerAction::Remove {
                id: "1".to_string(),
            },
        );

        let flags = selected_flags(&state.selection, ["1", "2", "3"]);
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn initialize_round_trip_re_marks_exactly_the_seeded_options() {
        let mut state = PickerState::default();
        apply_action(
            &mut state,
            PickerAction::Initialize {
                options: vec![
                    ("A".to_string(), true),
                    ("B".to_string(), false),
                    ("C".to_string(), true),
                ],
            },
        );

        let flags = selected_flags(&state.selection, ["A", "B", "C"]);
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn template_without_placeholder_is_used_verbatim() {
        assert_eq!(count_label_text("Mechanics", 3), "Mechanics");
        assert_eq!(count_label_text("{count} picked", 2), "2 picked");
    }
}
