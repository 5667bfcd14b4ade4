use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("picker config override is not a valid JSON object: {0}")]
    InvalidJson(String),
}

/// Markup contract between the picker and the page template. Defaults match
/// the production search template; a page can override individual fields
/// through the `__SHELFSCOUT_PICKER_CONFIG__` global before the module loads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub select_name: String,
    pub badge_container_id: String,
    pub count_label_id: String,
    pub clear_button_id: String,
    pub dropdown_id: String,
    pub option_row_class: String,
    pub option_id_attr: String,
    pub option_name_attr: String,
    pub count_label_template: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            select_name: "mechanics".to_string(),
            badge_container_id: "selectedBadges".to_string(),
            count_label_id: "selectedCount".to_string(),
            clear_button_id: "clearAllBtn".to_string(),
            dropdown_id: "mechanicsDropdown".to_string(),
            option_row_class: "option-item".to_string(),
            option_id_attr: "data-id".to_string(),
            option_name_attr: "data-name".to_string(),
            count_label_template: "Select mechanisms ({count} selected)".to_string(),
        }
    }
}

impl PickerConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|error| ConfigError::InvalidJson(error.to_string()))
    }
}
