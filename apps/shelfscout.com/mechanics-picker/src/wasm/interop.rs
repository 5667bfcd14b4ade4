use super::*;

use shelfscout_picker_core::dropdown::DropdownToggle;

const CONFIG_GLOBAL: &str = "__SHELFSCOUT_PICKER_CONFIG__";

/// Reads the optional page-level config override. Accepts either a JSON
/// string or a plain object; anything malformed warns and falls back to the
/// defaults.
pub(super) fn read_config_override() -> Option<PickerConfig> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    let raw = match value.as_string() {
        Some(raw) => raw,
        None => js_sys::JSON::stringify(&value).ok()?.as_string()?,
    };
    match PickerConfig::from_json(&raw) {
        Ok(config) => Some(config),
        Err(error) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "mechanics picker: ignoring {CONFIG_GLOBAL}: {error}"
            )));
            None
        }
    }
}

/// Closes the dropdown after a row toggle, best-effort, and records whether
/// a close was actually issued.
pub(super) fn close_dropdown_after_toggle() {
    let toggle = BootstrapDropdown {
        container_id: current_config().dropdown_id,
    };
    let issued = toggle.close_if_open();
    DIAGNOSTICS.with(|state| state.borrow_mut().record_dropdown_close(issued));
}

/// `DropdownToggle` over the Bootstrap global. Every step degrades to "no
/// close issued": absent runtime, absent container, or no active instance.
pub(super) struct BootstrapDropdown {
    pub container_id: String,
}

impl DropdownToggle for BootstrapDropdown {
    fn close_if_open(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let Some(document) = window.document() else {
            return false;
        };
        let Some(container) = document.get_element_by_id(&self.container_id) else {
            return false;
        };
        let Ok(bootstrap) = js_sys::Reflect::get(&window, &JsValue::from_str("bootstrap")) else {
            return false;
        };
        if bootstrap.is_undefined() || bootstrap.is_null() {
            return false;
        }
        let Ok(dropdown_class) = js_sys::Reflect::get(&bootstrap, &JsValue::from_str("Dropdown"))
        else {
            return false;
        };
        let Ok(get_instance) = js_sys::Reflect::get(&dropdown_class, &JsValue::from_str("getInstance"))
        else {
            return false;
        };
        let Ok(get_instance) = get_instance.dyn_into::<js_sys::Function>() else {
            return false;
        };
        let Ok(instance) = get_instance.call1(&dropdown_class, container.unchecked_ref()) else {
            return false;
        };
        if instance.is_undefined() || instance.is_null() {
            return false;
        }
        let Ok(hide) = js_sys::Reflect::get(&instance, &JsValue::from_str("hide")) else {
            return false;
        };
        let Ok(hide) = hide.dyn_into::<js_sys::Function>() else {
            return false;
        };
        hide.call0(&instance).is_ok()
    }
}
