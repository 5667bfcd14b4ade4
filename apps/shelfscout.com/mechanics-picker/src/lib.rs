//! WASM entrypoint for the mechanics picker on the Shelfscout search page.
//!
//! The page ships a Bootstrap dropdown of mechanic rows next to a hidden
//! `<select multiple name="mechanics">`. This crate binds the two together:
//! clicks toggle membership in the selection, and every change re-renders the
//! badge list, the count label, the clear button, and the select's option
//! flags, then dispatches a bubbling `change` event so the HTMX listener on
//! the surrounding form re-runs the search.
//!
//! Everything computable without a document lives in `shelfscout-picker-core`
//! and is tested natively; this crate is DOM glue plus a diagnostics surface.

#[cfg(any(target_arch = "wasm32", test))]
mod diagnostics;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::{Cell, RefCell};

    use shelfscout_picker_core::config::PickerConfig;
    use shelfscout_picker_core::state::{PickerAction, PickerState, apply_action};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use crate::diagnostics::PickerDiagnostics;

    mod boot;
    mod dom;
    mod interop;

    use boot::*;
    use dom::*;
    use interop::*;

    thread_local! {
        static PICKER_STATE: RefCell<PickerState> = RefCell::new(PickerState::default());
        static CONFIG: RefCell<PickerConfig> = RefCell::new(PickerConfig::default());
        static DIAGNOSTICS: RefCell<PickerDiagnostics> = RefCell::new(PickerDiagnostics::default());
        static BOUND: Cell<bool> = const { Cell::new(false) };
        static DOM_READY_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static ROW_CLICK_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = RefCell::new(Vec::new());
        static BADGE_REMOVE_DELEGATE: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static CLEAR_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        set_boot_phase("booting", "initializing mechanics picker");
        if let Err(error) = boot() {
            set_boot_error(&error);
        }
    }

    #[wasm_bindgen]
    pub fn picker_state_json() -> String {
        PICKER_STATE.with(|state| {
            serde_json::to_string(&*state.borrow()).unwrap_or_else(|_| "{}".to_string())
        })
    }

    #[wasm_bindgen]
    pub fn picker_diagnostics_json() -> String {
        DIAGNOSTICS.with(|state| {
            serde_json::to_string(&*state.borrow()).unwrap_or_else(|_| {
                "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
            })
        })
    }

    #[wasm_bindgen]
    pub fn picker_add(id: String, display_name: String) {
        dispatch(PickerAction::Add { id, display_name });
    }

    #[wasm_bindgen]
    pub fn picker_remove(id: String) {
        dispatch(PickerAction::Remove { id });
    }

    #[wasm_bindgen]
    pub fn picker_clear() {
        dispatch(PickerAction::Clear);
    }

    /// Single funnel for every mutation: apply the action, close the dropdown
    /// when the outcome asks for it, then re-render all projections.
    pub(crate) fn dispatch(action: PickerAction) {
        let outcome = PICKER_STATE.with(|state| apply_action(&mut state.borrow_mut(), action));
        if outcome.close_dropdown {
            close_dropdown_after_toggle();
        }
        if outcome.render_due {
            render_projections();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::picker_diagnostics_json;

#[cfg(not(target_arch = "wasm32"))]
pub fn picker_diagnostics_json() -> String {
    "{\"phase\":\"native\",\"detail\":\"picker diagnostics only available on wasm\"}".to_string()
}
