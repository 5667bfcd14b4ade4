use super::*;

/// Entry point called from `start()`. Reads the optional config override,
/// then binds immediately if the document already parsed or defers the bind
/// to a one-shot `DOMContentLoaded` listener.
pub(super) fn boot() -> Result<(), String> {
    let boot_started_at = epoch_millis_now();
    DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        state.boot_started_at_unix_ms = Some(boot_started_at);
        state.bind_latency_ms = None;
    });

    if let Some(config) = read_config_override() {
        CONFIG.with(|slot| *slot.borrow_mut() = config);
    }

    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "document is unavailable".to_string())?;

    if document.ready_state() == web_sys::DocumentReadyState::Loading {
        set_boot_phase("waiting", "deferring bind until DOMContentLoaded");
        DOM_READY_HANDLER.with(|slot| {
            if slot.borrow().is_some() {
                return;
            }
            let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
                if let Err(error) = bind_picker() {
                    set_boot_error(&error);
                }
            }));
            let _ = document.add_event_listener_with_callback(
                "DOMContentLoaded",
                callback.as_ref().unchecked_ref(),
            );
            *slot.borrow_mut() = Some(callback);
        });
        return Ok(());
    }

    bind_picker()
}

/// One-shot bind: seed the selection from the select's pre-marked options,
/// install the click handlers, and run the first render. Guarded so a late
/// `DOMContentLoaded` after an eager bind cannot run it twice.
pub(super) fn bind_picker() -> Result<(), String> {
    if BOUND.with(Cell::get) {
        return Ok(());
    }
    set_boot_phase("binding", "scanning picker markup");

    let document = page_document()?;
    let config = current_config();

    let options = select_options_snapshot(&document, &config);
    let seeded_ids: Vec<String> = options
        .iter()
        .filter(|(_, selected)| *selected)
        .map(|(value, _)| value.clone())
        .collect();
    let row_count = install_row_click_handlers(&document, &config);
    install_clear_handler(&document, &config);
    install_badge_remove_delegate(&document, &config);

    BOUND.with(|flag| flag.set(true));
    DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        state.bound = true;
        state.option_rows = row_count;
        state.seeded_ids = seeded_ids;
    });

    dispatch(PickerAction::Initialize { options });

    DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        if let Some(started_at) = state.boot_started_at_unix_ms {
            state.bind_latency_ms = Some(epoch_millis_now().saturating_sub(started_at));
        }
    });
    set_boot_phase("ready", "mechanics picker bound");
    Ok(())
}

pub(super) fn set_boot_phase(phase: &str, detail: &str) {
    DIAGNOSTICS.with(|state| {
        state.borrow_mut().set_phase(phase, detail);
    });
}

pub(super) fn set_boot_error(message: &str) {
    DIAGNOSTICS.with(|state| {
        state.borrow_mut().set_error(message);
    });
    web_sys::console::error_1(&JsValue::from_str(&format!(
        "mechanics picker failed to start: {message}"
    )));
}

pub(super) fn current_config() -> PickerConfig {
    CONFIG.with(|slot| slot.borrow().clone())
}

pub(super) fn epoch_millis_now() -> u64 {
    let now = js_sys::Date::now();
    if !now.is_finite() || now.is_sign_negative() {
        return 0;
    }
    now.floor().min(u64::MAX as f64) as u64
}
