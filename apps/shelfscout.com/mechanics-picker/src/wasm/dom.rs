use super::*;

use shelfscout_picker_core::catalog::OptionCatalog;
use shelfscout_picker_core::plan::{RenderPlan, build_render_plan, selected_flags};
use web_sys::{Document, HtmlElement, HtmlOptionElement, HtmlSelectElement};

pub(super) fn page_document() -> Result<Document, String> {
    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    window
        .document()
        .ok_or_else(|| "document is unavailable".to_string())
}

/// Re-renders every projection from the current selection. Each target is
/// independently guarded: a missing element skips that projection only.
pub(super) fn render_projections() {
    let Ok(document) = page_document() else {
        return;
    };
    let config = current_config();
    let catalog = scan_option_catalog(&document, &config);
    let plan = PICKER_STATE
        .with(|state| build_render_plan(&state.borrow().selection, &catalog, &config));

    for id in plan.fallback_ids() {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "mechanics picker: no option row declares id \"{id}\"; badge shows the raw id"
        )));
        DIAGNOSTICS.with(|state| state.borrow_mut().record_name_fallback(id));
    }

    render_badges(&document, &config, &plan);
    render_count_label(&document, &config, &plan);
    render_clear_visibility(&document, &config, &plan);

    if let Some(select) = find_native_select(&document, &config) {
        apply_option_flags(&select);
        dispatch_change_event(&select);
    }

    DIAGNOSTICS.with(|state| state.borrow_mut().record_render());
}

/// Scans the candidate rows into a fresh catalog. Rebuilt each render so a
/// renamed or re-ordered row wins over anything remembered from a click.
pub(super) fn scan_option_catalog(document: &Document, config: &PickerConfig) -> OptionCatalog {
    let mut catalog = OptionCatalog::new();
    let rows = document.get_elements_by_class_name(&config.option_row_class);
    for index in 0..rows.length() {
        let Some(row) = rows.item(index) else {
            continue;
        };
        let Some(id) = row.get_attribute(&config.option_id_attr) else {
            continue;
        };
        let name = row
            .get_attribute(&config.option_name_attr)
            .unwrap_or_else(|| id.clone());
        catalog.push(&id, &name);
    }
    catalog
}

pub(super) fn find_native_select(
    document: &Document,
    config: &PickerConfig,
) -> Option<HtmlSelectElement> {
    let selector = format!("select[name='{}']", config.select_name);
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlSelectElement>().ok())
}

/// Snapshot of the select's options as (value, selected) pairs, used to seed
/// the selection at bind time. An absent select yields an empty snapshot.
pub(super) fn select_options_snapshot(
    document: &Document,
    config: &PickerConfig,
) -> Vec<(String, bool)> {
    let Some(select) = find_native_select(document, config) else {
        return Vec::new();
    };
    let options = select.options();
    let mut snapshot = Vec::with_capacity(options.length() as usize);
    for index in 0..options.length() {
        let Some(option) = options
            .item(index)
            .and_then(|element| element.dyn_into::<HtmlOptionElement>().ok())
        else {
            continue;
        };
        snapshot.push((option.value(), option.selected()));
    }
    snapshot
}

/// Installs one click handler per candidate row, toggling the row's declared
/// id. Returns the number of rows found.
pub(super) fn install_row_click_handlers(document: &Document, config: &PickerConfig) -> usize {
    let rows = document.get_elements_by_class_name(&config.option_row_class);
    let row_count = rows.length() as usize;

    ROW_CLICK_HANDLERS.with(|slot| {
        let mut handlers = slot.borrow_mut();
        if !handlers.is_empty() {
            return;
        }
        for index in 0..rows.length() {
            let Some(row) = rows.item(index) else {
                continue;
            };
            let Some(id) = row.get_attribute(&config.option_id_attr) else {
                continue;
            };
            let display_name = row
                .get_attribute(&config.option_name_attr)
                .unwrap_or_else(|| id.clone());
            let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(
                move |event: web_sys::Event| {
                    // Rows are anchors inside the dropdown; keep them from navigating.
                    event.prevent_default();
                    dispatch(PickerAction::Toggle {
                        id: id.clone(),
                        display_name: display_name.clone(),
                    });
                },
            ));
            let _ =
                row.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
            handlers.push(callback);
        }
    });

    row_count
}

pub(super) fn install_clear_handler(document: &Document, config: &PickerConfig) {
    let Some(button) = document.get_element_by_id(&config.clear_button_id) else {
        return;
    };
    CLEAR_CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            dispatch(PickerAction::Clear);
        }));
        let _ = button.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });
}

/// One delegated click handler on the badge container covers every badge's
/// remove glyph, so re-renders never have to swap per-badge closures.
pub(super) fn install_badge_remove_delegate(document: &Document, config: &PickerConfig) {
    let Some(container) = document.get_element_by_id(&config.badge_container_id) else {
        return;
    };
    BADGE_REMOVE_DELEGATE.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(
            move |event: web_sys::Event| {
                let Some(target) = event
                    .target()
                    .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                else {
                    return;
                };
                let Ok(Some(glyph)) = target.closest("[data-remove-id]") else {
                    return;
                };
                let Some(id) = glyph.get_attribute("data-remove-id") else {
                    return;
                };
                dispatch(PickerAction::Remove { id });
            },
        ));
        let _ =
            container.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });
}

fn render_badges(document: &Document, config: &PickerConfig, plan: &RenderPlan) {
    let Some(container) = document.get_element_by_id(&config.badge_container_id) else {
        return;
    };
    container.set_inner_html("");
    for badge in &plan.badges {
        let Ok(chip) = document.create_element("span") else {
            continue;
        };
        chip.set_class_name("badge selected-badge");
        chip.set_text_content(Some(&badge.label));

        let Ok(remove) = document.create_element("button") else {
            let _ = container.append_child(&chip);
            continue;
        };
        let _ = remove.set_attribute("type", "button");
        let _ = remove.set_attribute("data-remove-id", &badge.id);
        let _ = remove.set_attribute("aria-label", &format!("Remove {}", badge.label));
        remove.set_class_name("badge-remove");
        remove.set_text_content(Some("\u{d7}"));
        let _ = chip.append_child(&remove);
        let _ = container.append_child(&chip);
    }
}

fn render_count_label(document: &Document, config: &PickerConfig, plan: &RenderPlan) {
    let Some(label) = document.get_element_by_id(&config.count_label_id) else {
        return;
    };
    label.set_text_content(Some(&plan.count_label));
}

fn render_clear_visibility(document: &Document, config: &PickerConfig, plan: &RenderPlan) {
    let Some(button) = document
        .get_element_by_id(&config.clear_button_id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let display = if plan.clear_visible {
        "inline-block"
    } else {
        "none"
    };
    let _ = button.style().set_property("display", display);
}

/// Marks each option selected iff its value is a member of the selection.
fn apply_option_flags(select: &HtmlSelectElement) {
    let options = select.options();
    let mut elements = Vec::with_capacity(options.length() as usize);
    let mut values = Vec::with_capacity(options.length() as usize);
    for index in 0..options.length() {
        let Some(option) = options
            .item(index)
            .and_then(|element| element.dyn_into::<HtmlOptionElement>().ok())
        else {
            continue;
        };
        values.push(option.value());
        elements.push(option);
    }

    let flags = PICKER_STATE.with(|state| {
        selected_flags(&state.borrow().selection, values.iter().map(String::as_str))
    });
    for (option, flag) in elements.iter().zip(flags) {
        option.set_selected(flag);
    }
}

/// Bubbling change event so the HTMX listener on an ancestor form re-runs
/// the search whenever the picker mutates the select.
fn dispatch_change_event(select: &HtmlSelectElement) {
    let init = web_sys::EventInit::new();
    init.set_bubbles(true);
    let Ok(event) = web_sys::Event::new_with_event_init_dict("change", &init) else {
        return;
    };
    let _ = select.dispatch_event(&event);
    DIAGNOSTICS.with(|state| state.borrow_mut().record_change_event());
}
