use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PickerDiagnostics {
    pub phase: String,
    pub detail: String,
    pub bound: bool,
    pub boot_started_at_unix_ms: Option<u64>,
    pub bind_latency_ms: Option<u64>,
    pub option_rows: usize,
    pub seeded_ids: Vec<String>,
    pub renders: u64,
    pub change_events_dispatched: u64,
    pub name_fallback_count: u64,
    pub last_name_fallback_id: Option<String>,
    pub dropdown_closes_requested: u64,
    pub dropdown_closes_issued: u64,
    pub last_error: Option<String>,
}

impl Default for PickerDiagnostics {
    fn default() -> Self {
        Self {
            phase: "idle".to_string(),
            detail: "picker not started".to_string(),
            bound: false,
            boot_started_at_unix_ms: None,
            bind_latency_ms: None,
            option_rows: 0,
            seeded_ids: Vec::new(),
            renders: 0,
            change_events_dispatched: 0,
            name_fallback_count: 0,
            last_name_fallback_id: None,
            dropdown_closes_requested: 0,
            dropdown_closes_issued: 0,
            last_error: None,
        }
    }
}

#[cfg_attr(test, allow(dead_code))]
impl PickerDiagnostics {
    pub fn set_phase(&mut self, phase: &str, detail: &str) {
        self.phase = phase.to_string();
        self.detail = detail.to_string();
        if phase != "error" {
            self.last_error = None;
        }
    }

    pub fn set_error(&mut self, message: &str) {
        self.phase = "error".to_string();
        self.detail = "startup failed".to_string();
        self.last_error = Some(message.to_string());
    }

    pub fn record_render(&mut self) {
        self.renders = self.renders.saturating_add(1);
    }

    pub fn record_change_event(&mut self) {
        self.change_events_dispatched = self.change_events_dispatched.saturating_add(1);
    }

    pub fn record_name_fallback(&mut self, id: &str) {
        self.name_fallback_count = self.name_fallback_count.saturating_add(1);
        self.last_name_fallback_id = Some(id.to_string());
    }

    pub fn record_dropdown_close(&mut self, issued: bool) {
        self.dropdown_closes_requested = self.dropdown_closes_requested.saturating_add(1);
        if issued {
            self.dropdown_closes_issued = self.dropdown_closes_issued.saturating_add(1);
        }
    }
}
