/// Close-if-open capability over whatever dropdown runtime the page ships.
/// The WASM shell implements this against the Bootstrap global; pages
/// without that runtime (and native tests) use a stub.
pub trait DropdownToggle {
    /// Returns true only when an open instance was found and told to close.
    fn close_if_open(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDropdownToggle;

impl DropdownToggle for NoopDropdownToggle {
    fn close_if_open(&self) -> bool {
        false
    }
}
