use crate::dashboard::JobId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Upload,
    Dashboard,
}

/// View-only state; everything the simulators touch lives in the store.
#[derive(Debug, Default)]
pub struct UiState {
    pub drag_active: bool,
    pub results_for: Option<JobId>,
    pub scroll_to: Option<Section>,
}

impl UiState {
    /// Returns true once for the section that should scroll into view.
    pub fn take_scroll(&mut self, section: Section) -> bool {
        if self.scroll_to == Some(section) {
            self.scroll_to = None;
            return true;
        }
        false
    }
}
