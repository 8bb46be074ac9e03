use crate::backend::FacultyInsights;

/// State of the faculty insights screen
#[derive(Debug, Clone, Default)]
pub struct InsightsState {
    data: Option<FacultyInsights>,
    loading: bool,
}

impl InsightsState {
    /// Mark the dataset as requested. Returns false when a load is already
    /// running or the data is present.
    pub fn begin_load(&mut self) -> bool {
        if self.loading || self.data.is_some() {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn loaded(&mut self, data: FacultyInsights) {
        self.data = Some(data);
        self.loading = false;
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    pub fn data(&self) -> Option<&FacultyInsights> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
