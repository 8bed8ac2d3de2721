/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    AddingCategory,
    ConfirmRemoveCategory,
}

impl UiMode {
    /// Whether a modal form currently owns the keyboard
    pub fn is_form(&self) -> bool {
        matches!(self, Self::AddingTask | Self::AddingCategory)
    }
}
