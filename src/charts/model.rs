/// Which pointer interactions a donut chart responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionConfig {
    pub enable_hover: bool,
    pub enable_selection: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            enable_hover: true,
            enable_selection: true,
        }
    }
}
