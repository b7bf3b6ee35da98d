pub mod home;
pub mod report;

#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub enum Page {
    Home,
    Report,
}

impl Page {
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Report => "Employee Trend",
        }
    }
}
