use crate::report::{RenderTicket, ReportType};

#[derive(Debug, Clone)]
pub enum Message {
    ToggleSidebar,
    Navigate(crate::screens::Page),
    Reload,
    DeferredRender(RenderTicket),
    SwitchReportType(ReportType),
    OpenWizard,
    DismissNotice,
}
