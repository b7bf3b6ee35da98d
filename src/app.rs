use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Background, Element, Length, Task, Theme};
use tracing::info;

use crate::charts::{CanvasBackend, InteractionConfig, SurfaceSlots};
use crate::config::ReportConfig;
use crate::message::Message;
use crate::report::storage::DEFAULT_QUOTA_BYTES;
use crate::report::{
    epoch_millis, ActionDispatcher, FileStorage, MemoryStorage, ReportCache, ReportContext, ReportHost,
    WindowAction, RENDER_DELAY,
};
use crate::screens::Page;
use crate::theme::{
    ACCENT, DRAWER_BG, DRAWER_ITEM_BG, DRAWER_TEXT_ACTIVE, DRAWER_TEXT_INACTIVE,
};
use lucide_icons::iced::{
    icon_chart_pie, icon_house, icon_panel_left_close, icon_panel_left_open, icon_refresh_cw,
};

/// Stands in for the host's action service: logs the request and tells the user.
#[derive(Debug, Default)]
struct NoticeDispatcher {
    notice: Option<String>,
}

impl ActionDispatcher for NoticeDispatcher {
    fn do_action(&mut self, action: WindowAction) {
        info!(
            name = action.name,
            model = action.res_model,
            view_mode = ?action.view_mode,
            target = ?action.target,
            "window action requested"
        );
        self.notice = Some(format!(
            "{} form requested for {}.",
            action.name, action.res_model
        ));
    }
}

pub struct App {
    theme: Theme,
    current_page: Page,
    sidebar_collapsed: bool,
    context: Option<ReportContext>,
    host: ReportHost<CanvasBackend>,
    dispatcher: NoticeDispatcher,
}

impl App {
    /// Without on-disk storage, snapshots only live as long as the process.
    pub fn new(
        config: ReportConfig,
        context: Option<ReportContext>,
        storage: Option<FileStorage>,
    ) -> (Self, Task<Message>) {
        let cache = match storage {
            Some(storage) => ReportCache::new(storage),
            None => ReportCache::new(MemoryStorage::with_quota(DEFAULT_QUOTA_BYTES)),
        };
        let backend = CanvasBackend {
            interaction: InteractionConfig::default(),
        };
        let host = ReportHost::new(config, Some(cache), backend);

        let mut app = Self {
            theme: Theme::Dark,
            current_page: Page::Report,
            sidebar_collapsed: true,
            context,
            host,
            dispatcher: NoticeDispatcher::default(),
        };
        let task = app.mount_report(true);
        (app, task)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ToggleSidebar => {
                self.sidebar_collapsed = !self.sidebar_collapsed;
                Task::none()
            }
            Message::Navigate(page) => {
                if page == self.current_page {
                    return Task::none();
                }
                if self.current_page == Page::Report {
                    self.host.unmount();
                }
                self.current_page = page;
                if page == Page::Report {
                    self.mount_report(true)
                } else {
                    Task::none()
                }
            }
            Message::Reload => {
                // A reload loses the live context, like a browser refresh would.
                self.current_page = Page::Report;
                self.mount_report(false)
            }
            Message::DeferredRender(ticket) => {
                let surfaces = if self.current_page == Page::Report {
                    crate::screens::report::surfaces()
                } else {
                    SurfaceSlots::none()
                };
                self.host.run_deferred_render(ticket, &surfaces);
                Task::none()
            }
            Message::SwitchReportType(report_type) => {
                self.host.switch_report_type(report_type);
                Task::none()
            }
            Message::OpenWizard => {
                self.host.open_detail_wizard(&mut self.dispatcher);
                Task::none()
            }
            Message::DismissNotice => {
                self.dispatcher.notice = None;
                Task::none()
            }
        }
    }

    pub fn view<'a>(&'a self) -> Element<'a, Message> {
        let sidebar = self.sidebar_view();
        let content = self.content_view();

        row![sidebar, content].height(Length::Fill).into()
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn mount_report(&mut self, with_context: bool) -> Task<Message> {
        let context = if with_context {
            self.context.as_ref()
        } else {
            None
        };
        let ticket = self.host.mount(context, epoch_millis());

        Task::perform(tokio::time::sleep(RENDER_DELAY), move |()| {
            Message::DeferredRender(ticket)
        })
    }

    fn sidebar_view<'a>(&'a self) -> Element<'a, Message> {
        let toggle_icon = if self.sidebar_collapsed {
            icon_panel_left_open()
        } else {
            icon_panel_left_close()
        };

        let toggle = button(toggle_icon.size(18))
            .on_press(Message::ToggleSidebar)
            .style(|_theme, status| {
                let mut background = ACCENT;
                if matches!(status, button::Status::Hovered) {
                    background.a = 0.85;
                }
                if matches!(status, button::Status::Pressed) {
                    background.a = 0.7;
                }

                button::Style {
                    background: Some(Background::Color(background)),
                    text_color: DRAWER_TEXT_ACTIVE,
                    ..Default::default()
                }
            });

        let pages = [Page::Home, Page::Report]
            .into_iter()
            .map(|page| self.sidebar_button(page, Message::Navigate(page)));

        let reload = self.sidebar_button_with(
            icon_refresh_cw(),
            "Reload",
            false,
            Message::Reload,
        );

        let content = column![toggle, Space::new().height(Length::Fixed(12.0))]
            .push(column(pages).spacing(6))
            .push(Space::new().height(Length::Fill))
            .push(reload)
            .spacing(12)
            .padding(12)
            .width(if self.sidebar_collapsed {
                Length::Fixed(64.0)
            } else {
                Length::Fixed(220.0)
            })
            .height(Length::Fill);

        container(content)
            .style(|_| iced::widget::container::background(DRAWER_BG))
            .into()
    }

    fn sidebar_button<'a>(&'a self, page: Page, message: Message) -> Element<'a, Message> {
        let icon = match page {
            Page::Home => icon_house(),
            Page::Report => icon_chart_pie(),
        };
        self.sidebar_button_with(icon, page.label(), self.current_page == page, message)
    }

    fn sidebar_button_with<'a>(
        &'a self,
        icon: iced::widget::Text<'a>,
        label: &'static str,
        selected: bool,
        message: Message,
    ) -> Element<'a, Message> {
        let icon = icon.size(18).style(move |_| iced::widget::text::Style {
            color: Some(if selected {
                DRAWER_TEXT_ACTIVE
            } else {
                DRAWER_TEXT_INACTIVE
            }),
        });

        let label_text = text(label).style(move |_| iced::widget::text::Style {
            color: Some(if selected {
                DRAWER_TEXT_ACTIVE
            } else {
                DRAWER_TEXT_INACTIVE
            }),
        });

        let row_content = if self.sidebar_collapsed {
            row![
                Space::new().width(Length::Fill),
                icon,
                Space::new().width(Length::Fill)
            ]
            .align_y(Alignment::Center)
        } else {
            row![icon, label_text]
                .spacing(12)
                .align_y(Alignment::Center)
        };

        button(row_content)
            .on_press(message)
            .width(Length::Fill)
            .style(move |_, status| {
                let background = if selected {
                    ACCENT
                } else {
                    DRAWER_ITEM_BG
                };

                let mut color = background;
                if matches!(status, button::Status::Hovered) {
                    color.a = 0.85;
                }
                if matches!(status, button::Status::Pressed) {
                    color.a = 0.7;
                }

                button::Style {
                    background: Some(Background::Color(color)),
                    ..Default::default()
                }
            })
            .padding(8)
            .into()
    }

    fn content_view<'a>(&'a self) -> Element<'a, Message> {
        match self.current_page {
            Page::Home => crate::screens::home::view(self.host.config(), self.context.is_some()),
            Page::Report => {
                crate::screens::report::view(&self.host, self.dispatcher.notice.as_deref())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::host::{ActionTarget, ViewMode};

    #[test]
    fn dispatcher_turns_actions_into_a_notice() {
        let mut dispatcher = NoticeDispatcher::default();

        dispatcher.do_action(WindowAction::detail_wizard());

        assert_eq!(
            dispatcher.notice.as_deref(),
            Some("Employee Trend form requested for hr.onboarding.report.")
        );
        assert_eq!(WindowAction::detail_wizard().view_mode, ViewMode::Form);
        assert_eq!(WindowAction::detail_wizard().target, ActionTarget::New);
    }
}
