use iced::widget::canvas::Canvas;
use iced::widget::{button, column, container, pick_list, row, scrollable, text, Space};
use iced::{Alignment, Background, Element, Fill, Length};

use crate::charts::{CanvasBackend, CanvasSurface, SurfaceId, SurfaceSlots};
use crate::message::Message;
use crate::report::model::EmployeeRef;
use crate::report::{ReportHost, ReportType};
use crate::theme::{accent_button_style, secondary_button_style, CACHE_BADGE, DRAWER_BG, DRAWER_TEXT_INACTIVE};

pub const CHART_HEIGHT: f32 = 300.0;

/// The chart surfaces this screen lays out.
pub fn surfaces() -> SurfaceSlots<CanvasSurface> {
    SurfaceSlots {
        onboarding: Some(CanvasSurface {
            id: SurfaceId::Onboarding,
            height: CHART_HEIGHT,
        }),
        offboarding: Some(CanvasSurface {
            id: SurfaceId::Offboarding,
            height: CHART_HEIGHT,
        }),
    }
}

pub fn view<'a>(host: &'a ReportHost<CanvasBackend>, notice: Option<&'a str>) -> Element<'a, Message> {
    let state = host.state();

    let header = row![
        text("Employee Trend").size(28),
        Space::new().width(Length::Fill),
        pick_list(
            ReportType::ALL,
            Some(state.current_report_type()),
            Message::SwitchReportType
        ),
        button("Open Wizard")
            .style(accent_button_style)
            .on_press(Message::OpenWizard),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let mut content = column![header].spacing(16);

    if !state.date_from().is_empty() || !state.date_to().is_empty() {
        content = content.push(muted(format!(
            "Period: {} to {}",
            state.date_from(),
            state.date_to()
        )));
    }

    if host.config().show_departments && !state.departments().is_empty() {
        let names: Vec<String> = state.departments().iter().map(ToString::to_string).collect();
        content = content.push(muted(format!("Departments: {}", names.join(", "))));
    }

    if state.is_from_cache() {
        content = content.push(
            text("Showing the last saved report; live data was not available.")
                .size(13)
                .style(|_| text::Style {
                    color: Some(CACHE_BADGE),
                }),
        );
    }

    if let Some(notice) = notice {
        content = content.push(
            row![
                text(notice).size(14).width(Length::Fill),
                button("Dismiss")
                    .style(secondary_button_style)
                    .on_press(Message::DismissNotice),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        );
    }

    if !state.has_data() {
        content = content.push(
            container(text("No data available. Open the wizard to generate a report.").size(14))
                .padding(16)
                .style(iced::widget::container::bordered_box),
        );
        return container(content).padding(24).into();
    }

    let charts = row![
        chart_section(host, SurfaceId::Onboarding),
        chart_section(host, SurfaceId::Offboarding),
    ]
    .spacing(16);

    content = content
        .push(charts)
        .push(employee_table(state.current_report_type(), state.current_employee_data()));

    container(scrollable(content)).padding(24).into()
}

fn chart_section<'a>(host: &'a ReportHost<CanvasBackend>, id: SurfaceId) -> Element<'a, Message> {
    let chart: Element<'a, Message> = match host.chart(id) {
        Some(chart) => Canvas::new(chart)
            .width(Fill)
            .height(chart.surface().height)
            .into(),
        None => container(text("Preparing chart...").size(14))
            .height(Length::Fixed(CHART_HEIGHT))
            .center_y(Length::Fixed(CHART_HEIGHT))
            .into(),
    };

    container(column![text(host.title_for(id)).size(18), chart].spacing(8))
        .padding(16)
        .width(Length::FillPortion(1))
        .style(iced::widget::container::bordered_box)
        .into()
}

fn employee_table<'a>(report_type: ReportType, employees: &'a [EmployeeRef]) -> Element<'a, Message> {
    let title = text(format!("{} employees", report_type.label())).size(18);

    if employees.is_empty() {
        return column![title, muted("No employees in this period.".to_owned())]
            .spacing(8)
            .into();
    }

    let header = row![
        cell("Name"),
        cell("Department"),
        cell("Job Title"),
        cell("Start Date"),
        cell("End Date"),
    ]
    .spacing(16);

    let rows = employees.iter().map(|employee| {
        row![
            cell(employee.employee_name.as_deref().unwrap_or("")),
            cell(employee.department.as_deref().unwrap_or("")),
            cell(employee.job_title.as_deref().unwrap_or("")),
            cell(employee.start_date.as_deref().unwrap_or("")),
            cell(employee.end_date.as_deref().unwrap_or("Active")),
        ]
        .spacing(16)
        .into()
    });

    container(
        column![title, header, Space::new().height(Length::Fixed(4.0))]
            .push(column(rows).spacing(6))
            .spacing(8),
    )
    .padding(16)
    .width(Length::Fill)
    .style(|_| container::background(Background::Color(DRAWER_BG)))
    .into()
}

fn cell<'a>(value: &'a str) -> Element<'a, Message> {
    text(value).size(14).width(Length::FillPortion(1)).into()
}

fn muted<'a>(value: String) -> Element<'a, Message> {
    text(value)
        .size(14)
        .style(|_| text::Style {
            color: Some(DRAWER_TEXT_INACTIVE),
        })
        .into()
}
