use std::fmt;

use crate::report::model::StatMap;

pub const NO_DATA_LABEL: &str = "No Data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Slice colors, assigned by index. Beyond eight categories they repeat.
pub const PALETTE: [Color; 8] = [
    Color::from_rgb8(0xFF, 0x63, 0x84),
    Color::from_rgb8(0x36, 0xA2, 0xEB),
    Color::from_rgb8(0xFF, 0xCE, 0x56),
    Color::from_rgb8(0x4B, 0xC0, 0xC0),
    Color::from_rgb8(0x99, 0x66, 0xFF),
    Color::from_rgb8(0xFF, 0x9F, 0x40),
    Color::from_rgb8(0xFF, 0x9F, 0x7F),
    Color::from_rgb8(0x8F, 0xBC, 0x8F),
];

pub const EMPTY_COLOR: Color = Color::from_rgb8(0xE5, 0xE5, 0xE5);

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: i64,
    pub color: Color,
    /// Share of the total, rounded to one decimal.
    pub percentage: f64,
    text: String,
}

impl Slice {
    pub fn legend_text(&self) -> &str {
        &self.text
    }

    pub fn tooltip_text(&self) -> &str {
        &self.text
    }
}

/// Fully resolved donut chart: what to draw, in which colors, with which labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub slices: Vec<Slice>,
    pub show_legend: bool,
    pub show_tooltip: bool,
}

impl ChartSpec {
    /// The placeholder drawn when there is nothing to count.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slices: vec![Slice {
                label: NO_DATA_LABEL.to_owned(),
                value: 1,
                color: EMPTY_COLOR,
                percentage: 100.0,
                text: NO_DATA_LABEL.to_owned(),
            }],
            show_legend: false,
            show_tooltip: false,
        }
    }

    pub fn is_empty_state(&self) -> bool {
        !self.show_legend && self.slices.len() == 1 && self.slices[0].label == NO_DATA_LABEL
    }

    pub fn total(&self) -> i64 {
        self.slices
            .iter()
            .fold(0i64, |sum, slice| sum.saturating_add(slice.value))
    }
}

/// Percent of `total`, rounded half away from zero to one decimal.
pub fn percentage(value: i64, total: i64) -> f64 {
    (value as f64 * 1000.0 / total as f64).round() / 10.0
}

pub fn slice_text(label: &str, value: i64, percentage: f64) -> String {
    format!("{label}: {value} ({percentage:.1}%)")
}

/// Turns category counts into a donut chart, one slice per category in the
/// order the categories arrived.
///
/// A total of zero or less produces [`ChartSpec::empty`].
pub fn build_chart_spec(data: &StatMap, title: &str) -> ChartSpec {
    let total = data.total();
    if total <= 0 {
        return ChartSpec::empty(title);
    }

    let slices = data
        .iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let percentage = percentage(value, total);
            Slice {
                label: label.to_owned(),
                value,
                color: PALETTE[index % PALETTE.len()],
                percentage,
                text: slice_text(label, value, percentage),
            }
        })
        .collect();

    ChartSpec {
        title: title.to_owned(),
        slices,
        show_legend: true,
        show_tooltip: true,
    }
}
