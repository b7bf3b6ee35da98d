use iced::mouse;
use iced::widget::canvas::{self, Cache, Frame, Geometry, Path, Stroke, Text};
use iced::{Point, Radians, Rectangle, Renderer, Size, Theme};

use super::model::InteractionConfig;
use super::renderer::{ChartBackend, ChartInstance, RenderError, SurfaceId};
use super::spec::{ChartSpec, Color};

const TITLE_HEIGHT: f32 = 36.0;
const LEGEND_WIDTH_RATIO: f32 = 0.45;
const LEGEND_ROW_HEIGHT: f32 = 22.0;
const HOLE_RATIO: f32 = 0.55;
const SLICE_BORDER_WIDTH: f32 = 2.0;

impl From<Color> for iced::Color {
    fn from(color: Color) -> Self {
        iced::Color::from_rgb8(color.r, color.g, color.b)
    }
}

/// Where a chart may be drawn on the report screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSurface {
    pub id: SurfaceId,
    pub height: f32,
}

#[derive(Default)]
pub struct DonutState {
    selected_index: Option<usize>,
}

pub struct DonutChart {
    cache: Cache,
    spec: ChartSpec,
    surface: CanvasSurface,
    interaction: InteractionConfig,
}

impl DonutChart {
    pub fn new(spec: ChartSpec, surface: CanvasSurface) -> Self {
        Self {
            cache: Cache::new(),
            spec,
            surface,
            interaction: InteractionConfig::default(),
        }
    }

    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn surface(&self) -> CanvasSurface {
        self.surface
    }
}

impl ChartInstance for DonutChart {
    fn destroy(self) {
        self.cache.clear();
    }
}

/// Builds [`DonutChart`]s for the report screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasBackend {
    pub interaction: InteractionConfig,
}

impl ChartBackend for CanvasBackend {
    type Surface = CanvasSurface;
    type Instance = DonutChart;

    fn construct(
        &mut self,
        surface: &CanvasSurface,
        spec: &ChartSpec,
    ) -> Result<DonutChart, RenderError> {
        if spec.slices.is_empty() {
            return Err(RenderError::EmptySpec);
        }
        if spec.total() <= 0 {
            return Err(RenderError::Backend(format!(
                "{} slices add up to nothing",
                spec.title
            )));
        }

        Ok(DonutChart::new(spec.clone(), *surface).with_interaction(self.interaction))
    }
}

struct Ring {
    center: Point,
    outer: f32,
    inner: f32,
}

impl Ring {
    fn new(size: Size, spec: &ChartSpec) -> Self {
        let ring_width = if spec.show_legend {
            size.width * (1.0 - LEGEND_WIDTH_RATIO)
        } else {
            size.width
        };
        let ring_height = (size.height - TITLE_HEIGHT).max(0.0);

        let center = Point::new(ring_width / 2.0, TITLE_HEIGHT + ring_height / 2.0);
        let outer = ring_width.min(ring_height) * 0.4;

        Self {
            center,
            outer,
            inner: outer * HOLE_RATIO,
        }
    }
}

impl canvas::Program<crate::message::Message> for DonutChart {
    type State = DonutState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<crate::message::Message>> {
        match event {
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if !self.interaction.enable_hover || !self.spec.show_tooltip {
                    return None;
                }
                Some(canvas::Action::request_redraw())
            }
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if !self.interaction.enable_selection || !self.spec.show_tooltip {
                    return None;
                }
                if let Some(pos) = cursor.position_in(bounds) {
                    state.selected_index = hit_test_slice(&self.spec, bounds.size(), pos);
                }
                self.cache.clear();
                Some(canvas::Action::request_redraw())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut geometries = Vec::new();
        let total = self.spec.total();
        if self.spec.slices.is_empty() || total <= 0 {
            return geometries;
        }

        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let palette = theme.extended_palette();
            let ring = Ring::new(frame.size(), &self.spec);

            if let Some(heading) = heading(&self.spec) {
                frame.fill_text(Text {
                    content: heading,
                    position: Point::new(frame.size().width / 2.0, 8.0),
                    color: palette.background.base.text,
                    size: 16.0.into(),
                    align_x: iced::alignment::Horizontal::Center.into(),
                    ..Text::default()
                });
            }

            let mut start = -std::f32::consts::FRAC_PI_2;
            for (index, slice) in self.spec.slices.iter().enumerate() {
                let sweep = (slice.value as f32 / total as f32) * std::f32::consts::TAU;
                let end = start + sweep;
                if sweep <= 0.0 {
                    continue;
                }

                let path = Path::new(|builder| {
                    builder.arc(canvas::path::Arc {
                        center: ring.center,
                        radius: ring.outer,
                        start_angle: Radians(start),
                        end_angle: Radians(end),
                    });
                    builder.line_to(Point::new(
                        ring.center.x + ring.inner * end.cos(),
                        ring.center.y + ring.inner * end.sin(),
                    ));
                    builder.arc(canvas::path::Arc {
                        center: ring.center,
                        radius: ring.inner,
                        start_angle: Radians(end),
                        end_angle: Radians(start),
                    });
                    builder.close();
                });

                let color = if state.selected_index == Some(index) {
                    brighten(slice.color.into(), 1.15)
                } else {
                    slice.color.into()
                };

                frame.fill(&path, color);
                let border = border_width(&self.spec);
                if border > 0.0 {
                    frame.stroke(
                        &path,
                        Stroke::default()
                            .with_width(border)
                            .with_color(iced::Color::WHITE),
                    );
                }
                start = end;
            }

            if self.spec.show_legend {
                let left = frame.size().width * (1.0 - LEGEND_WIDTH_RATIO) + 8.0;
                for (index, slice) in self.spec.slices.iter().enumerate() {
                    let y = TITLE_HEIGHT + 8.0 + index as f32 * LEGEND_ROW_HEIGHT;
                    frame.fill(
                        &Path::circle(Point::new(left + 6.0, y + 7.0), 6.0),
                        iced::Color::from(slice.color),
                    );
                    frame.fill_text(Text {
                        content: slice.legend_text().to_owned(),
                        position: Point::new(left + 18.0, y),
                        color: palette.background.base.text,
                        size: 12.0.into(),
                        ..Text::default()
                    });
                }
            }
        });

        geometries.push(geometry);

        if !self.spec.show_tooltip || !self.interaction.enable_hover {
            return geometries;
        }

        if let Some(cursor_pos) = cursor.position_in(bounds) {
            let mut overlay = Frame::new(renderer, bounds.size());
            let palette = theme.extended_palette();

            if let Some(index) = hit_test_slice(&self.spec, bounds.size(), cursor_pos) {
                overlay.fill_text(Text {
                    content: self.spec.slices[index].tooltip_text().to_owned(),
                    position: Point::new(cursor_pos.x + 8.0, cursor_pos.y - 8.0),
                    color: palette.background.base.text,
                    size: 12.0.into(),
                    ..Text::default()
                });
            }

            geometries.push(overlay.into_geometry());
        }

        geometries
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.spec.show_tooltip && cursor.position_in(bounds).is_some() {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

/// The placeholder chart has no heading.
fn heading(spec: &ChartSpec) -> Option<String> {
    (!spec.is_empty_state()).then(|| format!("{} Insight", spec.title))
}

fn border_width(spec: &ChartSpec) -> f32 {
    if spec.is_empty_state() {
        0.0
    } else {
        SLICE_BORDER_WIDTH
    }
}

fn hit_test_slice(spec: &ChartSpec, size: Size, cursor_pos: Point) -> Option<usize> {
    let total = spec.total();
    if spec.slices.is_empty() || total <= 0 {
        return None;
    }

    let ring = Ring::new(size, spec);
    let dx = cursor_pos.x - ring.center.x;
    let dy = cursor_pos.y - ring.center.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance > ring.outer || distance < ring.inner {
        return None;
    }

    let mut angle = dy.atan2(dx);
    if angle < -std::f32::consts::FRAC_PI_2 {
        angle += std::f32::consts::TAU;
    }

    let mut start = -std::f32::consts::FRAC_PI_2;
    for (index, slice) in spec.slices.iter().enumerate() {
        let sweep = (slice.value as f32 / total as f32) * std::f32::consts::TAU;
        let end = start + sweep;
        if sweep > 0.0 && angle >= start && angle <= end {
            return Some(index);
        }
        start = end;
    }

    None
}

fn brighten(color: iced::Color, factor: f32) -> iced::Color {
    iced::Color {
        r: (color.r * factor).min(1.0),
        g: (color.g * factor).min(1.0),
        b: (color.b * factor).min(1.0),
        a: color.a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::renderer::ChartRenderer;
    use crate::charts::spec::{build_chart_spec, PALETTE};
    use crate::message::Message;
    use crate::report::model::StatMap;

    fn surface() -> CanvasSurface {
        CanvasSurface {
            id: SurfaceId::Onboarding,
            height: 300.0,
        }
    }

    #[test]
    fn backend_keeps_the_spec_it_was_given() {
        let spec = build_chart_spec(&StatMap::from_iter([("IT", 1)]), "Onboarding");

        let chart = CanvasBackend::default()
            .construct(&surface(), &spec)
            .expect("drawable");

        assert_eq!(chart.spec(), &spec);
        assert_eq!(chart.surface(), surface());
        chart.destroy();
    }

    #[test]
    fn backend_refuses_a_spec_without_slices() {
        let mut spec = ChartSpec::empty("Onboarding");
        spec.slices.clear();

        assert!(matches!(
            CanvasBackend::default().construct(&surface(), &spec),
            Err(RenderError::EmptySpec)
        ));
    }

    #[test]
    fn hit_test_finds_slices_on_the_ring_only() {
        let spec = build_chart_spec(&StatMap::from_iter([("A", 1), ("B", 1)]), "Onboarding");
        let size = Size::new(400.0, 336.0);
        let ring = Ring::new(size, &spec);
        let mid = (ring.outer + ring.inner) / 2.0;

        // First slice starts at twelve o'clock and runs clockwise.
        let right = Point::new(ring.center.x + mid, ring.center.y);
        let left = Point::new(ring.center.x - mid, ring.center.y);

        assert_eq!(hit_test_slice(&spec, size, right), Some(0));
        assert_eq!(hit_test_slice(&spec, size, left), Some(1));
        assert_eq!(hit_test_slice(&spec, size, ring.center), None);
    }

    fn click_on_first_slice(chart: &DonutChart, state: &mut DonutState) -> bool {
        let size = Size::new(400.0, 336.0);
        let ring = Ring::new(size, chart.spec());
        let mid = (ring.outer + ring.inner) / 2.0;
        let cursor = mouse::Cursor::Available(Point::new(ring.center.x + mid, ring.center.y));
        let event = canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));

        <DonutChart as canvas::Program<Message>>::update(
            chart,
            state,
            &event,
            Rectangle::new(Point::ORIGIN, size),
            cursor,
        )
        .is_some()
    }

    #[test]
    fn left_click_selects_the_slice_under_the_cursor() {
        let spec = build_chart_spec(&StatMap::from_iter([("A", 1), ("B", 1)]), "Onboarding");
        let chart = DonutChart::new(spec, surface());
        let mut state = DonutState::default();

        assert!(click_on_first_slice(&chart, &mut state));
        assert_eq!(state.selected_index, Some(0));
    }

    #[test]
    fn selection_can_be_switched_off() {
        let spec = build_chart_spec(&StatMap::from_iter([("A", 1), ("B", 1)]), "Onboarding");
        let chart = DonutChart::new(spec, surface()).with_interaction(InteractionConfig {
            enable_hover: true,
            enable_selection: false,
        });
        let mut state = DonutState::default();

        assert!(!click_on_first_slice(&chart, &mut state));
        assert_eq!(state.selected_index, None);
    }

    #[test]
    fn placeholder_chart_ignores_the_pointer() {
        let chart = DonutChart::new(ChartSpec::empty("Onboarding"), surface());
        let mut state = DonutState::default();
        let moved = canvas::Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(10.0, 10.0),
        });

        assert!(!click_on_first_slice(&chart, &mut state));
        assert!(
            <DonutChart as canvas::Program<Message>>::update(
                &chart,
                &mut state,
                &moved,
                Rectangle::new(Point::ORIGIN, Size::new(400.0, 336.0)),
                mouse::Cursor::Unavailable,
            )
            .is_none()
        );
    }

    #[test]
    fn huge_counts_still_produce_a_drawable_chart() {
        let spec = build_chart_spec(&StatMap::from_iter([("A", i64::MAX), ("B", 1)]), "Onboarding");
        let mut renderer = ChartRenderer::new(CanvasBackend::default());

        assert_eq!(spec.total(), i64::MAX);
        assert!(renderer.render(SurfaceId::Onboarding, Some(&surface()), &spec));
        assert!(renderer.instance(SurfaceId::Onboarding).is_some());
    }

    #[test]
    fn placeholder_has_no_heading_or_borders() {
        let placeholder = ChartSpec::empty("Departure");
        let spec = build_chart_spec(&StatMap::from_iter([("IT", 1)]), "Departure");

        assert_eq!(heading(&placeholder), None);
        assert_eq!(border_width(&placeholder), 0.0);
        assert_eq!(heading(&spec).as_deref(), Some("Departure Insight"));
        assert_eq!(border_width(&spec), SLICE_BORDER_WIDTH);
    }

    #[test]
    fn spec_colors_convert_to_iced_colors() {
        let color: iced::Color = PALETTE[1].into();

        assert_eq!(color, iced::Color::from_rgb8(0x36, 0xA2, 0xEB));
    }
}
