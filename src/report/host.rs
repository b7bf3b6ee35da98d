use std::time::Duration;

use tracing::{debug, info};

use super::cache::ReportCache;
use super::model::{ReportContext, ReportType, StatMap};
use super::state::ReportState;
use crate::charts::{build_chart_spec, ChartBackend, ChartRenderer, SurfaceId, SurfaceSlots};
use crate::config::ReportConfig;

/// Gap between mounting and the first draw, leaving the layout time to
/// create the chart surfaces.
pub const RENDER_DELAY: Duration = Duration::from_millis(100);

/// Handle for one scheduled render. Only the most recent ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTarget {
    /// Opened on top of the report as a modal.
    New,
}

/// A request to open a window on some model, handled by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowAction {
    pub name: &'static str,
    pub res_model: &'static str,
    pub view_mode: ViewMode,
    pub target: ActionTarget,
}

impl WindowAction {
    pub fn detail_wizard() -> Self {
        Self {
            name: "Employee Trend",
            res_model: "hr.onboarding.report",
            view_mode: ViewMode::Form,
            target: ActionTarget::New,
        }
    }
}

pub trait ActionDispatcher {
    fn do_action(&mut self, action: WindowAction);
}

/// Glue between the host's mount/unmount signals and the report pieces.
pub struct ReportHost<B: ChartBackend> {
    config: ReportConfig,
    cache: Option<ReportCache>,
    state: ReportState,
    renderer: ChartRenderer<B>,
    pending: Option<RenderTicket>,
    issued: u64,
}

impl<B: ChartBackend> ReportHost<B> {
    /// The cache is ignored when the config turns persistence off.
    pub fn new(config: ReportConfig, cache: Option<ReportCache>, backend: B) -> Self {
        let cache = if config.persist { cache } else { None };
        Self {
            config,
            cache,
            state: ReportState::new(),
            renderer: ChartRenderer::new(backend),
            pending: None,
            issued: 0,
        }
    }

    /// Loads report data and schedules the first render.
    ///
    /// The caller must deliver the returned ticket to
    /// [`run_deferred_render`](Self::run_deferred_render) after [`RENDER_DELAY`].
    pub fn mount(&mut self, context: Option<&ReportContext>, now_ms: i64) -> RenderTicket {
        self.unmount();

        self.state = ReportState::new();
        self.state.initialize(context, self.cache.as_mut(), now_ms);
        info!(
            loaded = self.state.is_data_loaded(),
            from_cache = self.state.is_from_cache(),
            has_data = self.state.has_data(),
            "report mounted"
        );

        self.issued += 1;
        let ticket = RenderTicket(self.issued);
        self.pending = Some(ticket);
        ticket
    }

    /// Runs a scheduled render unless it was cancelled or superseded.
    pub fn run_deferred_render(&mut self, ticket: RenderTicket, surfaces: &SurfaceSlots<B::Surface>) -> bool {
        if self.pending != Some(ticket) {
            debug!(?ticket, "dropping cancelled render");
            return false;
        }
        self.pending = None;
        self.render_charts(surfaces);
        true
    }

    /// Draws both charts, or nothing at all when there is no data.
    /// Returns how many charts were drawn.
    pub fn render_charts(&mut self, surfaces: &SurfaceSlots<B::Surface>) -> usize {
        if !self.state.has_data() {
            info!("no data available for charts");
            return 0;
        }

        let mut drawn = 0;
        for id in SurfaceId::ALL {
            let spec = build_chart_spec(self.stats_for(id), self.title_for(id));
            if self.renderer.render(id, surfaces.get(id), &spec) {
                drawn += 1;
            }
        }
        drawn
    }

    pub fn unmount(&mut self) {
        if let Some(ticket) = self.pending.take() {
            debug!(?ticket, "cancelling scheduled render");
        }
        self.renderer.teardown_all();
    }

    pub fn switch_report_type(&mut self, report_type: ReportType) {
        self.state.switch_report_type(report_type);
    }

    pub fn open_detail_wizard(&self, dispatcher: &mut dyn ActionDispatcher) {
        dispatcher.do_action(WindowAction::detail_wizard());
    }

    pub fn title_for(&self, id: SurfaceId) -> &str {
        match id {
            SurfaceId::Onboarding => &self.config.title_onboarding,
            SurfaceId::Offboarding => &self.config.title_offboarding,
        }
    }

    fn stats_for(&self, id: SurfaceId) -> &StatMap {
        match id {
            SurfaceId::Onboarding => self.state.onboarding_stats(),
            SurfaceId::Offboarding => self.state.offboarding_stats(),
        }
    }

    pub fn chart(&self, id: SurfaceId) -> Option<&B::Instance> {
        self.renderer.instance(id)
    }

    pub fn has_pending_render(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }
}
