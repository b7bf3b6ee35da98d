use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tracing::{debug, error};

use super::spec::ChartSpec;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart spec has no slices")]
    EmptySpec,
    #[error("chart backend failed: {0}")]
    Backend(String),
}

/// The two drawing targets of the report.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub enum SurfaceId {
    Onboarding,
    Offboarding,
}

impl SurfaceId {
    pub const ALL: [SurfaceId; 2] = [SurfaceId::Onboarding, SurfaceId::Offboarding];

    pub fn name(&self) -> &'static str {
        match self {
            SurfaceId::Onboarding => "onboarding",
            SurfaceId::Offboarding => "offboarding",
        }
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Surfaces that exist in the layout right now. Either may be missing.
#[derive(Debug, Clone)]
pub struct SurfaceSlots<S> {
    pub onboarding: Option<S>,
    pub offboarding: Option<S>,
}

impl<S> SurfaceSlots<S> {
    pub fn none() -> Self {
        Self {
            onboarding: None,
            offboarding: None,
        }
    }

    pub fn get(&self, id: SurfaceId) -> Option<&S> {
        match id {
            SurfaceId::Onboarding => self.onboarding.as_ref(),
            SurfaceId::Offboarding => self.offboarding.as_ref(),
        }
    }
}

impl<S> Default for SurfaceSlots<S> {
    fn default() -> Self {
        Self::none()
    }
}

/// A live drawing bound to one surface.
pub trait ChartInstance {
    fn destroy(self);
}

/// The charting library as the renderer sees it.
pub trait ChartBackend {
    type Surface;
    type Instance: ChartInstance;

    fn construct(
        &mut self,
        surface: &Self::Surface,
        spec: &ChartSpec,
    ) -> Result<Self::Instance, RenderError>;
}

/// Owns at most one chart instance per surface.
pub struct ChartRenderer<B: ChartBackend> {
    backend: B,
    instances: HashMap<SurfaceId, B::Instance>,
}

impl<B: ChartBackend> ChartRenderer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            instances: HashMap::new(),
        }
    }

    /// Draws `spec` on the surface, destroying whatever was drawn there first.
    ///
    /// Returns whether a new instance is now bound. A missing surface or a
    /// backend failure is logged and leaves the surface empty.
    pub fn render(&mut self, id: SurfaceId, surface: Option<&B::Surface>, spec: &ChartSpec) -> bool {
        let Some(surface) = surface else {
            error!(surface = %id, "canvas not found, skipping {} chart", spec.title);
            return false;
        };

        if let Some(previous) = self.instances.remove(&id) {
            previous.destroy();
        }

        match self.backend.construct(surface, spec) {
            Ok(instance) => {
                debug!(surface = %id, slices = spec.slices.len(), "chart rendered");
                self.instances.insert(id, instance);
                true
            }
            Err(err) => {
                error!(surface = %id, title = %spec.title, %err, "error rendering chart");
                false
            }
        }
    }

    pub fn teardown(&mut self, id: SurfaceId) {
        if let Some(instance) = self.instances.remove(&id) {
            debug!(surface = %id, "chart destroyed");
            instance.destroy();
        }
    }

    pub fn teardown_all(&mut self) {
        for id in SurfaceId::ALL {
            self.teardown(id);
        }
    }

    pub fn instance(&self, id: SurfaceId) -> Option<&B::Instance> {
        self.instances.get(&id)
    }
}
