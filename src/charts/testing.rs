//! Test doubles for the chart backend.

use std::cell::RefCell;
use std::rc::Rc;

use super::renderer::{ChartBackend, ChartInstance, RenderError};
use super::spec::ChartSpec;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    Constructed { id: usize, title: String },
    Destroyed { id: usize },
}

#[derive(Debug, Default)]
struct Journal {
    events: Vec<DrawEvent>,
    next_id: usize,
    live: usize,
    fail_on: Option<String>,
    specs: Vec<ChartSpec>,
}

/// Records every construct and destroy call; clones share one journal.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    journal: Rc<RefCell<Journal>>,
}

impl RecordingBackend {
    pub fn failing_on(title: &str) -> Self {
        let backend = Self::default();
        backend.fail_on(title);
        backend
    }

    pub fn fail_on(&self, title: &str) {
        self.journal.borrow_mut().fail_on = Some(title.to_owned());
    }

    pub fn events(&self) -> Vec<DrawEvent> {
        self.journal.borrow().events.clone()
    }

    pub fn live(&self) -> usize {
        self.journal.borrow().live
    }

    pub fn specs(&self) -> Vec<ChartSpec> {
        self.journal.borrow().specs.clone()
    }
}

#[derive(Debug)]
pub struct RecordedChart {
    pub id: usize,
    journal: Rc<RefCell<Journal>>,
}

impl ChartInstance for RecordedChart {
    fn destroy(self) {
        let mut journal = self.journal.borrow_mut();
        journal.live -= 1;
        journal.events.push(DrawEvent::Destroyed { id: self.id });
    }
}

impl ChartBackend for RecordingBackend {
    type Surface = ();
    type Instance = RecordedChart;

    fn construct(&mut self, _surface: &(), spec: &ChartSpec) -> Result<RecordedChart, RenderError> {
        let mut journal = self.journal.borrow_mut();
        if journal.fail_on.as_deref() == Some(spec.title.as_str()) {
            return Err(RenderError::Backend(format!("refusing to draw {}", spec.title)));
        }

        let id = journal.next_id;
        journal.next_id += 1;
        journal.live += 1;
        journal.specs.push(spec.clone());
        journal.events.push(DrawEvent::Constructed {
            id,
            title: spec.title.clone(),
        });

        Ok(RecordedChart {
            id,
            journal: Rc::clone(&self.journal),
        })
    }
}
