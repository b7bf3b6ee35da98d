use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use super::cache::ReportCache;
use super::model::{
    CachedSnapshot, DepartmentRef, EmployeeRef, ReportContext, ReportPayload, ReportType, StatMap,
};

/// Snapshots at least this old (24 hours) are never shown.
pub const MAX_CACHE_AGE_MS: i64 = 86_400_000;

pub fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

/// In-memory view of the report while the widget is mounted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportState {
    current_report_type: ReportType,
    report_data: ReportPayload,
    date_from: String,
    date_to: String,
    departments: Vec<DepartmentRef>,
    is_data_loaded: bool,
    is_from_cache: bool,
}

impl ReportState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts the live context when it carries report data, otherwise falls
    /// back to the cache. Live data is written through to the cache.
    ///
    /// Passing no cache turns both the write-through and the fallback off.
    pub fn initialize(
        &mut self,
        context: Option<&ReportContext>,
        cache: Option<&mut ReportCache>,
        now_ms: i64,
    ) {
        let live = context.and_then(|context| context.live_payload().map(|data| (context, data)));

        match (live, cache) {
            (Some((context, data)), cache) => {
                self.report_data = data.clone();
                self.date_from = context.date_from.clone();
                self.date_to = context.date_to.clone();
                self.departments = context.departments.clone();
                self.is_data_loaded = true;
                self.is_from_cache = false;
                debug!(has_data = self.has_data(), "report data taken from context");

                if let Some(cache) = cache {
                    cache.put(&self.snapshot(now_ms));
                }
            }
            (None, Some(cache)) => {
                info!("no context data, attempting to load report from cache");
                self.load_from_cache(cache, now_ms);
            }
            (None, None) => {
                self.is_data_loaded = false;
            }
        }
    }

    pub fn load_from_cache(&mut self, cache: &mut ReportCache, now_ms: i64) {
        let Some(snapshot) = cache.get() else {
            self.is_data_loaded = false;
            return;
        };

        let age = now_ms.saturating_sub(snapshot.timestamp);
        if age < MAX_CACHE_AGE_MS {
            debug!(age_ms = age, "report data taken from cache");
            self.report_data = snapshot.report_data;
            self.date_from = snapshot.date_from;
            self.date_to = snapshot.date_to;
            self.departments = snapshot.departments;
            self.is_data_loaded = true;
            self.is_from_cache = true;
        } else {
            info!(age_ms = age, "cached report expired, removing it");
            cache.delete();
            self.is_data_loaded = false;
        }
    }

    pub fn switch_report_type(&mut self, report_type: ReportType) {
        self.current_report_type = report_type;
    }

    fn snapshot(&self, now_ms: i64) -> CachedSnapshot {
        CachedSnapshot {
            report_data: self.report_data.clone(),
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            departments: self.departments.clone(),
            timestamp: now_ms,
        }
    }

    pub fn current_report_type(&self) -> ReportType {
        self.current_report_type
    }

    pub fn report_data(&self) -> &ReportPayload {
        &self.report_data
    }

    pub fn date_from(&self) -> &str {
        &self.date_from
    }

    pub fn date_to(&self) -> &str {
        &self.date_to
    }

    pub fn departments(&self) -> &[DepartmentRef] {
        &self.departments
    }

    pub fn is_data_loaded(&self) -> bool {
        self.is_data_loaded
    }

    pub fn is_from_cache(&self) -> bool {
        self.is_from_cache
    }

    pub fn onboarding_stats(&self) -> &StatMap {
        self.report_data.onboarding_stats()
    }

    pub fn offboarding_stats(&self) -> &StatMap {
        self.report_data.offboarding_stats()
    }

    pub fn onboarding_employees(&self) -> &[EmployeeRef] {
        self.report_data.onboarding_employees()
    }

    pub fn offboarding_employees(&self) -> &[EmployeeRef] {
        self.report_data.offboarding_employees()
    }

    pub fn current_employee_data(&self) -> &[EmployeeRef] {
        match self.current_report_type {
            ReportType::Onboarding => self.onboarding_employees(),
            ReportType::Offboarding => self.offboarding_employees(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.report_data.has_data()
    }
}
