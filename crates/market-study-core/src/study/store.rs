use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use super::agent::AnalysisReport;
use crate::error::MarketStudyError;
use crate::MarketStudyResult;

/// Where finished reports are kept between the study run and follow-up
/// conversations.
pub trait ReportStore: Send + Sync {
    fn get(&self, id: &Uuid) -> MarketStudyResult<Option<AnalysisReport>>;

    /// Insert or replace the report under its own id.
    fn put(&self, report: AnalysisReport) -> MarketStudyResult<()>;

    fn remove(&self, id: &Uuid) -> MarketStudyResult<Option<AnalysisReport>>;

    fn clear(&self) -> MarketStudyResult<()>;

    fn len(&self) -> MarketStudyResult<usize>;

    fn is_empty(&self) -> MarketStudyResult<bool> {
        Ok(self.len()? == 0)
    }
}

pub const DEFAULT_STORE_CAPACITY: usize = 256;

#[derive(Debug, Default)]
struct Slots {
    reports: HashMap<Uuid, AnalysisReport>,
    /// Insertion order, oldest first
    order: VecDeque<Uuid>,
}

/// Process-local store bounded to `capacity` reports; the oldest report is
/// evicted first.
#[derive(Debug)]
pub struct InMemoryReportStore {
    capacity: usize,
    slots: Mutex<Slots>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            slots: Mutex::new(Slots::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MarketStudyResult<MutexGuard<'_, Slots>> {
        self.slots
            .lock()
            .map_err(|_| MarketStudyError::Store("report store lock poisoned".into()))
    }
}

impl Default for InMemoryReportStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportStore for InMemoryReportStore {
    fn get(&self, id: &Uuid) -> MarketStudyResult<Option<AnalysisReport>> {
        Ok(self.lock()?.reports.get(id).cloned())
    }

    fn put(&self, report: AnalysisReport) -> MarketStudyResult<()> {
        let mut slots = self.lock()?;
        let id = report.id;
        if slots.reports.insert(id, report).is_some() {
            return Ok(());
        }
        slots.order.push_back(id);
        while slots.order.len() > self.capacity {
            if let Some(oldest) = slots.order.pop_front() {
                slots.reports.remove(&oldest);
                tracing::debug!(report_id = %oldest, "evicted report from store");
            }
        }
        Ok(())
    }

    fn remove(&self, id: &Uuid) -> MarketStudyResult<Option<AnalysisReport>> {
        let mut slots = self.lock()?;
        let removed = slots.reports.remove(id);
        if removed.is_some() {
            slots.order.retain(|k| k != id);
        }
        Ok(removed)
    }

    fn clear(&self) -> MarketStudyResult<()> {
        let mut slots = self.lock()?;
        slots.reports.clear();
        slots.order.clear();
        Ok(())
    }

    fn len(&self) -> MarketStudyResult<usize> {
        Ok(self.lock()?.reports.len())
    }
}
