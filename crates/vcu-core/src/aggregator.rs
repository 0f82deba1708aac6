//! Drain loop and liveness tick

use crate::config::VcuConfig;
use crate::error::VcuError;
use decoders::{register_defaults, Route};
use dispatch_table::DispatchTable;
use liveness::LivenessMonitor;
use metrics::counter;
use serde::Serialize;
use tracing::{debug, info, warn};
use transport_queue::Queue;
use vcu_protocol::Record;
use vehicle_state::{Stage, StateStore};

/// Handler for records whose identifier has no route
pub type UnroutedHandler = Box<dyn FnMut(&Record) + Send>;

/// Outcome of one `process_pending` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrainReport {
    /// Records decoded into the store
    pub decoded: usize,
    /// Records with no route
    pub unrouted: usize,
    /// Records whose payload did not fit the layout
    pub malformed: usize,
}

impl DrainReport {
    /// Records popped from the queue
    pub fn total(&self) -> usize {
        self.decoded + self.unrouted + self.malformed
    }
}

/// Running totals since creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregatorStats {
    pub decoded: u64,
    pub unrouted: u64,
    pub malformed: u64,
    pub stage_transitions: u64,
}

/// Owns the routes, the state store and the liveness monitor.
///
/// Every store mutation goes through `&mut self` on the main loop; the
/// interrupt side only ever sees the queue.
pub struct Aggregator {
    routes: DispatchTable<Route>,
    store: StateStore,
    monitor: LivenessMonitor,
    unrouted: Option<UnroutedHandler>,
    stats: AggregatorStats,
}

impl Aggregator {
    /// Build an aggregator with every default route registered.
    ///
    /// Any error here is a configuration fault; startup should abort.
    pub fn new(config: &VcuConfig) -> Result<Self, VcuError> {
        config.validate()?;

        let mut routes = DispatchTable::new(config.dispatch_capacity)?;
        register_defaults(&mut routes)?;
        let monitor = LivenessMonitor::new(config.liveness.clone())?;

        info!(
            routes = routes.len(),
            dispatch_capacity = routes.capacity(),
            "aggregator ready"
        );

        Ok(Self {
            routes,
            store: StateStore::new(),
            monitor,
            unrouted: None,
            stats: AggregatorStats::default(),
        })
    }

    /// Route an extra identifier. Startup only.
    pub fn register(&mut self, id: u16, route: Route) -> Result<(), VcuError> {
        self.routes.insert(u32::from(id), route)?;
        Ok(())
    }

    /// Install the handler called for identifiers without a route
    pub fn set_unrouted_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&Record) + Send + 'static,
    {
        self.unrouted = Some(Box::new(handler));
    }

    /// Pop and decode queued records until the queue is empty.
    ///
    /// At most `queue.capacity()` records are handled per call so a
    /// producer that keeps pushing cannot hold the main loop.
    pub fn process_pending(&mut self, queue: &Queue<Record>) -> DrainReport {
        let mut report = DrainReport::default();

        for _ in 0..queue.capacity() {
            let Ok(record) = queue.pop() else {
                break;
            };
            self.dispatch(&record, &mut report);
        }

        if report.total() > 0 {
            self.stats.decoded += report.decoded as u64;
            self.stats.unrouted += report.unrouted as u64;
            self.stats.malformed += report.malformed as u64;

            counter!("vcu_records_decoded_total").increment(report.decoded as u64);
            counter!("vcu_records_unrouted_total").increment(report.unrouted as u64);
            counter!("vcu_records_malformed_total").increment(report.malformed as u64);
        }
        report
    }

    fn dispatch(&mut self, record: &Record, report: &mut DrainReport) {
        match self.routes.lookup(u32::from(record.id)) {
            Some(route) => match route.decode(record, &mut self.store) {
                Ok(()) => {
                    report.decoded += 1;
                    self.store.vehicle.comm_counter = self.store.vehicle.comm_counter.wrapping_add(1);
                }
                Err(err) => {
                    report.malformed += 1;
                    debug!(decoder = route.name(), error = %err, "malformed record");
                }
            },
            None => {
                report.unrouted += 1;
                match self.unrouted.as_mut() {
                    Some(handler) => handler(record),
                    None => debug!(id = record.id, len = record.len, "unrouted record"),
                }
            }
        }
    }

    /// Run the liveness sweep at `now_ms` and return the resulting stage
    pub fn tick(&mut self, now_ms: u32) -> Stage {
        let before = self.store.stage();
        let stage = self.monitor.sweep(&mut self.store, now_ms);
        if stage != before {
            self.stats.stage_transitions += 1;
            counter!("vcu_stage_transitions_total", "to" => stage.name()).increment(1);
        }
        stage
    }

    /// Record a bus error code reported by the peripheral layer; zero clears it
    pub fn report_bus_error(&mut self, code: u16) {
        if code != 0 && self.store.vehicle.errors.bus != code {
            warn!(code, "bus error reported");
        }
        self.store.vehicle.errors.bus = code;
    }

    /// Leave a sticky error stage and re-confirm every node
    pub fn reset_stage(&mut self) {
        self.monitor.reset(&mut self.store);
    }

    /// Zero the whole store, latched fields included, and restart liveness
    pub fn reset_store(&mut self) {
        self.store.reset();
        self.monitor.reset(&mut self.store);
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> StateStore {
        self.store
    }

    pub fn stage(&self) -> Stage {
        self.store.stage()
    }

    pub fn stats(&self) -> AggregatorStats {
        self.stats
    }

    /// Routing table, for diagnostics
    pub fn routes(&self) -> &DispatchTable<Route> {
        &self.routes
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("routes", &self.routes.len())
            .field("stage", &self.store.stage())
            .field("stats", &self.stats)
            .finish()
    }
}
