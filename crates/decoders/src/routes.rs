//! Default route registration

use crate::decoder::Route;
use crate::inverter::{
    InverterActual1Decoder, InverterActual2Decoder, InverterActual3Decoder,
    InverterSetpointDecoder,
};
use crate::vehicle::{DashboardDecoder, PedalDecoder, SubControllerDecoder};
use dispatch_table::{DispatchError, DispatchTable};
use std::sync::Arc;
use tracing::info;
use vcu_protocol::ids;
use vehicle_state::INVERTER_COUNT;

const ROUTES_PER_INVERTER: usize = 4;

/// Number of identifiers `register_defaults` routes
pub const fn default_route_count() -> usize {
    3 + INVERTER_COUNT * ROUTES_PER_INVERTER
}

fn inverter_routes(index: usize) -> Option<[(u16, Route); ROUTES_PER_INVERTER]> {
    Some([
        (
            ids::inverter_actual_1(index),
            Arc::new(InverterActual1Decoder::new(index)?) as Route,
        ),
        (
            ids::inverter_actual_2(index),
            Arc::new(InverterActual2Decoder::new(index)?) as Route,
        ),
        (
            ids::inverter_actual_3(index),
            Arc::new(InverterActual3Decoder::new(index)?) as Route,
        ),
        (
            ids::inverter_setpoints(index),
            Arc::new(InverterSetpointDecoder::new(index)?) as Route,
        ),
    ])
}

/// Route every known vehicle message to its decoder.
///
/// Called once at startup; any error means the table is too small or a
/// route was registered twice, and startup should abort.
pub fn register_defaults(table: &mut DispatchTable<Route>) -> Result<(), DispatchError> {
    let vehicle: [(u16, Route); 3] = [
        (ids::PEDAL, Arc::new(PedalDecoder)),
        (ids::SUB_CONTROLLER, Arc::new(SubControllerDecoder)),
        (ids::DASHBOARD, Arc::new(DashboardDecoder)),
    ];

    let inverters = (0..INVERTER_COUNT).filter_map(inverter_routes).flatten();
    for (id, route) in vehicle.into_iter().chain(inverters) {
        table.insert(u32::from(id), route)?;
    }

    info!(
        routes = table.len(),
        capacity = table.capacity(),
        "default routes registered"
    );
    Ok(())
}
