//! The simulation aggregate: owns the grid, ledger, vehicles, catalog and
//! clock, and orchestrates the per-frame pipeline.
//!
//! # Frame Pipeline
//!
//! Each `advance(elapsed_ms)` runs:
//! 1. **Bookkeeping** -- count the frame and accumulate elapsed time
//! 2. **Pre-frame** -- execute commands returned by reactive handlers
//! 3. **Movement** -- step every en-route vehicle once
//! 4. **Production** -- one ledger tick per whole production interval elapsed
//! 5. **Post-frame** -- deliver buffered events to subscribers
//!
//! Player commands (`place_facility`, `upgrade_facility`, `assign_vehicle`)
//! apply immediately and report success as a `bool`. Rejections are logged at
//! debug level and emitted as events; they are never errors.

use crate::catalog::FacilityCatalog;
use crate::clock::SimulationClock;
use crate::command::Command;
use crate::config::{ConfigError, SimConfig};
use crate::event::{
    Event, EventBus, EventFilter, EventKind, PassiveListener, ReactiveHandler, RejectReason,
    SubscriberPriority,
};
use crate::fixed::Frames;
use crate::grid::{Grid, GridPosition, PlaceError, UpgradeError};
use crate::hash::StateHasher;
use crate::id::VehicleId;
use crate::ledger::{LedgerError, ResourceLedger};
use crate::query::{self, CellSnapshot, ResourceSnapshot, VehicleSnapshot};
use crate::vehicle::{Arrival, VehiclePool};

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Lifecycle: `Init` until the first `advance`, `Running` until `quit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimPhase {
    Init,
    Running,
    Stopped,
}

/// Result of a [`Simulation::advance`] call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AdvanceResult {
    /// Production ticks fired this frame.
    pub production_ticks: u32,
    /// Waypoints reached this frame, in vehicle spawn order.
    pub arrivals: Vec<Arrival>,
}

pub struct Simulation {
    config: SimConfig,
    catalog: FacilityCatalog,
    grid: Grid,
    ledger: ResourceLedger,
    vehicles: VehiclePool,
    clock: SimulationClock,
    event_bus: EventBus,
    phase: SimPhase,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("phase", &self.phase)
            .field("frame", &self.clock.frame())
            .field("facilities", &self.grid.occupied_count())
            .field("vehicles", &self.vehicles.len())
            .field("ledger", &self.ledger.snapshot())
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Create a simulation from a validated config. Spawns
    /// `config.initial_vehicles` idle vehicles on the spawn cell.
    pub fn new(config: SimConfig, catalog: FacilityCatalog) -> Result<Self, SimError> {
        config.validate()?;

        let grid = Grid::new(config.grid_width, config.grid_height);
        let ledger = ResourceLedger::new(&catalog);
        let mut vehicles = VehiclePool::new();
        let spawn = config.vehicle_spawn.to_pixels(config.tile_size);
        for _ in 0..config.initial_vehicles {
            vehicles.spawn(spawn);
        }

        log::info!(
            "simulation created: {}x{} grid, {} facility kinds, {} vehicles",
            config.grid_width,
            config.grid_height,
            catalog.kind_count(),
            vehicles.len()
        );

        Ok(Self {
            clock: SimulationClock::new(config.production_interval_ms),
            event_bus: EventBus::new(config.event_capacity),
            config,
            catalog,
            grid,
            ledger,
            vehicles,
            phase: SimPhase::Init,
        })
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Place a facility of the named kind. Unknown kinds, occupied cells and
    /// cells outside the grid are rejected.
    pub fn place_facility(&mut self, kind_name: &str, pos: GridPosition) -> bool {
        let frame = self.frame();
        let reason = if self.phase == SimPhase::Stopped {
            RejectReason::Stopped
        } else if let Some((kind, def)) = self.catalog.kind_by_name(kind_name) {
            match self.grid.try_place(kind, def, pos) {
                Ok(facility) => {
                    log::info!("placed {kind_name} at ({}, {})", pos.x, pos.y);
                    self.event_bus.emit(Event::FacilityPlaced {
                        facility,
                        kind,
                        position: pos,
                        frame,
                    });
                    return true;
                }
                Err(PlaceError::OutOfBounds(_)) => RejectReason::OutOfBounds,
                Err(PlaceError::Occupied(_)) => RejectReason::Occupied,
            }
        } else {
            RejectReason::UnknownKind
        };

        log::debug!(
            "cannot place {kind_name} at ({}, {}): {reason:?}",
            pos.x,
            pos.y
        );
        self.event_bus.emit(Event::PlacementRejected {
            position: pos,
            reason,
            frame,
        });
        false
    }

    /// Upgrade the facility at `pos` by one level.
    pub fn upgrade_facility(&mut self, pos: GridPosition) -> bool {
        let frame = self.frame();
        let reason = if self.phase == SimPhase::Stopped {
            RejectReason::Stopped
        } else {
            let facility = self.grid.facility_at(pos).map(|(id, _)| id);
            match (facility, self.grid.try_upgrade(pos)) {
                (Some(facility), Ok(upgraded)) => {
                    let (level, capacity) = (upgraded.level, upgraded.capacity);
                    log::info!(
                        "upgraded facility at ({}, {}) to level {level}, capacity {capacity}",
                        pos.x,
                        pos.y
                    );
                    self.event_bus.emit(Event::FacilityUpgraded {
                        facility,
                        position: pos,
                        level,
                        capacity,
                        frame,
                    });
                    return true;
                }
                (_, Err(UpgradeError::OutOfBounds(_))) => RejectReason::OutOfBounds,
                _ => RejectReason::EmptyCell,
            }
        };

        log::debug!("cannot upgrade at ({}, {}): {reason:?}", pos.x, pos.y);
        self.event_bus.emit(Event::UpgradeRejected {
            position: pos,
            reason,
            frame,
        });
        false
    }

    /// Send the first idle vehicle along `[source, destination]`. Waypoints
    /// may lie off the grid, but not beyond `PIXEL_LIMIT` once scaled to
    /// pixels.
    pub fn assign_vehicle(&mut self, source: GridPosition, destination: GridPosition) -> bool {
        let frame = self.frame();
        let tile = self.config.tile_size;
        let reason = if self.phase == SimPhase::Stopped {
            RejectReason::Stopped
        } else if source.checked_to_pixels(tile).is_none()
            || destination.checked_to_pixels(tile).is_none()
        {
            RejectReason::UnreachableWaypoint
        } else if let Some(vehicle) = self.vehicles.try_assign(source, destination) {
            log::info!(
                "vehicle assigned: ({}, {}) -> ({}, {})",
                source.x,
                source.y,
                destination.x,
                destination.y
            );
            self.event_bus.emit(Event::VehicleAssigned {
                vehicle,
                source,
                destination,
                frame,
            });
            return true;
        } else {
            RejectReason::NoIdleVehicle
        };

        log::debug!("no vehicle assigned: {reason:?}");
        self.event_bus.emit(Event::AssignmentRejected {
            source,
            destination,
            reason,
            frame,
        });
        false
    }

    /// Single entry point for the input adapter.
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::PlaceFacility { kind, position } => self.place_facility(&kind, position),
            Command::UpgradeFacility { position } => self.upgrade_facility(position),
            Command::AssignVehicle {
                source,
                destination,
            } => self.assign_vehicle(source, destination),
        }
    }

    /// Add an idle vehicle at the top-left of `cell`. Returns `None` if the
    /// cell lies beyond `PIXEL_LIMIT`.
    pub fn spawn_vehicle(&mut self, cell: GridPosition) -> Option<VehicleId> {
        let position = cell.checked_to_pixels(self.config.tile_size)?;
        Some(self.vehicles.spawn(position))
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Run one frame of `elapsed_ms` simulated time. A no-op once stopped.
    pub fn advance(&mut self, elapsed_ms: u64) -> Result<AdvanceResult, SimError> {
        match self.phase {
            SimPhase::Stopped => return Ok(AdvanceResult::default()),
            SimPhase::Init => {
                log::info!("simulation running");
                self.phase = SimPhase::Running;
            }
            SimPhase::Running => {}
        }

        // Phase 1: Bookkeeping.
        let due = self.clock.advance(elapsed_ms);

        // Phase 2: Pre-frame.
        for command in self.event_bus.drain_commands() {
            self.execute(command);
        }

        // Phase 3: Movement.
        let arrivals = self.phase_movement();

        // Phase 4: Production.
        for _ in 0..due {
            self.phase_production()?;
        }

        // Phase 5: Post-frame.
        self.event_bus.deliver();

        Ok(AdvanceResult {
            production_ticks: due,
            arrivals,
        })
    }

    fn phase_movement(&mut self) -> Vec<Arrival> {
        let frame = self.frame();
        let arrivals = self
            .vehicles
            .step(self.config.tile_size, self.config.vehicle_speed);
        for arrival in &arrivals {
            log::trace!(
                "vehicle reached ({}, {}){}",
                arrival.waypoint.x,
                arrival.waypoint.y,
                if arrival.finished { ", now idle" } else { "" }
            );
            self.event_bus.emit(Event::WaypointReached {
                vehicle: arrival.vehicle,
                waypoint: arrival.waypoint,
                frame,
            });
            if arrival.finished {
                self.event_bus.emit(Event::VehicleIdle {
                    vehicle: arrival.vehicle,
                    frame,
                });
            }
        }
        arrivals
    }

    fn phase_production(&mut self) -> Result<(), SimError> {
        let frame = self.frame();
        let report = self.ledger.tick(&self.grid, &self.catalog)?;
        log::trace!("production tick credited {} units", report.total());
        for (resource, quantity) in report.credited {
            self.event_bus.emit(Event::ResourceProduced {
                resource,
                quantity,
                frame,
            });
        }
        Ok(())
    }

    /// Stop the simulation and deliver any pending events. Commands fail and
    /// `advance` does nothing afterwards.
    pub fn quit(&mut self) {
        if self.phase == SimPhase::Stopped {
            return;
        }
        self.phase = SimPhase::Stopped;
        self.event_bus.deliver();
        log::info!(
            "simulation stopped after {} frames ({} ms)",
            self.clock.frame(),
            self.clock.elapsed_ms()
        );
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn catalog(&self) -> &FacilityCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn vehicles(&self) -> &VehiclePool {
        &self.vehicles
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase != SimPhase::Stopped
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> Frames {
        self.clock.frame()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    // -----------------------------------------------------------------------
    // Event system
    // -----------------------------------------------------------------------

    /// Suppressed events are never buffered or delivered.
    pub fn suppress_event(&mut self, kind: EventKind) {
        self.event_bus.suppress(kind);
    }

    pub fn on_passive(&mut self, kind: EventKind, listener: PassiveListener) {
        self.event_bus.on_passive(kind, listener);
    }

    pub fn on_passive_filtered(
        &mut self,
        kind: EventKind,
        priority: SubscriberPriority,
        filter: Option<EventFilter>,
        listener: PassiveListener,
    ) {
        self.event_bus
            .on_passive_filtered(kind, priority, filter, listener);
    }

    /// Commands returned by `handler` run at the start of the next frame.
    pub fn on_reactive(&mut self, kind: EventKind, handler: ReactiveHandler) {
        self.event_bus.on_reactive(kind, handler);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn snapshot_cells(&self) -> Vec<CellSnapshot> {
        query::cells(&self.grid, &self.catalog)
    }

    pub fn snapshot_vehicles(&self) -> Vec<VehicleSnapshot> {
        query::vehicles(&self.vehicles)
    }

    pub fn snapshot_ledger(&self) -> Vec<ResourceSnapshot> {
        query::resources(&self.ledger, &self.catalog)
    }

    pub fn status_line(&self) -> String {
        query::status_line(&self.snapshot_ledger())
    }

    /// Fingerprint of the grid, vehicles, ledger and clock.
    pub fn state_hash(&self) -> u64 {
        StateHasher::new()
            .grid(&self.grid)
            .vehicles(&self.vehicles)
            .ledger(&self.ledger)
            .clock(&self.clock)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Fixed64;
    use crate::grid::PixelPosition;
    use crate::test_utils::{classic_sim, pos, run_for_ms, sim_with};
    use crate::vehicle::VehicleState;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn record(sim: &mut Simulation, kind: EventKind) -> Rc<RefCell<Vec<Event>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        sim.on_passive(kind, Box::new(move |e| sink.borrow_mut().push(e.clone())));
        log
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn new_spawns_initial_vehicles_on_spawn_cell() {
        let sim = sim_with(
            SimConfig::default()
                .with_initial_vehicles(2)
                .with_vehicle_spawn(pos(1, 2)),
        );
        assert_eq!(sim.vehicles().len(), 2);
        for (_, v) in sim.vehicles().iter() {
            assert_eq!(v.position(), PixelPosition::from_int(32, 64));
            assert!(v.is_idle());
        }
        assert_eq!(sim.phase(), SimPhase::Init);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let result = Simulation::new(
            SimConfig::default().with_tile_size(0),
            FacilityCatalog::classic(),
        );
        assert!(matches!(
            result,
            Err(SimError::Config(ConfigError::ZeroTileSize))
        ));
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    #[test]
    fn place_then_reject_on_occupied() {
        let mut sim = classic_sim();
        assert!(sim.place_facility("factory", pos(3, 3)));
        assert!(!sim.place_facility("depot", pos(3, 3)));
        let factory = sim.catalog().kind_id("factory");
        assert_eq!(sim.grid().kind_at(pos(3, 3)), factory);
    }

    #[test]
    fn unknown_kind_is_rejected_placement() {
        let mut sim = classic_sim();
        let rejected = record(&mut sim, EventKind::PlacementRejected);

        assert!(!sim.place_facility("castle", pos(0, 0)));
        sim.advance(16).unwrap();

        assert!(matches!(
            rejected.borrow()[0],
            Event::PlacementRejected {
                reason: RejectReason::UnknownKind,
                ..
            }
        ));
        assert_eq!(sim.grid().occupied_count(), 0);
    }

    #[test]
    fn out_of_bounds_commands_report_failure() {
        let mut sim = classic_sim();
        assert!(!sim.place_facility("factory", pos(25, 0)));
        assert!(!sim.place_facility("factory", pos(-1, -1)));
        assert!(!sim.upgrade_facility(pos(0, 18)));
        assert!(!sim.upgrade_facility(pos(3, 3)));
    }

    #[test]
    fn upgrade_emits_new_level_and_capacity() {
        let mut sim = classic_sim();
        let upgraded = record(&mut sim, EventKind::FacilityUpgraded);
        sim.place_facility("warehouse", pos(1, 1));

        assert!(sim.upgrade_facility(pos(1, 1)));
        sim.advance(16).unwrap();

        let events = upgraded.borrow();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            Event::FacilityUpgraded {
                level: 2,
                capacity: 60,
                ..
            }
        ));
    }

    #[test]
    fn far_waypoints_are_rejected_without_panicking() {
        let mut sim = classic_sim();
        let rejected = record(&mut sim, EventKind::AssignmentRejected);

        assert!(!sim.assign_vehicle(pos(100_000_000, 0), pos(0, 0)));
        assert!(!sim.assign_vehicle(pos(0, 0), pos(0, i32::MIN)));
        sim.advance(16).unwrap();

        assert_eq!(sim.vehicles().idle_count(), 1);
        let rejected = rejected.borrow();
        assert_eq!(rejected.len(), 2);
        assert!(rejected.iter().all(|e| matches!(
            e,
            Event::AssignmentRejected {
                reason: RejectReason::UnreachableWaypoint,
                ..
            }
        )));
    }

    #[test]
    fn off_grid_waypoints_within_limit_are_driven_to() {
        let mut sim = sim_with(SimConfig::default().with_vehicle_speed(Fixed64::from_num(64)));
        assert!(sim.assign_vehicle(pos(-10, 3), pos(40, -2)));
        for _ in 0..200 {
            sim.advance(16).unwrap();
        }
        let v = &sim.snapshot_vehicles()[0];
        assert_eq!(v.position, PixelPosition::from_int(40 * 32, -2 * 32));
        assert_eq!(v.state, VehicleState::Idle);
    }

    #[test]
    fn spawn_vehicle_beyond_limit_is_refused() {
        let mut sim = classic_sim();
        assert!(sim.spawn_vehicle(pos(3, 3)).is_some());
        assert!(sim.spawn_vehicle(pos(i32::MAX, 0)).is_none());
        assert_eq!(sim.vehicles().len(), 2);
    }

    #[test]
    fn new_rejects_tile_size_that_overflows_pixels() {
        let result = Simulation::new(
            SimConfig::default()
                .with_tile_size(1 << 30)
                .with_vehicle_spawn(pos(3, 3)),
            FacilityCatalog::classic(),
        );
        assert!(matches!(
            result,
            Err(SimError::Config(ConfigError::PixelExtentTooLarge { .. }))
        ));
    }

    #[test]
    fn execute_dispatches_commands() {
        let mut sim = classic_sim();
        assert!(sim.execute(Command::place("depot", pos(2, 2))));
        assert!(sim.execute(Command::upgrade(pos(2, 2))));
        assert!(sim.execute(Command::assign(pos(0, 0), pos(2, 2))));
        assert!(!sim.execute(Command::assign(pos(0, 0), pos(2, 2))));
    }

    // -----------------------------------------------------------------------
    // Production timing
    // -----------------------------------------------------------------------

    #[test]
    fn no_production_before_one_second() {
        let mut sim = classic_sim();
        sim.place_facility("factory", pos(0, 0));
        run_for_ms(&mut sim, 999);
        assert_eq!(sim.ledger().quantity("wood"), Ok(0));
    }

    #[test]
    fn one_wood_per_second_per_factory() {
        let mut sim = classic_sim();
        sim.place_facility("factory", pos(0, 0));
        run_for_ms(&mut sim, 1000);
        assert_eq!(sim.ledger().quantity("wood"), Ok(1));
        run_for_ms(&mut sim, 2000);
        assert_eq!(sim.ledger().quantity("wood"), Ok(3));
    }

    #[test]
    fn advance_reports_ticks_fired() {
        let mut sim = classic_sim();
        sim.place_facility("factory", pos(0, 0));
        let result = sim.advance(2500).unwrap();
        assert_eq!(result.production_ticks, 2);
        assert_eq!(sim.ledger().quantity("wood"), Ok(2));
        assert_eq!(sim.clock().accumulated_ms(), 500);
    }

    // -----------------------------------------------------------------------
    // Vehicles
    // -----------------------------------------------------------------------

    #[test]
    fn vehicle_completes_route_and_emits_events() {
        let mut sim = classic_sim();
        let reached = record(&mut sim, EventKind::WaypointReached);
        let idle = record(&mut sim, EventKind::VehicleIdle);

        assert!(sim.assign_vehicle(pos(1, 0), pos(1, 1)));
        for _ in 0..100 {
            sim.advance(16).unwrap();
        }

        let snap = &sim.snapshot_vehicles()[0];
        assert_eq!(snap.position, PixelPosition::from_int(32, 32));
        assert_eq!(snap.state, VehicleState::Idle);
        assert_eq!(reached.borrow().len(), 2);
        assert_eq!(idle.borrow().len(), 1);
    }

    #[test]
    fn reactive_handler_redispatches_idle_vehicle() {
        let mut sim = classic_sim();
        sim.on_reactive(
            EventKind::VehicleIdle,
            Box::new(|_| vec![Command::assign(pos(0, 0), pos(0, 0))]),
        );
        sim.assign_vehicle(pos(0, 0), pos(0, 0));

        // Two arrival frames, then the standing order fires next frame.
        sim.advance(16).unwrap();
        sim.advance(16).unwrap();
        assert!(sim.vehicles().iter().all(|(_, v)| v.is_idle()));
        sim.advance(16).unwrap();
        assert_eq!(sim.vehicles().idle_count(), 0);
    }

    #[test]
    fn slower_vehicles_take_longer() {
        let mut fast = classic_sim();
        let mut slow = sim_with(SimConfig::default().with_vehicle_speed(Fixed64::from_num(1)));
        fast.assign_vehicle(pos(2, 0), pos(2, 0));
        slow.assign_vehicle(pos(2, 0), pos(2, 0));

        for _ in 0..40 {
            fast.advance(16).unwrap();
            slow.advance(16).unwrap();
        }
        assert_eq!(fast.vehicles().idle_count(), 1);
        assert_eq!(slow.vehicles().idle_count(), 0);
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    #[test]
    fn first_advance_enters_running() {
        let mut sim = classic_sim();
        sim.advance(0).unwrap();
        assert_eq!(sim.phase(), SimPhase::Running);
        assert_eq!(sim.frame(), 1);
    }

    #[test]
    fn quit_delivers_pending_and_freezes() {
        let mut sim = classic_sim();
        let placed = record(&mut sim, EventKind::FacilityPlaced);
        sim.place_facility("factory", pos(0, 0));

        sim.quit();
        assert_eq!(placed.borrow().len(), 1);
        assert_eq!(sim.phase(), SimPhase::Stopped);

        let hash = sim.state_hash();
        assert_eq!(sim.advance(5000).unwrap(), AdvanceResult::default());
        assert!(!sim.place_facility("depot", pos(1, 1)));
        assert!(!sim.upgrade_facility(pos(0, 0)));
        assert!(!sim.assign_vehicle(pos(0, 0), pos(1, 1)));
        assert_eq!(sim.state_hash(), hash);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[test]
    fn status_line_tracks_ledger() {
        let mut sim = classic_sim();
        sim.place_facility("factory", pos(0, 0));
        run_for_ms(&mut sim, 3000);
        assert_eq!(sim.status_line(), "Wood: 3  |  Metal: 0  |  Fuel: 0");
    }

    #[test]
    fn state_hash_tracks_changes() {
        let mut a = classic_sim();
        let mut b = classic_sim();
        assert_eq!(a.state_hash(), b.state_hash());

        a.place_facility("depot", pos(4, 4));
        assert_ne!(a.state_hash(), b.state_hash());
        b.place_facility("depot", pos(4, 4));
        assert_eq!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn snapshot_cells_lists_placements() {
        let mut sim = classic_sim();
        sim.place_facility("warehouse", pos(5, 0));
        sim.place_facility("factory", pos(0, 1));
        let names: Vec<String> = sim
            .snapshot_cells()
            .into_iter()
            .map(|c| c.kind_name)
            .collect();
        assert_eq!(names, ["warehouse", "factory"]);
    }
}
