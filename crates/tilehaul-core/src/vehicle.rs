//! Vehicles and their routing state machine.
//!
//! A vehicle is `Idle` (no task, empty route) or `EnRoute` (a task and at
//! least one waypoint left). Movement is axis-priority: a vehicle closes the
//! x gap first, then the y gap, one speed unit per frame, so the path between
//! consecutive waypoints is L-shaped rather than diagonal.

use crate::fixed::{Fixed64, step_toward};
use crate::grid::{GridPosition, PixelPosition};
use crate::id::VehicleId;
use slotmap::SlotMap;
use std::collections::VecDeque;

/// The job a vehicle is carrying out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Task {
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleState {
    Idle,
    EnRoute,
}

/// A vehicle in pixel space. `task.is_some() == !route.is_empty()` holds
/// after every public operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    position: PixelPosition,
    route: VecDeque<GridPosition>,
    task: Option<Task>,
}

impl Vehicle {
    pub fn new(position: PixelPosition) -> Self {
        Self {
            position,
            route: VecDeque::new(),
            task: None,
        }
    }

    pub fn position(&self) -> PixelPosition {
        self.position
    }

    pub fn route(&self) -> &VecDeque<GridPosition> {
        &self.route
    }

    pub fn task(&self) -> Option<Task> {
        self.task
    }

    pub fn state(&self) -> VehicleState {
        if self.task.is_some() {
            VehicleState::EnRoute
        } else {
            VehicleState::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state() == VehicleState::Idle
    }

    fn start(&mut self, task: Task, waypoints: impl IntoIterator<Item = GridPosition>) {
        self.route.extend(waypoints);
        if !self.route.is_empty() {
            self.task = Some(task);
        }
    }

    /// Advance one frame. Returns the waypoint reached this frame, if any.
    fn step(&mut self, tile_size: u32, speed: Fixed64) -> Option<GridPosition> {
        let waypoint = *self.route.front()?;
        let target = waypoint.to_pixels(tile_size);
        let dx = target.x.saturating_sub(self.position.x);
        let dy = target.y.saturating_sub(self.position.y);

        if dx.saturating_abs() > speed {
            self.position.x = step_toward(self.position.x, target.x, speed);
            None
        } else if dy.saturating_abs() > speed {
            self.position.y = step_toward(self.position.y, target.y, speed);
            None
        } else {
            // Within one speed unit on both axes: snap and pop.
            self.position = target;
            self.route.pop_front();
            if self.route.is_empty() {
                self.task = None;
            }
            Some(waypoint)
        }
    }
}

/// A waypoint reached during [`VehiclePool::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub vehicle: VehicleId,
    pub waypoint: GridPosition,
    /// True when this was the last waypoint and the vehicle is now idle.
    pub finished: bool,
}

/// All vehicles, iterated in spawn order.
#[derive(Debug, Clone, Default)]
pub struct VehiclePool {
    vehicles: SlotMap<VehicleId, Vehicle>,
}

impl VehiclePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an idle vehicle at `position`.
    pub fn spawn(&mut self, position: PixelPosition) -> VehicleId {
        self.vehicles.insert(Vehicle::new(position))
    }

    /// Give the first idle vehicle the route `[source, destination]`.
    /// Busy vehicles are never touched.
    pub fn try_assign(&mut self, source: GridPosition, destination: GridPosition) -> Option<VehicleId> {
        let (id, vehicle) = self.vehicles.iter_mut().find(|(_, v)| v.is_idle())?;
        vehicle.start(Task::Transport, [source, destination]);
        Some(id)
    }

    pub fn assign(&mut self, source: GridPosition, destination: GridPosition) -> bool {
        self.try_assign(source, destination).is_some()
    }

    /// Move every en-route vehicle by one frame.
    pub fn step(&mut self, tile_size: u32, speed: Fixed64) -> Vec<Arrival> {
        let mut arrivals = Vec::new();
        for (id, vehicle) in self.vehicles.iter_mut() {
            if let Some(waypoint) = vehicle.step(tile_size, speed) {
                arrivals.push(Arrival {
                    vehicle: id,
                    waypoint,
                    finished: vehicle.is_idle(),
                });
            }
        }
        arrivals
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VehicleId, &Vehicle)> {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn idle_count(&self) -> usize {
        self.vehicles.values().filter(|v| v.is_idle()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: u32 = 32;

    fn speed() -> Fixed64 {
        Fixed64::from_num(2)
    }

    fn pos(x: i32, y: i32) -> GridPosition {
        GridPosition::new(x, y)
    }

    fn assert_invariant(pool: &VehiclePool) {
        for (_, v) in pool.iter() {
            assert_eq!(v.task().is_some(), !v.route().is_empty());
        }
    }

    // -----------------------------------------------------------------------
    // Assignment
    // -----------------------------------------------------------------------

    #[test]
    fn assign_picks_first_idle_vehicle() {
        let mut pool = VehiclePool::new();
        let a = pool.spawn(PixelPosition::default());
        let b = pool.spawn(PixelPosition::default());

        assert_eq!(pool.try_assign(pos(1, 0), pos(2, 0)), Some(a));
        assert_eq!(pool.try_assign(pos(3, 0), pos(4, 0)), Some(b));

        let va = pool.get(a).unwrap();
        assert_eq!(va.state(), VehicleState::EnRoute);
        assert_eq!(va.task(), Some(Task::Transport));
        assert_eq!(va.route().iter().copied().collect::<Vec<_>>(), [pos(1, 0), pos(2, 0)]);
        assert_invariant(&pool);
    }

    #[test]
    fn assign_fails_when_all_busy() {
        let mut pool = VehiclePool::new();
        let a = pool.spawn(PixelPosition::default());
        pool.assign(pos(1, 1), pos(2, 2));
        let before = pool.get(a).unwrap().clone();

        assert!(!pool.assign(pos(5, 5), pos(6, 6)));
        assert_eq!(pool.get(a).unwrap(), &before);
    }

    #[test]
    fn assign_on_empty_pool_fails() {
        let mut pool = VehiclePool::new();
        assert!(!pool.assign(pos(0, 0), pos(1, 1)));
    }

    // -----------------------------------------------------------------------
    // Movement
    // -----------------------------------------------------------------------

    #[test]
    fn moves_along_x_before_y() {
        let mut pool = VehiclePool::new();
        let id = pool.spawn(PixelPosition::default());
        pool.assign(pos(1, 1), pos(1, 1));

        pool.step(TILE, speed());
        assert_eq!(pool.get(id).unwrap().position(), PixelPosition::from_int(2, 0));

        // x stops at 30, within one speed unit of 32; then y starts moving.
        for _ in 0..14 {
            pool.step(TILE, speed());
        }
        assert_eq!(pool.get(id).unwrap().position(), PixelPosition::from_int(30, 0));
        pool.step(TILE, speed());
        assert_eq!(pool.get(id).unwrap().position(), PixelPosition::from_int(30, 2));
    }

    #[test]
    fn route_exhaustion_lands_on_target() {
        let mut pool = VehiclePool::new();
        let id = pool.spawn(PixelPosition::default());
        pool.assign(pos(1, 0), pos(1, 1));

        let mut arrivals = Vec::new();
        for _ in 0..100 {
            arrivals.extend(pool.step(TILE, speed()));
            assert_invariant(&pool);
        }

        let v = pool.get(id).unwrap();
        assert_eq!(v.position(), PixelPosition::from_int(32, 32));
        assert_eq!(v.state(), VehicleState::Idle);
        assert!(v.route().is_empty());
        assert_eq!(arrivals.len(), 2);
        assert!(!arrivals[0].finished);
        assert!(arrivals[1].finished);
        assert_eq!(arrivals[1].waypoint, pos(1, 1));
    }

    #[test]
    fn moves_toward_negative_direction() {
        let mut pool = VehiclePool::new();
        let id = pool.spawn(PixelPosition::from_int(64, 64));
        pool.assign(pos(0, 0), pos(0, 0));

        pool.step(TILE, speed());
        assert_eq!(pool.get(id).unwrap().position(), PixelPosition::from_int(62, 64));
    }

    #[test]
    fn never_overshoots() {
        let mut pool = VehiclePool::new();
        let id = pool.spawn(PixelPosition::default());
        pool.assign(pos(3, 2), pos(0, 1));
        let speed = Fixed64::from_num(5);

        for _ in 0..200 {
            pool.step(TILE, speed);
            let p = pool.get(id).unwrap().position();
            assert!(p.x >= Fixed64::ZERO && p.x <= Fixed64::from_num(96));
            assert!(p.y >= Fixed64::ZERO && p.y <= Fixed64::from_num(64));
        }
        assert_eq!(pool.get(id).unwrap().position(), PixelPosition::from_int(0, 32));
        assert!(pool.get(id).unwrap().is_idle());
    }

    #[test]
    fn idle_vehicles_do_not_move() {
        let mut pool = VehiclePool::new();
        let id = pool.spawn(PixelPosition::from_int(7, 9));
        assert!(pool.step(TILE, speed()).is_empty());
        assert_eq!(pool.get(id).unwrap().position(), PixelPosition::from_int(7, 9));
        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn vehicle_becomes_assignable_after_finishing() {
        let mut pool = VehiclePool::new();
        pool.spawn(PixelPosition::default());
        pool.assign(pos(0, 0), pos(0, 0));
        assert!(!pool.assign(pos(1, 1), pos(2, 2)));

        // Two arrival frames, no movement needed.
        pool.step(TILE, speed());
        pool.step(TILE, speed());
        assert!(pool.assign(pos(1, 1), pos(2, 2)));
    }
}
