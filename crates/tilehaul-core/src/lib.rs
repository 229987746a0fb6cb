//! Tilehaul Core -- the simulation state engine for a tile-grid logistics game.
//!
//! A player places facilities on a grid, facilities accrue resources on a
//! fixed production interval, and vehicles travel point-to-point routes
//! between cells. Rendering and raw input stay outside the core: front ends
//! read owned snapshots and submit [`command::Command`]s.
//!
//! # Frame Pipeline
//!
//! Each call to [`simulation::Simulation::advance`] runs one frame:
//!
//! 1. **Bookkeeping** -- Count the frame and accumulate elapsed time.
//! 2. **Pre-frame** -- Execute commands queued by reactive event handlers.
//! 3. **Movement** -- Step every en-route vehicle once (axis-priority).
//! 4. **Production** -- One ledger tick per whole production interval.
//! 5. **Post-frame** -- Deliver buffered events to subscribers.
//!
//! # Key Types
//!
//! - [`simulation::Simulation`] -- Owns all state and runs the pipeline.
//! - [`catalog::FacilityCatalog`] -- Immutable facility kind templates and
//!   resource names, built through [`catalog::CatalogBuilder`].
//! - [`grid::Grid`] -- Placement grid of per-instance facility records.
//! - [`ledger::ResourceLedger`] -- Accumulated resource totals.
//! - [`vehicle::VehiclePool`] -- Vehicles and the Idle/EnRoute state machine.
//! - [`clock::SimulationClock`] -- Frame counter and production accumulator.
//! - [`event::EventBus`] -- Per-kind ring buffers with batched delivery.
//! - [`input::InputState`] -- Front-end selection and route marking.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for pixel positions.

pub mod catalog;
pub mod clock;
pub mod command;
pub mod config;
pub mod event;
pub mod fixed;
pub mod grid;
pub mod hash;
pub mod id;
pub mod input;
pub mod ledger;
pub mod query;
pub mod simulation;
pub mod vehicle;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
