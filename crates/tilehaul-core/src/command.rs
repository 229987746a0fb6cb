//! Player commands.
//!
//! The input adapter translates pointer and key events into [`Command`]s and
//! hands them to [`Simulation::execute`](crate::simulation::Simulation::execute).
//! Reactive event handlers return the same type.

use crate::grid::GridPosition;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Place a facility of the named kind.
    PlaceFacility { kind: String, position: GridPosition },
    /// Raise the facility at `position` by one level.
    UpgradeFacility { position: GridPosition },
    /// Send the first idle vehicle from `source` to `destination`.
    AssignVehicle {
        source: GridPosition,
        destination: GridPosition,
    },
}

impl Command {
    pub fn place(kind: &str, position: GridPosition) -> Self {
        Command::PlaceFacility {
            kind: kind.to_string(),
            position,
        }
    }

    pub fn upgrade(position: GridPosition) -> Self {
        Command::UpgradeFacility { position }
    }

    pub fn assign(source: GridPosition, destination: GridPosition) -> Self {
        Command::AssignVehicle {
            source,
            destination,
        }
    }
}
