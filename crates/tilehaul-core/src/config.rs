//! Simulation settings.
//!
//! A [`SimConfig`] is fixed at construction. [`SimConfig::validate`] rejects
//! settings the frame loop cannot run with, including grids whose pixel
//! extent would not fit in [`Fixed64`].

use crate::fixed::{Fixed64, Frames, Millis};
use crate::grid::{GridPosition, PIXEL_LIMIT};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Grid width in cells.
    pub grid_width: u32,
    /// Grid height in cells.
    pub grid_height: u32,
    /// Pixel edge length of one cell.
    pub tile_size: u32,
    /// Pixels a vehicle moves per frame.
    pub vehicle_speed: Fixed64,
    /// Simulated time between production ticks.
    pub production_interval_ms: Millis,
    /// Vehicles spawned when the simulation is created.
    pub initial_vehicles: u32,
    /// Cell where initial vehicles start.
    pub vehicle_spawn: GridPosition,
    /// Target frames per second for headless drivers.
    pub frame_rate: u32,
    /// Ring buffer capacity per event kind.
    pub event_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        // An 800x600 screen of 32 px tiles.
        Self {
            grid_width: 800 / 32,
            grid_height: 600 / 32,
            tile_size: 32,
            vehicle_speed: Fixed64::from_num(2),
            production_interval_ms: 1000,
            initial_vehicles: 1,
            vehicle_spawn: GridPosition::new(0, 0),
            frame_rate: 60,
            event_capacity: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },
    #[error("tile size must be positive")]
    ZeroTileSize,
    #[error("vehicle speed must be positive, got {0}")]
    NonPositiveSpeed(Fixed64),
    #[error("production interval must be positive")]
    ZeroInterval,
    #[error("frame rate must be positive")]
    ZeroFrameRate,
    #[error("vehicle spawn ({}, {}) is outside the grid", .0.x, .0.y)]
    SpawnOutOfBounds(GridPosition),
    #[error("a {width}x{height} grid of {tile_size} px tiles exceeds {} px", PIXEL_LIMIT)]
    PixelExtentTooLarge {
        width: u32,
        height: u32,
        tile_size: u32,
    },
}

impl SimConfig {
    pub fn with_grid(mut self, width: u32, height: u32) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_vehicle_speed(mut self, speed: Fixed64) -> Self {
        self.vehicle_speed = speed;
        self
    }

    pub fn with_production_interval(mut self, interval_ms: Millis) -> Self {
        self.production_interval_ms = interval_ms;
        self
    }

    pub fn with_initial_vehicles(mut self, count: u32) -> Self {
        self.initial_vehicles = count;
        self
    }

    pub fn with_vehicle_spawn(mut self, spawn: GridPosition) -> Self {
        self.vehicle_spawn = spawn;
        self
    }

    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.frame_rate = fps;
        self
    }

    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        let extent = u64::from(self.grid_width.max(self.grid_height)) * u64::from(self.tile_size);
        if extent > PIXEL_LIMIT as u64 {
            return Err(ConfigError::PixelExtentTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                tile_size: self.tile_size,
            });
        }
        if self.vehicle_speed <= Fixed64::ZERO {
            return Err(ConfigError::NonPositiveSpeed(self.vehicle_speed));
        }
        if self.production_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        let spawn = self.vehicle_spawn;
        if spawn.x < 0
            || spawn.y < 0
            || spawn.x as u32 >= self.grid_width
            || spawn.y as u32 >= self.grid_height
        {
            return Err(ConfigError::SpawnOutOfBounds(spawn));
        }
        Ok(())
    }

    /// Integer duration of `frame` at the configured frame rate. Successive
    /// frames alternate so that every `frame_rate` frames sum to exactly one
    /// second (16, 17, 17, 16, ... at 60 Hz).
    pub fn frame_duration_ms(&self, frame: Frames) -> Millis {
        let fps = u64::from(self.frame_rate.max(1));
        let start = frame * 1000 / fps;
        let end = (frame + 1) * 1000 / fps;
        end - start
    }
}
