//! Typed simulation events with per-kind ring buffers.
//!
//! Commands and the frame update emit events as they happen; the simulation
//! delivers them in one batch at the end of every `advance` (and on `quit`).
//! Each event kind has its own [`EventBuffer`], allocated on first emit.
//!
//! # Subscriber Types
//!
//! - **Passive listeners**: read-only, for UI readouts, audio, analytics.
//! - **Reactive handlers**: return [`Command`]s that the simulation executes
//!   at the start of the next frame (standing orders, auto-dispatch).
//!
//! Suppressed kinds are never buffered and never delivered.

use crate::command::Command;
use crate::fixed::Frames;
use crate::grid::GridPosition;
use crate::id::{FacilityId, FacilityKindId, ResourceId, VehicleId};

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// Why a command was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    OutOfBounds,
    Occupied,
    UnknownKind,
    EmptyCell,
    NoIdleVehicle,
    /// A waypoint maps to a pixel position beyond `grid::PIXEL_LIMIT`.
    UnreachableWaypoint,
    Stopped,
}

/// A simulation event. All events carry the frame in which they occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // -- Grid --
    FacilityPlaced {
        facility: FacilityId,
        kind: FacilityKindId,
        position: GridPosition,
        frame: Frames,
    },
    PlacementRejected {
        position: GridPosition,
        reason: RejectReason,
        frame: Frames,
    },
    FacilityUpgraded {
        facility: FacilityId,
        position: GridPosition,
        level: u32,
        capacity: u32,
        frame: Frames,
    },
    UpgradeRejected {
        position: GridPosition,
        reason: RejectReason,
        frame: Frames,
    },

    // -- Vehicles --
    VehicleAssigned {
        vehicle: VehicleId,
        source: GridPosition,
        destination: GridPosition,
        frame: Frames,
    },
    AssignmentRejected {
        source: GridPosition,
        destination: GridPosition,
        reason: RejectReason,
        frame: Frames,
    },
    WaypointReached {
        vehicle: VehicleId,
        waypoint: GridPosition,
        frame: Frames,
    },
    VehicleIdle {
        vehicle: VehicleId,
        frame: Frames,
    },

    // -- Production --
    ResourceProduced {
        resource: ResourceId,
        quantity: u64,
        frame: Frames,
    },
}

/// Discriminant tag for event types, used for suppression and subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    FacilityPlaced,
    PlacementRejected,
    FacilityUpgraded,
    UpgradeRejected,
    VehicleAssigned,
    AssignmentRejected,
    WaypointReached,
    VehicleIdle,
    ResourceProduced,
}

const EVENT_KIND_COUNT: usize = 9;

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::FacilityPlaced { .. } => EventKind::FacilityPlaced,
            Event::PlacementRejected { .. } => EventKind::PlacementRejected,
            Event::FacilityUpgraded { .. } => EventKind::FacilityUpgraded,
            Event::UpgradeRejected { .. } => EventKind::UpgradeRejected,
            Event::VehicleAssigned { .. } => EventKind::VehicleAssigned,
            Event::AssignmentRejected { .. } => EventKind::AssignmentRejected,
            Event::WaypointReached { .. } => EventKind::WaypointReached,
            Event::VehicleIdle { .. } => EventKind::VehicleIdle,
            Event::ResourceProduced { .. } => EventKind::ResourceProduced,
        }
    }

    pub fn frame(&self) -> Frames {
        match self {
            Event::FacilityPlaced { frame, .. }
            | Event::PlacementRejected { frame, .. }
            | Event::FacilityUpgraded { frame, .. }
            | Event::UpgradeRejected { frame, .. }
            | Event::VehicleAssigned { frame, .. }
            | Event::AssignmentRejected { frame, .. }
            | Event::WaypointReached { frame, .. }
            | Event::VehicleIdle { frame, .. }
            | Event::ResourceProduced { frame, .. } => *frame,
        }
    }
}

impl EventKind {
    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// EventBuffer
// ---------------------------------------------------------------------------

/// A fixed-capacity ring buffer. When full, the oldest event is dropped.
#[derive(Debug)]
pub struct EventBuffer {
    events: Vec<Option<Event>>,
    /// Next write position.
    head: usize,
    len: usize,
    /// Lifetime count, including dropped events.
    total_written: u64,
}

impl EventBuffer {
    /// A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
            total_written: 0,
        }
    }

    pub fn push(&mut self, event: Event) {
        let capacity = self.capacity();
        self.events[self.head] = Some(event);
        self.head = (self.head + 1) % capacity;
        if self.len < capacity {
            self.len += 1;
        }
        self.total_written += 1;
    }

    pub fn capacity(&self) -> usize {
        self.events.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        let capacity = self.capacity();
        // Once full, head is the oldest slot.
        let start = if self.len < capacity { 0 } else { self.head };
        (0..self.len).filter_map(move |i| self.events[(start + i) % capacity].as_ref())
    }

    pub fn clear(&mut self) {
        self.events.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }
}

// ---------------------------------------------------------------------------
// Subscribers
// ---------------------------------------------------------------------------

pub type PassiveListener = Box<dyn FnMut(&Event)>;

/// Receives an event and returns commands to run at the start of the next frame.
pub type ReactiveHandler = Box<dyn FnMut(&Event) -> Vec<Command>>;

pub type EventFilter = Box<dyn Fn(&Event) -> bool>;

/// Lower priorities are delivered first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubscriberPriority {
    Pre = 0,
    Normal = 1,
    Post = 2,
}

enum Subscriber {
    Passive(PassiveListener),
    Reactive(ReactiveHandler),
}

struct SubscriberEntry {
    subscriber: Subscriber,
    priority: SubscriberPriority,
    filter: Option<EventFilter>,
    insertion_order: u64,
}

impl std::fmt::Debug for SubscriberEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.subscriber {
            Subscriber::Passive(_) => "Passive(<fn>)",
            Subscriber::Reactive(_) => "Reactive(<fn>)",
        };
        f.debug_struct("SubscriberEntry")
            .field("subscriber", &kind)
            .field("priority", &self.priority)
            .field("filtered", &self.filter.is_some())
            .field("insertion_order", &self.insertion_order)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

pub struct EventBus {
    buffers: [Option<EventBuffer>; EVENT_KIND_COUNT],
    suppressed: [bool; EVENT_KIND_COUNT],
    subscribers: [Vec<SubscriberEntry>; EVENT_KIND_COUNT],
    /// Commands returned by reactive handlers, drained by the simulation.
    pending_commands: Vec<Command>,
    default_capacity: usize,
    next_insertion_order: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("buffers", &self.buffers)
            .field("suppressed", &self.suppressed)
            .field("pending_commands", &self.pending_commands)
            .field("default_capacity", &self.default_capacity)
            .finish_non_exhaustive()
    }
}

impl EventBus {
    pub fn new(default_capacity: usize) -> Self {
        Self {
            buffers: Default::default(),
            suppressed: [false; EVENT_KIND_COUNT],
            subscribers: std::array::from_fn(|_| Vec::new()),
            pending_commands: Vec::new(),
            default_capacity,
            next_insertion_order: 0,
        }
    }

    /// Stop buffering an event kind and drop anything already buffered.
    pub fn suppress(&mut self, kind: EventKind) {
        self.suppressed[kind.index()] = true;
        self.buffers[kind.index()] = None;
    }

    pub fn is_suppressed(&self, kind: EventKind) -> bool {
        self.suppressed[kind.index()]
    }

    pub fn emit(&mut self, event: Event) {
        let idx = event.kind().index();
        if self.suppressed[idx] {
            return;
        }
        let capacity = self.default_capacity;
        self.buffers[idx]
            .get_or_insert_with(|| EventBuffer::new(capacity))
            .push(event);
    }

    pub fn on_passive(&mut self, kind: EventKind, listener: PassiveListener) {
        self.on_passive_filtered(kind, SubscriberPriority::Normal, None, listener);
    }

    pub fn on_reactive(&mut self, kind: EventKind, handler: ReactiveHandler) {
        self.on_reactive_filtered(kind, SubscriberPriority::Normal, None, handler);
    }

    pub fn on_passive_filtered(
        &mut self,
        kind: EventKind,
        priority: SubscriberPriority,
        filter: Option<EventFilter>,
        listener: PassiveListener,
    ) {
        self.subscribe(kind, priority, filter, Subscriber::Passive(listener));
    }

    pub fn on_reactive_filtered(
        &mut self,
        kind: EventKind,
        priority: SubscriberPriority,
        filter: Option<EventFilter>,
        handler: ReactiveHandler,
    ) {
        self.subscribe(kind, priority, filter, Subscriber::Reactive(handler));
    }

    fn subscribe(
        &mut self,
        kind: EventKind,
        priority: SubscriberPriority,
        filter: Option<EventFilter>,
        subscriber: Subscriber,
    ) {
        let insertion_order = self.next_insertion_order;
        self.next_insertion_order += 1;
        let list = &mut self.subscribers[kind.index()];
        list.push(SubscriberEntry {
            subscriber,
            priority,
            filter,
            insertion_order,
        });
        list.sort_by_key(|e| (e.priority, e.insertion_order));
    }

    /// Deliver every buffered event to its subscribers, kind by kind, then
    /// clear the buffers.
    pub fn deliver(&mut self) {
        for idx in 0..EVENT_KIND_COUNT {
            let Some(buffer) = self.buffers[idx].as_mut() else {
                continue;
            };
            if buffer.is_empty() {
                continue;
            }
            let events: Vec<Event> = buffer.iter().cloned().collect();
            buffer.clear();

            for entry in &mut self.subscribers[idx] {
                for event in &events {
                    if let Some(filter) = &entry.filter
                        && !filter(event)
                    {
                        continue;
                    }
                    match &mut entry.subscriber {
                        Subscriber::Passive(listener) => listener(event),
                        Subscriber::Reactive(handler) => {
                            self.pending_commands.extend(handler(event));
                        }
                    }
                }
            }
        }
    }

    /// Take the commands produced by reactive handlers.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending_commands)
    }

    pub fn buffer(&self, kind: EventKind) -> Option<&EventBuffer> {
        self.buffers[kind.index()].as_ref()
    }

    pub fn buffered_count(&self, kind: EventKind) -> usize {
        self.buffer(kind).map_or(0, EventBuffer::len)
    }

    pub fn total_emitted(&self, kind: EventKind) -> u64 {
        self.buffer(kind).map_or(0, EventBuffer::total_written)
    }

    pub fn pending_command_count(&self) -> usize {
        self.pending_commands.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
