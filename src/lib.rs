// Front-desk library for a single hotel: room inventory, bookings,
// room-service orders and checkout billing.

pub mod bill;
pub mod config;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod menu;
pub mod money;
pub mod room;
pub mod shared;
pub mod snapshot;

// Re-export key types for convenience
pub use bill::{BillLine, BillSummary};
pub use config::HotelConfig;
pub use engine::BookingEngine;
pub use error::{HotelError, PersistenceError, Result};
pub use inventory::{InventoryStore, Slot, SlotId};
pub use menu::{FoodOrder, MenuItem};
pub use money::Money;
pub use room::{Booking, Guest, Occupants, RoomCategory};
pub use shared::SharedInventory;
pub use snapshot::SnapshotStore;
