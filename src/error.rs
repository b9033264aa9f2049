// Error types for the booking desk
use thiserror::Error;

use crate::room::RoomCategory;

pub type Result<T> = std::result::Result<T, HotelError>;

#[derive(Error, Debug)]
pub enum HotelError {
    #[error("Room #{} out of range for {category} (rooms 1-{capacity})", .index.wrapping_add(1))]
    OutOfRange {
        category: RoomCategory,
        index: usize,
        capacity: usize,
    },

    #[error("{category} #{} is already occupied", .index + 1)]
    SlotOccupied { category: RoomCategory, index: usize },

    #[error("{category} #{} is not occupied", .index + 1)]
    SlotNotOccupied { category: RoomCategory, index: usize },

    #[error("{0} requires a second guest")]
    MissingSecondGuest(RoomCategory),

    #[error("Invalid menu item: {0}")]
    InvalidItem(u8),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Invalid room type: {0}")]
    InvalidCategory(u8),

    #[error("Guest {0} must not be empty")]
    InvalidGuest(&'static str),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<std::io::Error> for HotelError {
    fn from(err: std::io::Error) -> Self {
        HotelError::Persistence(PersistenceError::Io(err))
    }
}

impl From<serde_json::Error> for HotelError {
    fn from(err: serde_json::Error) -> Self {
        HotelError::Persistence(PersistenceError::Encode(err))
    }
}
