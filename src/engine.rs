// Booking & billing engine
// Owns the inventory store and drives each slot through
// book -> add_food_order* -> checkout.

use tracing::{debug, info};

use crate::bill::BillSummary;
use crate::error::Result;
use crate::inventory::{InventoryStore, Slot, SlotId};
use crate::menu::FoodOrder;
use crate::room::{Booking, Guest, Occupants, RoomCategory};

#[derive(Debug, Default)]
pub struct BookingEngine {
    store: InventoryStore,
}

impl BookingEngine {
    pub fn new(store: InventoryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    // Hand the store back, e.g. to snapshot it on shutdown
    pub fn into_store(self) -> InventoryStore {
        self.store
    }

    pub fn available_count(&self, category: RoomCategory) -> usize {
        self.store.available_count(category)
    }

    pub fn is_vacant(&self, category: RoomCategory, index: usize) -> Result<bool> {
        self.store.is_vacant(category, index)
    }

    pub fn find_slot(&self, category: RoomCategory, index: usize) -> Result<&Slot> {
        self.store.find_slot(category, index)
    }

    /// Occupies a vacant slot. Double rooms need a companion; single rooms
    /// drop one if given.
    pub fn book(
        &mut self,
        category: RoomCategory,
        index: usize,
        guest: Guest,
        companion: Option<Guest>,
    ) -> Result<&Booking> {
        let id = SlotId::new(category, index)?;
        let slot = self.store.find_slot_mut(id)?;
        let booking = slot.occupy(id, || Occupants::for_category(category, guest, companion))?;
        info!(slot = %id, guest = %booking.occupants.primary().name, "room booked");
        Ok(booking)
    }

    pub fn add_food_order(
        &mut self,
        category: RoomCategory,
        index: usize,
        item_id: u8,
        quantity: u32,
    ) -> Result<&FoodOrder> {
        let id = SlotId::new(category, index)?;
        let order = self.store.find_slot_mut(id)?.add_order(id, item_id, quantity)?;
        debug!(
            slot = %id,
            item = %order.item,
            quantity = order.quantity,
            line_total = %order.line_total,
            "food order added"
        );
        Ok(order)
    }

    pub fn compute_bill(&self, category: RoomCategory, index: usize) -> Result<BillSummary> {
        let id = SlotId::new(category, index)?;
        self.store.find_slot(category, index)?.bill(id)
    }

    /// Bills the stay and returns the slot to vacant. On error nothing changes.
    pub fn checkout(&mut self, category: RoomCategory, index: usize) -> Result<BillSummary> {
        let id = SlotId::new(category, index)?;
        let summary = self.store.find_slot_mut(id)?.vacate(id)?;
        info!(slot = %id, total = %summary.total, "checkout completed");
        Ok(summary)
    }
}
