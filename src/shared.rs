// Inventory for several front desks at once: one lock per slot, so work on
// different rooms never waits, while operations on the same room serialize.
use std::collections::BTreeMap;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::bill::BillSummary;
use crate::error::{HotelError, Result};
use crate::inventory::{InventoryStore, Slot, SlotId};
use crate::menu::FoodOrder;
use crate::room::{Booking, Guest, Occupants, RoomCategory};

#[derive(Debug)]
pub struct SharedInventory {
    slots: BTreeMap<RoomCategory, Vec<Mutex<Slot>>>,
}

impl Default for SharedInventory {
    fn default() -> Self {
        Self::from(InventoryStore::new())
    }
}

impl From<InventoryStore> for SharedInventory {
    fn from(store: InventoryStore) -> Self {
        let slots = store
            .into_slots()
            .into_iter()
            .map(|(category, slots)| (category, slots.into_iter().map(Mutex::new).collect()))
            .collect();
        Self { slots }
    }
}

impl SharedInventory {
    fn slot(&self, id: SlotId) -> Result<&Mutex<Slot>> {
        self.slots
            .get(&id.category)
            .and_then(|slots| slots.get(id.index))
            .ok_or(HotelError::OutOfRange {
                category: id.category,
                index: id.index,
                capacity: id.category.capacity(),
            })
    }

    fn category_slots(&self, category: RoomCategory) -> &[Mutex<Slot>] {
        self.slots
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // Each slot is locked on its own, so under concurrent traffic the count
    // is a best-effort view rather than an atomic one.
    pub fn available_count(&self, category: RoomCategory) -> usize {
        self.category_slots(category)
            .iter()
            .filter(|slot| slot.lock().is_vacant())
            .count()
    }

    pub fn is_vacant(&self, category: RoomCategory, index: usize) -> Result<bool> {
        let id = SlotId::new(category, index)?;
        Ok(self.slot(id)?.lock().is_vacant())
    }

    /// Copy of the booking in a slot, if any.
    pub fn booking(&self, category: RoomCategory, index: usize) -> Result<Option<Booking>> {
        let id = SlotId::new(category, index)?;
        Ok(self.slot(id)?.lock().booking().cloned())
    }

    pub fn book(
        &self,
        category: RoomCategory,
        index: usize,
        guest: Guest,
        companion: Option<Guest>,
    ) -> Result<Booking> {
        let id = SlotId::new(category, index)?;
        let mut slot = self.slot(id)?.lock();
        let booking = slot
            .occupy(id, || Occupants::for_category(category, guest, companion))?
            .clone();
        info!(slot = %id, guest = %booking.occupants.primary().name, "room booked");
        Ok(booking)
    }

    pub fn add_food_order(
        &self,
        category: RoomCategory,
        index: usize,
        item_id: u8,
        quantity: u32,
    ) -> Result<FoodOrder> {
        let id = SlotId::new(category, index)?;
        let mut slot = self.slot(id)?.lock();
        let order = slot.add_order(id, item_id, quantity)?.clone();
        debug!(slot = %id, item = %order.item, quantity = order.quantity, "food order added");
        Ok(order)
    }

    pub fn compute_bill(&self, category: RoomCategory, index: usize) -> Result<BillSummary> {
        let id = SlotId::new(category, index)?;
        let slot = self.slot(id)?.lock();
        slot.bill(id)
    }

    pub fn checkout(&self, category: RoomCategory, index: usize) -> Result<BillSummary> {
        let id = SlotId::new(category, index)?;
        let summary = self.slot(id)?.lock().vacate(id)?;
        info!(slot = %id, total = %summary.total, "checkout completed");
        Ok(summary)
    }

    /// Point-in-time copy for persisting. Slots are locked one by one.
    pub fn snapshot(&self) -> InventoryStore {
        let slots = self
            .slots
            .iter()
            .map(|(&category, slots)| {
                (category, slots.iter().map(|slot| slot.lock().clone()).collect())
            })
            .collect();
        InventoryStore::from_slots(slots)
    }

    pub fn into_store(self) -> InventoryStore {
        let slots = self
            .slots
            .into_iter()
            .map(|(category, slots)| {
                (category, slots.into_iter().map(Mutex::into_inner).collect())
            })
            .collect();
        InventoryStore::from_slots(slots)
    }
}
