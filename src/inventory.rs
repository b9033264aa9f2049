// Inventory store: one fixed-size slot array per room category
//
// Every slot runs the same small state machine:
//   Vacant --occupy--> Occupied --vacate--> Vacant
// with add_order as a self-loop on Occupied. The transitions live on `Slot`
// so the single-threaded engine and the per-slot locked store share them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bill::BillSummary;
use crate::error::{HotelError, Result};
use crate::menu::FoodOrder;
use crate::room::{Booking, Occupants, RoomCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId {
    pub category: RoomCategory,
    pub index: usize,
}

impl SlotId {
    pub fn new(category: RoomCategory, index: usize) -> Result<Self> {
        let capacity = category.capacity();
        if index >= capacity {
            return Err(HotelError::OutOfRange {
                category,
                index,
                capacity,
            });
        }
        Ok(Self { category, index })
    }

    /// Converts a 1-based room number as printed on the door.
    /// Room 0 wraps to an index no category has.
    pub fn from_room_number(category: RoomCategory, number: usize) -> Result<Self> {
        Self::new(category, number.wrapping_sub(1))
    }

    pub fn room_number(self) -> usize {
        self.index + 1
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} #{}", self.category, self.room_number())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Slot {
    #[default]
    Vacant,
    Occupied(Booking),
}

impl Slot {
    pub fn is_vacant(&self) -> bool {
        matches!(self, Slot::Vacant)
    }

    pub fn booking(&self) -> Option<&Booking> {
        match self {
            Slot::Vacant => None,
            Slot::Occupied(booking) => Some(booking),
        }
    }

    fn booking_mut(&mut self, id: SlotId) -> Result<&mut Booking> {
        match self {
            Slot::Vacant => Err(not_occupied(id)),
            Slot::Occupied(booking) => Ok(booking),
        }
    }

    pub(crate) fn occupy(
        &mut self,
        id: SlotId,
        build: impl FnOnce() -> Result<Occupants>,
    ) -> Result<&Booking> {
        if !self.is_vacant() {
            return Err(HotelError::SlotOccupied {
                category: id.category,
                index: id.index,
            });
        }
        let occupants = build()?;
        *self = Slot::Occupied(Booking::new(occupants));
        self.booking().ok_or_else(|| not_occupied(id))
    }

    pub(crate) fn add_order(&mut self, id: SlotId, item_id: u8, quantity: u32) -> Result<&FoodOrder> {
        let booking = self.booking_mut(id)?;
        let order = FoodOrder::new(item_id, quantity)?;
        // Keeps every bill total representable
        booking
            .checked_total(id.category)
            .and_then(|total| total.checked_add(order.line_total))
            .ok_or(HotelError::InvalidQuantity(quantity))?;
        booking.orders.push(order);
        booking.orders.last().ok_or_else(|| not_occupied(id))
    }

    pub(crate) fn bill(&self, id: SlotId) -> Result<BillSummary> {
        let booking = self.booking().ok_or_else(|| not_occupied(id))?;
        Ok(BillSummary::for_booking(id, booking))
    }

    // The bill is computed before the booking is dropped, so a failure
    // leaves the slot untouched.
    pub(crate) fn vacate(&mut self, id: SlotId) -> Result<BillSummary> {
        let summary = self.bill(id)?;
        *self = Slot::Vacant;
        Ok(summary)
    }
}

fn not_occupied(id: SlotId) -> HotelError {
    HotelError::SlotNotOccupied {
        category: id.category,
        index: id.index,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStore {
    slots: BTreeMap<RoomCategory, Vec<Slot>>,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore {
    /// A store with every slot of every category vacant.
    pub fn new() -> Self {
        let slots = RoomCategory::ALL
            .iter()
            .map(|&category| (category, vec![Slot::Vacant; category.capacity()]))
            .collect();
        Self { slots }
    }

    // Snapshots decoded from disk must have exactly the fixed layout and
    // bills that fit in a Money
    pub fn is_well_formed(&self) -> bool {
        self.slots.len() == RoomCategory::ALL.len()
            && RoomCategory::ALL.iter().all(|category| {
                self.slots
                    .get(category)
                    .is_some_and(|slots| slots.len() == category.capacity())
            })
            && self
                .occupied()
                .all(|(id, booking)| booking.checked_total(id.category).is_some())
    }

    fn category_slots(&self, category: RoomCategory) -> &[Slot] {
        self.slots
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn available_count(&self, category: RoomCategory) -> usize {
        self.category_slots(category)
            .iter()
            .filter(|slot| slot.is_vacant())
            .count()
    }

    /// Vacancy counts in `RoomCategory::ALL` order.
    pub fn availability(&self) -> Vec<(RoomCategory, usize)> {
        RoomCategory::ALL
            .iter()
            .map(|&category| (category, self.available_count(category)))
            .collect()
    }

    pub fn vacant_indices(&self, category: RoomCategory) -> Vec<usize> {
        self.category_slots(category)
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_vacant())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn find_slot(&self, category: RoomCategory, index: usize) -> Result<&Slot> {
        let id = SlotId::new(category, index)?;
        self.category_slots(category)
            .get(id.index)
            .ok_or(HotelError::OutOfRange {
                category,
                index,
                capacity: category.capacity(),
            })
    }

    pub(crate) fn find_slot_mut(&mut self, id: SlotId) -> Result<&mut Slot> {
        self.slots
            .get_mut(&id.category)
            .and_then(|slots| slots.get_mut(id.index))
            .ok_or(HotelError::OutOfRange {
                category: id.category,
                index: id.index,
                capacity: id.category.capacity(),
            })
    }

    pub fn is_vacant(&self, category: RoomCategory, index: usize) -> Result<bool> {
        Ok(self.find_slot(category, index)?.is_vacant())
    }

    /// Occupied slots with their bookings, category by category.
    pub fn occupied(&self) -> impl Iterator<Item = (SlotId, &Booking)> + '_ {
        self.slots.iter().flat_map(|(&category, slots)| {
            slots.iter().enumerate().filter_map(move |(index, slot)| {
                slot.booking().map(|booking| (SlotId { category, index }, booking))
            })
        })
    }

    pub(crate) fn into_slots(self) -> BTreeMap<RoomCategory, Vec<Slot>> {
        self.slots
    }

    pub(crate) fn from_slots(slots: BTreeMap<RoomCategory, Vec<Slot>>) -> Self {
        Self { slots }
    }
}
