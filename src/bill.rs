// Checkout bills
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::inventory::SlotId;
use crate::menu::MenuItem;
use crate::money::Money;
use crate::room::{Booking, RoomCategory};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "Rs.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillLine {
    pub item: MenuItem,
    pub quantity: u32,
    pub line_total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSummary {
    pub slot: SlotId,
    pub room_charge: Money,
    pub lines: Vec<BillLine>,
    pub total: Money,
}

impl BillSummary {
    /// Flat room charge plus every captured food line, in the order placed.
    pub fn for_booking(slot: SlotId, booking: &Booking) -> Self {
        let room_charge = slot.category.flat_charge();
        let lines: Vec<BillLine> = booking
            .orders
            .iter()
            .map(|order| BillLine {
                item: order.item,
                quantity: order.quantity,
                line_total: order.line_total,
            })
            .collect();
        // Slot::add_order and snapshot loading both reject bookings whose
        // total would overflow
        let total = room_charge + lines.iter().map(|line| line.line_total).sum::<Money>();

        Self {
            slot,
            room_charge,
            lines,
            total,
        }
    }

    pub fn category(&self) -> RoomCategory {
        self.slot.category
    }

    pub fn food_total(&self) -> Money {
        self.lines.iter().map(|line| line.line_total).sum()
    }

    pub fn render(&self, currency: &str) -> String {
        Rendered(self, currency).to_string()
    }

    fn write_to(&self, out: &mut fmt::Formatter, currency: &str) -> fmt::Result {
        writeln!(out, "Room Charge: {}{}", currency, self.room_charge)?;
        if !self.lines.is_empty() {
            writeln!(out)?;
            writeln!(out, "Food Charges:")?;
            writeln!(out, "Item       Quantity   Price")?;
            writeln!(out, "-----------------------------")?;
            for line in &self.lines {
                writeln!(
                    out,
                    "{:<10} {:<10} {}{}",
                    line.item.name(),
                    line.quantity,
                    currency,
                    line.line_total
                )?;
            }
        }
        writeln!(out)?;
        writeln!(out, "Total Amount: {}{}", currency, self.total)
    }
}

// A bill printed with a configured currency symbol
struct Rendered<'a>(&'a BillSummary, &'a str);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.write_to(f, self.1)
    }
}

impl fmt::Display for BillSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_to(f, DEFAULT_CURRENCY_SYMBOL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::FoodOrder;
    use crate::room::{Guest, Occupants};

    fn booking_with(orders: &[(u8, u32)]) -> Booking {
        let occupants = Occupants::for_category(
            RoomCategory::LuxurySingle,
            Guest::new("Kiran", "555-0199", "M"),
            None,
        )
        .unwrap();
        let mut booking = Booking::new(occupants);
        for &(item_id, quantity) in orders {
            booking.orders.push(FoodOrder::new(item_id, quantity).unwrap());
        }
        booking
    }

    #[test]
    fn test_room_only_bill() {
        let slot = SlotId::new(RoomCategory::LuxurySingle, 0).unwrap();
        let summary = BillSummary::for_booking(slot, &booking_with(&[]));
        assert_eq!(summary.total, Money::from_major(2200));
        assert!(summary.lines.is_empty());

        let printed = summary.to_string();
        assert!(printed.contains("Room Charge: Rs.2200.00"));
        assert!(!printed.contains("Food Charges"));
        assert!(printed.ends_with("Total Amount: Rs.2200.00\n"));
    }

    #[test]
    fn test_food_lines_in_order() {
        let slot = SlotId::new(RoomCategory::LuxurySingle, 4).unwrap();
        let summary = BillSummary::for_booking(slot, &booking_with(&[(2, 2), (4, 1)]));
        assert_eq!(summary.food_total(), Money::from_major(150));
        assert_eq!(summary.total, Money::from_major(2350));

        let printed = summary.render("INR ");
        let pasta = printed.find("Pasta").unwrap();
        let coke = printed.find("Coke").unwrap();
        assert!(pasta < coke);
        assert!(printed.contains("Pasta      2          INR 120.00"));
        assert!(printed.contains("Total Amount: INR 2350.00"));
    }
}
