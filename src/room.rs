// Room categories, guests and the booking record held by an occupied slot
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HotelError, Result};
use crate::menu::FoodOrder;
use crate::money::Money;

// The four fixed room categories, in the order the front desk numbers them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomCategory {
    LuxuryDouble,
    DeluxeDouble,
    LuxurySingle,
    DeluxeSingle,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 4] = [
        RoomCategory::LuxuryDouble,
        RoomCategory::DeluxeDouble,
        RoomCategory::LuxurySingle,
        RoomCategory::DeluxeSingle,
    ];

    /// Maps the 1-based room type number shown at the desk to a category.
    pub fn from_choice(choice: u8) -> Result<Self> {
        match choice {
            1 => Ok(RoomCategory::LuxuryDouble),
            2 => Ok(RoomCategory::DeluxeDouble),
            3 => Ok(RoomCategory::LuxurySingle),
            4 => Ok(RoomCategory::DeluxeSingle),
            other => Err(HotelError::InvalidCategory(other)),
        }
    }

    pub const fn capacity(self) -> usize {
        match self {
            RoomCategory::LuxuryDouble => 10,
            RoomCategory::DeluxeDouble => 20,
            RoomCategory::LuxurySingle => 10,
            RoomCategory::DeluxeSingle => 20,
        }
    }

    /// Flat charge per stay, independent of how long the guests stay.
    pub const fn flat_charge(self) -> Money {
        match self {
            RoomCategory::LuxuryDouble => Money::from_major(4000),
            RoomCategory::DeluxeDouble => Money::from_major(3000),
            RoomCategory::LuxurySingle => Money::from_major(2200),
            RoomCategory::DeluxeSingle => Money::from_major(1200),
        }
    }

    pub const fn is_double(self) -> bool {
        matches!(self, RoomCategory::LuxuryDouble | RoomCategory::DeluxeDouble)
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            RoomCategory::LuxuryDouble => "Luxury Double Room",
            RoomCategory::DeluxeDouble => "Deluxe Double Room",
            RoomCategory::LuxurySingle => "Luxury Single Room",
            RoomCategory::DeluxeSingle => "Deluxe Single Room",
        }
    }

    pub const fn features(self) -> &'static str {
        match self {
            RoomCategory::LuxuryDouble | RoomCategory::LuxurySingle => "AC, Free Breakfast",
            RoomCategory::DeluxeDouble | RoomCategory::DeluxeSingle => "Non-AC, Free Breakfast",
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    pub contact: String,
    pub gender: String,
}

impl Guest {
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
            gender: gender.into(),
        }
    }

    // Free text, only emptiness is rejected
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(HotelError::InvalidGuest("name"));
        }
        if self.contact.trim().is_empty() {
            return Err(HotelError::InvalidGuest("contact"));
        }
        if self.gender.trim().is_empty() {
            return Err(HotelError::InvalidGuest("gender"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupants {
    Single { guest: Guest },
    Double { guest: Guest, companion: Guest },
}

impl Occupants {
    /// Builds the occupants for `category`. A companion offered for a single
    /// room is dropped.
    pub fn for_category(
        category: RoomCategory,
        guest: Guest,
        companion: Option<Guest>,
    ) -> Result<Self> {
        guest.validate()?;
        if !category.is_double() {
            return Ok(Occupants::Single { guest });
        }
        let companion = companion.ok_or(HotelError::MissingSecondGuest(category))?;
        companion.validate()?;
        Ok(Occupants::Double { guest, companion })
    }

    pub fn primary(&self) -> &Guest {
        match self {
            Occupants::Single { guest } | Occupants::Double { guest, .. } => guest,
        }
    }

    pub fn companion(&self) -> Option<&Guest> {
        match self {
            Occupants::Single { .. } => None,
            Occupants::Double { companion, .. } => Some(companion),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub occupants: Occupants,
    pub orders: Vec<FoodOrder>,
    pub checked_in_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(occupants: Occupants) -> Self {
        Self {
            occupants,
            orders: Vec::new(),
            checked_in_at: Utc::now(),
        }
    }

    pub fn food_total(&self) -> Money {
        self.orders.iter().map(|order| order.line_total).sum()
    }

    /// Room charge plus all food lines, or None if the amount does not fit.
    pub fn checked_total(&self, category: RoomCategory) -> Option<Money> {
        self.orders
            .iter()
            .try_fold(category.flat_charge(), |total, order| {
                total.checked_add(order.line_total)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn guest(name: &str) -> Guest {
        Guest::new(name, "9876543210", "F")
    }

    #[test_case(1, RoomCategory::LuxuryDouble, 10, 4000; "#1 luxury double")]
    #[test_case(2, RoomCategory::DeluxeDouble, 20, 3000; "#2 deluxe double")]
    #[test_case(3, RoomCategory::LuxurySingle, 10, 2200; "#3 luxury single")]
    #[test_case(4, RoomCategory::DeluxeSingle, 20, 1200; "#4 deluxe single")]
    fn test_category_constants(choice: u8, category: RoomCategory, capacity: usize, charge: i64) {
        assert_eq!(RoomCategory::from_choice(choice).unwrap(), category);
        assert_eq!(category.capacity(), capacity);
        assert_eq!(category.flat_charge(), Money::from_major(charge));
    }

    #[test]
    fn test_invalid_choice() {
        assert!(matches!(
            RoomCategory::from_choice(5),
            Err(HotelError::InvalidCategory(5))
        ));
        assert!(matches!(
            RoomCategory::from_choice(0),
            Err(HotelError::InvalidCategory(0))
        ));
    }

    #[test]
    fn test_single_room_ignores_companion() {
        let occupants = Occupants::for_category(
            RoomCategory::DeluxeSingle,
            guest("Asha"),
            Some(guest("Ravi")),
        )
        .unwrap();
        assert_eq!(occupants, Occupants::Single { guest: guest("Asha") });
        assert!(occupants.companion().is_none());
    }

    #[test]
    fn test_double_room_requires_companion() {
        let result = Occupants::for_category(RoomCategory::LuxuryDouble, guest("Asha"), None);
        assert!(matches!(
            result,
            Err(HotelError::MissingSecondGuest(RoomCategory::LuxuryDouble))
        ));

        let occupants = Occupants::for_category(
            RoomCategory::DeluxeDouble,
            guest("Asha"),
            Some(guest("Ravi")),
        )
        .unwrap();
        assert_eq!(occupants.primary().name, "Asha");
        assert_eq!(occupants.companion().map(|g| g.name.as_str()), Some("Ravi"));
    }

    #[test]
    fn test_blank_guest_fields_rejected() {
        let blank = Guest::new("Asha", "  ", "F");
        assert!(matches!(
            Occupants::for_category(RoomCategory::LuxurySingle, blank, None),
            Err(HotelError::InvalidGuest("contact"))
        ));
    }
}
