// Room-service menu and food orders
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HotelError, Result};
use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuItem {
    Sandwich,
    Pasta,
    Noodles,
    Coke,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Sandwich,
        MenuItem::Pasta,
        MenuItem::Noodles,
        MenuItem::Coke,
    ];

    /// Item ids are the 1-based menu numbers.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            1 => Ok(MenuItem::Sandwich),
            2 => Ok(MenuItem::Pasta),
            3 => Ok(MenuItem::Noodles),
            4 => Ok(MenuItem::Coke),
            other => Err(HotelError::InvalidItem(other)),
        }
    }

    pub const fn id(self) -> u8 {
        match self {
            MenuItem::Sandwich => 1,
            MenuItem::Pasta => 2,
            MenuItem::Noodles => 3,
            MenuItem::Coke => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MenuItem::Sandwich => "Sandwich",
            MenuItem::Pasta => "Pasta",
            MenuItem::Noodles => "Noodles",
            MenuItem::Coke => "Coke",
        }
    }

    pub const fn unit_price(self) -> Money {
        match self {
            MenuItem::Sandwich => Money::from_major(50),
            MenuItem::Pasta => Money::from_major(60),
            MenuItem::Noodles => Money::from_major(70),
            MenuItem::Coke => Money::from_major(30),
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One line of a stay's food bill. The line total is captured when the
/// order is placed and never recomputed from the menu afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodOrder {
    pub item: MenuItem,
    pub quantity: u32,
    pub line_total: Money,
}

impl FoodOrder {
    pub fn new(item_id: u8, quantity: u32) -> Result<Self> {
        let item = MenuItem::from_id(item_id)?;
        if quantity == 0 {
            return Err(HotelError::InvalidQuantity(quantity));
        }
        let line_total = item
            .unit_price()
            .checked_mul(quantity)
            .ok_or(HotelError::InvalidQuantity(quantity))?;
        Ok(Self {
            item,
            quantity,
            line_total,
        })
    }
}
