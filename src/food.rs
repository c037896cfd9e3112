use crate::error::{HotelError, Result};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub price: Money,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, price: Money) -> FoodItem {
        FoodItem {
            name: name.into(),
            price,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// One row of the printed menu.
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct MenuEntry {
    #[tabled(rename = "No.")]
    pub number: usize,
    #[tabled(rename = "Item")]
    pub name: String,
    #[tabled(rename = "Price")]
    pub price: Money,
}

/// Fixed menu slots; an item's number is its slot index plus one.
pub struct FoodCatalog {
    slots: Vec<FoodItem>,
}

impl FoodCatalog {
    pub const CAPACITY: usize = 10;

    pub fn standard() -> FoodCatalog {
        let items = [
            ("MacnCheese", 1299),
            ("Lobster", 1999),
            ("Tiramisu", 2299),
            ("Beef Steak", 2599),
            ("Churro", 1599),
            ("Pizza Bread", 1349),
            ("Prawns", 1099),
            ("Chowmein", 1049),
        ]
        .into_iter()
        .map(|(name, cents)| FoodItem::new(name, Money::from_cents(cents)))
        .collect();
        Self::padded(items)
    }

    pub fn from_items(items: Vec<FoodItem>) -> Result<FoodCatalog> {
        if items.len() > Self::CAPACITY {
            return Err(HotelError::CatalogFull);
        }
        if let Some(item) = items.iter().find(|i| i.price.is_negative()) {
            return Err(HotelError::InvalidInventory(format!(
                "menu item `{}` has negative price {}",
                item.name, item.price
            )));
        }
        Ok(Self::padded(items))
    }

    fn padded(mut slots: Vec<FoodItem>) -> FoodCatalog {
        slots.resize_with(Self::CAPACITY, FoodItem::default);
        FoodCatalog { slots }
    }

    pub fn item(&self, number: usize) -> Option<&FoodItem> {
        number
            .checked_sub(1)
            .and_then(|idx| self.slots.get(idx))
            .filter(|item| !item.is_empty())
    }

    pub fn list_available(&self) -> Vec<MenuEntry> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_empty())
            .map(|(idx, item)| MenuEntry {
                number: idx + 1,
                name: item.name.clone(),
                price: item.price,
            })
            .collect()
    }

    /// Fills the first empty slot and returns its item number.
    pub fn add_item(&mut self, name: &str, price: Money) -> Result<usize> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HotelError::invalid_input("food name", name));
        }
        if price.is_negative() {
            return Err(HotelError::invalid_input("price", price.to_string()));
        }
        let (idx, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, item)| item.is_empty())
            .ok_or(HotelError::CatalogFull)?;
        *slot = FoodItem::new(name, price);
        Ok(idx + 1)
    }
}

impl Default for FoodCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_menu() {
        let catalog = FoodCatalog::standard();
        let menu = catalog.list_available();
        assert_eq!(8, menu.len());
        assert_eq!(1, menu[0].number);
        assert_eq!("MacnCheese", menu[0].name);
        assert_eq!(Money(1299), menu[0].price);
        assert_eq!("Chowmein", menu[7].name);
        assert!(catalog.item(9).is_none());
        assert!(catalog.item(0).is_none());
        assert!(catalog.item(11).is_none());
    }

    #[test]
    fn test_add_until_full() {
        let mut catalog = FoodCatalog::standard();
        assert_eq!(9, catalog.add_item("Soup", Money(899)).unwrap());
        assert_eq!(10, catalog.add_item("Salad", Money(799)).unwrap());
        assert!(matches!(
            catalog.add_item("Cake", Money(599)),
            Err(HotelError::CatalogFull)
        ));
        assert_eq!("Salad", catalog.item(10).unwrap().name);
        assert_eq!(10, catalog.list_available().len());
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut catalog = FoodCatalog::standard();
        assert!(matches!(
            catalog.add_item("   ", Money(100)),
            Err(HotelError::InvalidInput { .. })
        ));
        assert_eq!(8, catalog.list_available().len());
    }

    #[test]
    fn test_add_rejects_negative_price() {
        let mut catalog = FoodCatalog::standard();
        assert!(matches!(
            catalog.add_item("Refund", Money(-300)),
            Err(HotelError::InvalidInput { field: "price", .. })
        ));
        assert_eq!(9, catalog.add_item("Water", Money::ZERO).unwrap());
    }

    #[test]
    fn test_from_items_pads_slots() {
        let mut catalog = FoodCatalog::from_items(vec![FoodItem::new("Tea", Money(250))]).unwrap();
        assert_eq!(1, catalog.list_available().len());
        assert_eq!(2, catalog.add_item("Coffee", Money(300)).unwrap());

        let too_many = (0..11).map(|i| FoodItem::new(format!("Dish {i}"), Money(100))).collect();
        assert!(matches!(
            FoodCatalog::from_items(too_many),
            Err(HotelError::CatalogFull)
        ));
        assert!(matches!(
            FoodCatalog::from_items(vec![FoodItem::new("Refund", Money(-1))]),
            Err(HotelError::InvalidInventory(_))
        ));
    }
}
