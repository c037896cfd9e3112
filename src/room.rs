use crate::error::{HotelError, Result};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use tabled::Tabled;

pub type RoomNumber = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    Single,
    Double,
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RoomType::Single => write!(f, "Single"),
            RoomType::Double => write!(f, "Double"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
pub struct Room {
    #[tabled(rename = "Room")]
    pub number: RoomNumber,
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    pub kind: RoomType,
    #[tabled(rename = "Price")]
    pub price: Money,
    #[tabled(skip)]
    #[serde(default, skip_serializing)]
    pub occupied: bool,
}

impl Room {
    pub fn new(number: RoomNumber, kind: RoomType, price: Money) -> Room {
        Room {
            number,
            kind,
            price,
            occupied: false,
        }
    }
}

/// The hotel's rooms, indexed by `number - 1`.
pub struct RoomRegistry {
    rooms: Vec<Room>,
}

impl RoomRegistry {
    pub const CAPACITY: usize = 10;

    /// Ten rooms alternating Single/$2500 and Double/$4000, starting with a single.
    pub fn standard() -> RoomRegistry {
        let rooms = (0..Self::CAPACITY)
            .map(|i| {
                let number = i as RoomNumber + 1;
                if i % 2 == 0 {
                    Room::new(number, RoomType::Single, Money::from_dollars(2500))
                } else {
                    Room::new(number, RoomType::Double, Money::from_dollars(4000))
                }
            })
            .collect();
        RoomRegistry { rooms }
    }

    pub fn from_rooms(rooms: Vec<Room>) -> Result<RoomRegistry> {
        if rooms.is_empty() || rooms.len() > Self::CAPACITY {
            return Err(HotelError::InvalidInventory(format!(
                "expected 1 to {} rooms, got {}",
                Self::CAPACITY,
                rooms.len()
            )));
        }
        if let Some((i, room)) = rooms
            .iter()
            .enumerate()
            .find(|(i, r)| r.number != *i as RoomNumber + 1)
        {
            return Err(HotelError::InvalidInventory(format!(
                "room at position {} is numbered {}, expected {}",
                i + 1,
                room.number,
                i + 1
            )));
        }
        if let Some(room) = rooms.iter().find(|r| r.price.is_negative()) {
            return Err(HotelError::InvalidInventory(format!(
                "room {} has negative price {}",
                room.number, room.price
            )));
        }
        let rooms = rooms
            .into_iter()
            .map(|r| Room { occupied: false, ..r })
            .collect();
        Ok(RoomRegistry { rooms })
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn get(&self, number: RoomNumber) -> Option<&Room> {
        (number as usize)
            .checked_sub(1)
            .and_then(|idx| self.rooms.get(idx))
    }

    fn get_mut(&mut self, number: RoomNumber) -> Option<&mut Room> {
        (number as usize)
            .checked_sub(1)
            .and_then(|idx| self.rooms.get_mut(idx))
    }

    pub fn is_available(&self, number: RoomNumber) -> bool {
        self.get(number).is_some_and(|r| !r.occupied)
    }

    pub fn list_available(&self) -> Vec<&Room> {
        self.rooms.iter().filter(|r| !r.occupied).collect()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    // out-of-range numbers are ignored, callers validate first
    pub fn occupy(&mut self, number: RoomNumber) {
        if let Some(room) = self.get_mut(number) {
            room.occupied = true;
        }
    }

    pub fn vacate(&mut self, number: RoomNumber) {
        if let Some(room) = self.get_mut(number) {
            room.occupied = false;
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let registry = RoomRegistry::standard();
        assert_eq!(10, registry.len());

        let first = registry.get(1).unwrap();
        assert_eq!(RoomType::Single, first.kind);
        assert_eq!(Money::from_dollars(2500), first.price);

        let second = registry.get(2).unwrap();
        assert_eq!(RoomType::Double, second.kind);
        assert_eq!(Money::from_dollars(4000), second.price);

        let last = registry.get(10).unwrap();
        assert_eq!(RoomType::Double, last.kind);
        assert!(registry.get(0).is_none());
        assert!(registry.get(11).is_none());
    }

    #[test]
    fn test_occupy_and_vacate() {
        let mut registry = RoomRegistry::standard();
        registry.occupy(3);
        registry.occupy(7);

        assert!(!registry.is_available(3));
        let available: Vec<RoomNumber> = registry.list_available().iter().map(|r| r.number).collect();
        assert_eq!(vec![1, 2, 4, 5, 6, 8, 9, 10], available);

        registry.vacate(3);
        assert!(registry.is_available(3));
        assert!(!registry.is_available(7));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut registry = RoomRegistry::standard();
        registry.occupy(0);
        registry.occupy(11);
        registry.vacate(42);
        assert_eq!(10, registry.list_available().len());
        assert!(!registry.is_available(0));
        assert!(!registry.is_available(11));
    }

    #[test]
    fn test_from_rooms_validation() {
        let ok = RoomRegistry::from_rooms(vec![
            Room::new(1, RoomType::Double, Money::from_dollars(100)),
            Room::new(2, RoomType::Single, Money::from_dollars(50)),
        ]);
        assert_eq!(2, ok.unwrap().len());

        let gap = RoomRegistry::from_rooms(vec![
            Room::new(1, RoomType::Double, Money::from_dollars(100)),
            Room::new(3, RoomType::Single, Money::from_dollars(50)),
        ]);
        assert!(matches!(gap, Err(HotelError::InvalidInventory(_))));

        let too_many = (1..=11)
            .map(|n| Room::new(n, RoomType::Single, Money::from_dollars(10)))
            .collect();
        assert!(matches!(
            RoomRegistry::from_rooms(too_many),
            Err(HotelError::InvalidInventory(_))
        ));
        assert!(RoomRegistry::from_rooms(vec![]).is_err());

        let negative = RoomRegistry::from_rooms(vec![Room::new(1, RoomType::Single, Money(-100))]);
        assert!(matches!(negative, Err(HotelError::InvalidInventory(_))));
    }
}
