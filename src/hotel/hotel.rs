use crate::customer::{Customer, CustomerLedger, StayStatus};
use crate::error::{HotelError, Result};
use crate::food::{FoodCatalog, FoodItem, MenuEntry};
use crate::money::Money;
use crate::room::{Room, RoomNumber, RoomRegistry};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Share of the bill forfeited when a booking is cancelled, by time since booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationTier {
    /// Less than 24 hours after booking.
    Early,
    /// Less than 48 hours after booking.
    Late,
    /// 48 hours or more: the whole bill is forfeited.
    Forfeit,
}

impl CancellationTier {
    pub fn from_elapsed(elapsed: Duration) -> CancellationTier {
        if elapsed < Duration::hours(24) {
            CancellationTier::Early
        } else if elapsed < Duration::hours(48) {
            CancellationTier::Late
        } else {
            CancellationTier::Forfeit
        }
    }

    pub fn percent(&self) -> u32 {
        match self {
            CancellationTier::Early => 20,
            CancellationTier::Late => 50,
            CancellationTier::Forfeit => 100,
        }
    }
}

pub struct BookingReceipt {
    pub customer: String,
    pub rooms: Vec<RoomNumber>,
    pub total: Money,
    pub discounted: bool,
}

pub struct CancellationReceipt {
    pub tier: CancellationTier,
    pub fee: Money,
    pub remaining: Money,
    pub released: Vec<RoomNumber>,
}

pub struct Hotel {
    rooms: RoomRegistry,
    menu: FoodCatalog,
    ledger: CustomerLedger,
}

impl Hotel {
    /// Bookings of more than this many rooms get the bulk discount.
    pub const BULK_THRESHOLD: usize = 2;
    pub const BULK_DISCOUNT_PERCENT: u32 = 20;

    pub fn new(rooms: RoomRegistry, menu: FoodCatalog) -> Hotel {
        Hotel {
            rooms,
            menu,
            ledger: CustomerLedger::new(),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        #[derive(Deserialize)]
        struct RawInventory {
            rooms: Vec<Room>,
            #[serde(default)]
            menu: Vec<FoodItem>,
        }
        let raw: RawInventory = serde_json::from_str(&data)?;

        let rooms = RoomRegistry::from_rooms(raw.rooms)?;
        let menu = FoodCatalog::from_items(raw.menu)?;
        info!(
            "loaded {} rooms and {} menu items from {}",
            rooms.len(),
            menu.list_available().len(),
            path.display()
        );
        Ok(Hotel::new(rooms, menu))
    }

    pub fn available_rooms(&self) -> Vec<&Room> {
        self.rooms.list_available()
    }

    pub fn is_room_available(&self, number: RoomNumber) -> bool {
        self.rooms.is_available(number)
    }

    pub fn menu(&self) -> Vec<MenuEntry> {
        self.menu.list_available()
    }

    pub fn customer(&self, name: &str) -> Result<&Customer> {
        let name = name.trim();
        let idx = self.ledger.find_by_name(name)?;
        self.ledger
            .get(idx)
            .ok_or_else(|| HotelError::CustomerNotFound(name.to_string()))
    }

    /// Sum of room prices, less the bulk discount when more than two rooms are booked.
    pub fn room_charge(prices: &[Money]) -> Result<Money> {
        let total = prices
            .iter()
            .try_fold(Money::ZERO, |acc, price| acc.checked_add(*price))
            .ok_or(HotelError::AmountOverflow)?;
        if prices.len() > Self::BULK_THRESHOLD {
            total
                .percent(Self::BULK_DISCOUNT_PERCENT)
                .and_then(|discount| total.checked_sub(discount))
                .ok_or(HotelError::AmountOverflow)
        } else {
            Ok(total)
        }
    }

    pub fn book_rooms(
        &mut self,
        name: &str,
        rooms: &[RoomNumber],
        now: DateTime<Utc>,
    ) -> Result<BookingReceipt> {
        Self::validate_room_count(rooms.len())?;
        let name = name.trim();
        if name.is_empty() {
            return Err(HotelError::invalid_input("name", name));
        }

        // every room is checked before any is occupied
        let mut seen = HashSet::new();
        let prices = rooms
            .iter()
            .map(|number| match self.rooms.get(*number) {
                Some(room) if !room.occupied && seen.insert(*number) => Ok(room.price),
                _ => Err(HotelError::RoomUnavailable(*number)),
            })
            .collect::<Result<Vec<Money>>>()?;

        let total = Self::room_charge(&prices)?;
        let idx = self.resolve_slot(name, now)?;
        rooms.iter().for_each(|number| self.rooms.occupy(*number));
        self.ledger.record_booking(idx, rooms.to_vec(), total, now)?;
        self.assert_invariants();

        info!("booked rooms {:?} for `{}`, total {}", rooms, name, total);
        Ok(BookingReceipt {
            customer: name.to_string(),
            rooms: rooms.to_vec(),
            total,
            discounted: rooms.len() > Self::BULK_THRESHOLD,
        })
    }

    /// Reuses a finished record under the same name, otherwise takes a new slot.
    fn resolve_slot(&mut self, name: &str, now: DateTime<Utc>) -> Result<usize> {
        match self.ledger.find_by_name(name) {
            Ok(idx) => {
                let holds = self.ledger.get(idx).is_some_and(|c| c.holds_rooms());
                if holds {
                    Err(HotelError::ActiveBookingExists(name.to_string()))
                } else {
                    debug!("reusing ledger slot {} for returning customer `{}`", idx, name);
                    Ok(idx)
                }
            }
            Err(HotelError::CustomerNotFound(_)) => {
                let idx = self.ledger.create_customer(name, now)?;
                debug!(
                    "new ledger slot {} for `{}` ({} of {} used)",
                    idx,
                    name,
                    self.ledger.len(),
                    CustomerLedger::CAPACITY
                );
                Ok(idx)
            }
            Err(e) => Err(e),
        }
    }

    pub fn check_in(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        let idx = self.ledger.find_by_name(name)?;
        match self.status_of(idx, name)? {
            StayStatus::CheckedIn => Err(HotelError::AlreadyCheckedIn(name.to_string())),
            StayStatus::Booked => {
                self.ledger.set_checked_in(idx, true)?;
                info!("`{}` checked in", name);
                Ok(())
            }
            StayStatus::CheckedOut | StayStatus::Cancelled => {
                Err(HotelError::NoActiveBooking(name.to_string()))
            }
        }
    }

    /// Releases the customer's rooms and returns the final bill.
    pub fn check_out(&mut self, name: &str) -> Result<Money> {
        let name = name.trim();
        let idx = self.checked_in_index(name)?;
        let released = self.release_rooms(idx);
        self.ledger.set_checked_in(idx, false)?;
        self.assert_invariants();
        let bill = self.bill_of(idx, name)?;
        info!("`{}` checked out of rooms {:?}, final bill {}", name, released, bill);
        Ok(bill)
    }

    pub fn bill(&self, name: &str) -> Result<Money> {
        let name = name.trim();
        let idx = self.checked_in_index(name)?;
        self.bill_of(idx, name)
    }

    pub fn add_food_item(&mut self, name: &str, price: Money) -> Result<usize> {
        let number = self.menu.add_item(name, price)?;
        info!("added `{}` at {} as menu item {}", name.trim(), price, number);
        Ok(number)
    }

    /// Confirms `name` may order before the menu is shown.
    pub fn begin_food_order(&self, name: &str) -> Result<()> {
        let name = name.trim();
        let idx = self.ledger.find_by_name(name)?;
        if self.status_of(idx, name)?.holds_rooms() {
            Ok(())
        } else {
            Err(HotelError::NoActiveBooking(name.to_string()))
        }
    }

    pub fn order_food(&mut self, name: &str, item: usize) -> Result<FoodItem> {
        let name = name.trim();
        self.begin_food_order(name)?;
        let idx = self.ledger.find_by_name(name)?;
        let food = self
            .menu
            .item(item)
            .cloned()
            .ok_or(HotelError::InvalidFoodItem(item))?;
        if self.ledger.get(idx).is_some_and(|c| c.has_ordered(item - 1)) {
            return Err(HotelError::AlreadyOrdered(food.name));
        }
        let bill = self.ledger.adjust_bill(idx, food.price)?;
        self.ledger.mark_food_ordered(idx, item - 1, true)?;
        debug!("`{}` ordered `{}`, bill now {}", name, food.name, bill);
        Ok(food)
    }

    pub fn cancel_food(&mut self, name: &str, item: usize) -> Result<FoodItem> {
        let name = name.trim();
        let idx = self.checked_in_index(name)?;
        let ordered = item >= 1 && self.ledger.get(idx).is_some_and(|c| c.has_ordered(item - 1));
        if !ordered {
            return Err(HotelError::NotOrdered(item));
        }
        // a flagged slot is never emptied, the catalog only grows
        let food = self
            .menu
            .item(item)
            .cloned()
            .ok_or(HotelError::InvalidFoodItem(item))?;
        let bill = self.ledger.adjust_bill(idx, -food.price)?;
        self.ledger.mark_food_ordered(idx, item - 1, false)?;
        debug!("`{}` cancelled `{}`, bill now {}", name, food.name, bill);
        Ok(food)
    }

    pub fn cancel_booking(&mut self, name: &str, now: DateTime<Utc>) -> Result<CancellationReceipt> {
        let name = name.trim();
        let idx = self.ledger.find_by_name(name)?;
        match self.status_of(idx, name)? {
            StayStatus::CheckedIn => return Err(HotelError::AlreadyCheckedIn(name.to_string())),
            StayStatus::CheckedOut | StayStatus::Cancelled => {
                return Err(HotelError::NoActiveBooking(name.to_string()));
            }
            StayStatus::Booked => {}
        }

        let customer = self
            .ledger
            .get(idx)
            .ok_or_else(|| HotelError::CustomerNotFound(name.to_string()))?;
        let tier = CancellationTier::from_elapsed(now - customer.booked_at);
        let fee = customer
            .total_bill
            .percent(tier.percent())
            .ok_or(HotelError::AmountOverflow)?;

        let remaining = self.ledger.adjust_bill(idx, -fee)?;
        let released = self.release_rooms(idx);
        self.ledger.set_status(idx, StayStatus::Cancelled)?;
        self.assert_invariants();

        info!(
            "`{}` cancelled rooms {:?}: {}% fee {}, remaining {}",
            name,
            released,
            tier.percent(),
            fee,
            remaining
        );
        Ok(CancellationReceipt {
            tier,
            fee,
            remaining,
            released,
        })
    }

    pub fn validate_room_count(count: usize) -> Result<()> {
        let max = RoomRegistry::CAPACITY;
        if (1..=max).contains(&count) {
            Ok(())
        } else {
            Err(HotelError::OutOfRangeCount { count, max })
        }
    }

    fn status_of(&self, idx: usize, name: &str) -> Result<StayStatus> {
        self.ledger
            .get(idx)
            .map(|c| c.status)
            .ok_or_else(|| HotelError::CustomerNotFound(name.to_string()))
    }

    fn bill_of(&self, idx: usize, name: &str) -> Result<Money> {
        self.ledger
            .get(idx)
            .map(|c| c.total_bill)
            .ok_or_else(|| HotelError::CustomerNotFound(name.to_string()))
    }

    fn checked_in_index(&self, name: &str) -> Result<usize> {
        let idx = self.ledger.find_by_name(name)?;
        if self.ledger.get(idx).is_some_and(|c| c.is_checked_in()) {
            Ok(idx)
        } else {
            Err(HotelError::NotCheckedIn(name.to_string()))
        }
    }

    fn release_rooms(&mut self, idx: usize) -> Vec<RoomNumber> {
        let rooms = self
            .ledger
            .get(idx)
            .map(|c| c.rooms.clone())
            .unwrap_or_default();
        rooms.iter().for_each(|number| self.rooms.vacate(*number));
        rooms
    }

    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        let mut held: HashSet<RoomNumber> = HashSet::new();
        for idx in 0..self.ledger.len() {
            if let Some(customer) = self.ledger.get(idx).filter(|c| c.holds_rooms()) {
                debug_assert!(
                    customer.rooms.iter().all(|number| held.insert(*number)),
                    "Room held by more than one stay"
                );
            }
        }

        debug_assert!(
            (1..=self.rooms.len() as RoomNumber)
                .all(|number| self.rooms.is_available(number) != held.contains(&number)),
            "Occupied flag <-> held rooms invariant violated"
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_invariants(&self) {}

    #[cfg(test)]
    pub(crate) fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    #[cfg(test)]
    pub(crate) fn ledger(&self) -> &CustomerLedger {
        &self.ledger
    }
}

impl Default for Hotel {
    fn default() -> Self {
        Hotel::new(RoomRegistry::standard(), FoodCatalog::standard())
    }
}
