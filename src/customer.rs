use crate::error::{HotelError, Result};
use crate::food::FoodCatalog;
use crate::money::Money;
use crate::room::RoomNumber;
use chrono::{DateTime, Utc};
use std::fmt;
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayStatus {
    Booked,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl StayStatus {
    /// Booked and checked-in stays keep their rooms occupied.
    pub fn holds_rooms(&self) -> bool {
        matches!(self, StayStatus::Booked | StayStatus::CheckedIn)
    }
}

impl fmt::Display for StayStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StayStatus::CheckedIn => write!(f, "Checked-In"),
            StayStatus::Booked => write!(f, "Not Checked-In"),
            StayStatus::CheckedOut => write!(f, "Not Checked-In (checked out)"),
            StayStatus::Cancelled => write!(f, "Not Checked-In (cancelled)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub name: String,
    pub rooms: Vec<RoomNumber>,
    pub total_bill: Money,
    food_ordered: [bool; FoodCatalog::CAPACITY],
    pub booked_at: DateTime<Utc>,
    pub status: StayStatus,
}

impl Customer {
    pub fn new(name: impl Into<String>, booked_at: DateTime<Utc>) -> Customer {
        Customer {
            name: name.into(),
            rooms: vec![],
            total_bill: Money::ZERO,
            food_ordered: [false; FoodCatalog::CAPACITY],
            booked_at,
            status: StayStatus::Booked,
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_checked_in(&self) -> bool {
        self.status == StayStatus::CheckedIn
    }

    pub fn holds_rooms(&self) -> bool {
        self.status.holds_rooms()
    }

    /// `slot` is zero-based; out-of-range slots were never ordered.
    pub fn has_ordered(&self, slot: usize) -> bool {
        self.food_ordered.get(slot).copied().unwrap_or(false)
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rooms = self
            .rooms
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "Customer Name: {}", self.name)?;
        writeln!(f, "Room Count: {}", self.room_count())?;
        writeln!(f, "Rooms Booked: {}", rooms)?;
        writeln!(f, "Total Bill: {}", self.total_bill)?;
        write!(f, "Status: {}", self.status)
    }
}

pub struct CustomerLedger {
    customers: Vec<Customer>,
}

impl CustomerLedger {
    pub const CAPACITY: usize = 10;

    pub fn new() -> CustomerLedger {
        CustomerLedger {
            customers: Vec::with_capacity(Self::CAPACITY),
        }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// First exact, case-sensitive match on the trimmed name.
    pub fn find_by_name(&self, name: &str) -> Result<usize> {
        let name = name.trim();
        self.customers
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| HotelError::CustomerNotFound(name.to_string()))
    }

    pub fn create_customer(&mut self, name: &str, at: DateTime<Utc>) -> Result<usize> {
        if self.customers.len() >= Self::CAPACITY {
            return Err(HotelError::LedgerFull);
        }
        self.customers.push(Customer::new(name.trim(), at));
        Ok(self.customers.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&Customer> {
        self.customers.get(index)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Customer> {
        self.customers
            .get_mut(index)
            .ok_or_else(|| HotelError::CustomerNotFound(format!("#{}", index + 1)))
    }

    /// Starts a fresh stay in the slot: rooms, bill and timestamp replaced, food flags cleared.
    pub fn record_booking(
        &mut self,
        index: usize,
        rooms: Vec<RoomNumber>,
        bill: Money,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let customer = self.slot_mut(index)?;
        customer.rooms = rooms;
        customer.total_bill = bill;
        customer.booked_at = at;
        customer.food_ordered = [false; FoodCatalog::CAPACITY];
        customer.status = StayStatus::Booked;
        Ok(())
    }

    pub fn set_checked_in(&mut self, index: usize, checked_in: bool) -> Result<()> {
        self.set_status(
            index,
            if checked_in {
                StayStatus::CheckedIn
            } else {
                StayStatus::CheckedOut
            },
        )
    }

    pub fn set_status(&mut self, index: usize, status: StayStatus) -> Result<()> {
        self.slot_mut(index)?.status = status;
        Ok(())
    }

    /// Leaves the bill untouched when the sum does not fit.
    pub fn adjust_bill(&mut self, index: usize, delta: Money) -> Result<Money> {
        let customer = self.slot_mut(index)?;
        customer.total_bill = customer
            .total_bill
            .checked_add(delta)
            .ok_or(HotelError::AmountOverflow)?;
        Ok(customer.total_bill)
    }

    pub fn mark_food_ordered(&mut self, index: usize, slot: usize, ordered: bool) -> Result<()> {
        let customer = self.slot_mut(index)?;
        let flag = customer
            .food_ordered
            .get_mut(slot)
            .ok_or(HotelError::InvalidFoodItem(slot + 1))?;
        *flag = ordered;
        Ok(())
    }
}

impl Default for CustomerLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_find_is_exact_and_first_match() {
        let mut ledger = CustomerLedger::new();
        ledger.create_customer("Alice", t0()).unwrap();
        ledger.create_customer("Bob", t0()).unwrap();
        ledger.create_customer("Alice", t0()).unwrap();

        assert_eq!(0, ledger.find_by_name("Alice").unwrap());
        assert_eq!(1, ledger.find_by_name("Bob").unwrap());
        assert!(matches!(
            ledger.find_by_name("alice"),
            Err(HotelError::CustomerNotFound(name)) if name == "alice"
        ));
    }

    #[test]
    fn test_ledger_full() {
        let mut ledger = CustomerLedger::new();
        for i in 0..CustomerLedger::CAPACITY {
            assert_eq!(i, ledger.create_customer(&format!("Guest {i}"), t0()).unwrap());
        }
        assert!(matches!(
            ledger.create_customer("Late", t0()),
            Err(HotelError::LedgerFull)
        ));
        assert_eq!(CustomerLedger::CAPACITY, ledger.len());
    }

    #[test]
    fn test_bill_can_go_negative() {
        let mut ledger = CustomerLedger::new();
        let idx = ledger.create_customer("Alice", t0()).unwrap();
        ledger.record_booking(idx, vec![1], Money(1000), t0()).unwrap();
        assert_eq!(Money(-500), ledger.adjust_bill(idx, Money(-1500)).unwrap());
    }

    #[test]
    fn test_adjust_bill_overflow_keeps_bill() {
        let mut ledger = CustomerLedger::new();
        let idx = ledger.create_customer("Alice", t0()).unwrap();
        ledger.record_booking(idx, vec![1], Money(1000), t0()).unwrap();
        assert!(matches!(
            ledger.adjust_bill(idx, Money(i64::MAX)),
            Err(HotelError::AmountOverflow)
        ));
        assert_eq!(Money(1000), ledger.get(idx).unwrap().total_bill);
    }

    #[test]
    fn test_names_are_trimmed() {
        let mut ledger = CustomerLedger::new();
        let idx = ledger.create_customer("  Alice ", t0()).unwrap();
        assert_eq!("Alice", ledger.get(idx).unwrap().name);
        assert_eq!(idx, ledger.find_by_name("Alice").unwrap());
        assert_eq!(idx, ledger.find_by_name(" Alice\t").unwrap());
    }

    #[test]
    fn test_record_booking_resets_stay() {
        let mut ledger = CustomerLedger::new();
        let idx = ledger.create_customer("Alice", t0()).unwrap();
        ledger.record_booking(idx, vec![1, 3], Money(500000), t0()).unwrap();
        ledger.mark_food_ordered(idx, 0, true).unwrap();
        ledger.set_checked_in(idx, true).unwrap();
        ledger.set_checked_in(idx, false).unwrap();
        assert_eq!(StayStatus::CheckedOut, ledger.get(idx).unwrap().status);

        let later = t0() + chrono::Duration::hours(3);
        ledger.record_booking(idx, vec![2], Money(400000), later).unwrap();
        let customer = ledger.get(idx).unwrap();
        assert_eq!(vec![2], customer.rooms);
        assert_eq!(1, customer.room_count());
        assert_eq!(Money(400000), customer.total_bill);
        assert_eq!(later, customer.booked_at);
        assert_eq!(StayStatus::Booked, customer.status);
        assert!(!customer.has_ordered(0));
    }

    #[test]
    fn test_food_flags() {
        let mut ledger = CustomerLedger::new();
        let idx = ledger.create_customer("Alice", t0()).unwrap();
        ledger.mark_food_ordered(idx, 4, true).unwrap();
        assert!(ledger.get(idx).unwrap().has_ordered(4));
        assert!(!ledger.get(idx).unwrap().has_ordered(10));
        assert!(matches!(
            ledger.mark_food_ordered(idx, 10, true),
            Err(HotelError::InvalidFoodItem(11))
        ));
        assert!(ledger.adjust_bill(7, Money(1)).is_err());
    }

    #[test]
    fn test_details() {
        let mut ledger = CustomerLedger::new();
        let idx = ledger.create_customer("Alice", t0()).unwrap();
        ledger.record_booking(idx, vec![1, 3], Money(500000), t0()).unwrap();
        ledger.set_checked_in(idx, true).unwrap();

        let details = ledger.get(idx).unwrap().to_string();
        assert_eq!(
            "Customer Name: Alice\nRoom Count: 2\nRooms Booked: 1 3\nTotal Bill: $5000.00\nStatus: Checked-In",
            details
        );
    }
}
