use crate::hotel::hotel::Hotel;
use crate::money::Money;
use crate::room::RoomNumber;
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn hours(h: i64) -> DateTime<Utc> {
    t0() + Duration::hours(h)
}

pub fn dollars(d: i64) -> Money {
    Money::from_dollars(d)
}

pub fn book(hotel: &mut Hotel, name: &str, rooms: &[RoomNumber]) -> Money {
    hotel.book_rooms(name, rooms, t0()).unwrap().total
}

pub fn book_and_check_in(hotel: &mut Hotel, name: &str, rooms: &[RoomNumber]) -> Money {
    let total = book(hotel, name, rooms);
    hotel.check_in(name).unwrap();
    total
}

pub fn occupied(hotel: &Hotel) -> Vec<RoomNumber> {
    hotel
        .rooms()
        .iter()
        .filter(|r| r.occupied)
        .map(|r| r.number)
        .collect()
}

pub fn arb_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("Alice"), Just("Bob"), Just("Carol"), Just("Dave"),]
}
