use crate::room::RoomNumber;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HotelError>;

/// Every way a front-desk operation can be refused.
#[derive(Debug, Error)]
pub enum HotelError {
    #[error("invalid count {count}: must be between 1 and {max}")]
    OutOfRangeCount { count: usize, max: usize },
    #[error("room {0} is invalid or occupied")]
    RoomUnavailable(RoomNumber),
    #[error("customer `{0}` not found")]
    CustomerNotFound(String),
    #[error("`{0}` is already checked in")]
    AlreadyCheckedIn(String),
    #[error("`{0}` is not checked in")]
    NotCheckedIn(String),
    #[error("`{0}` has no active booking")]
    NoActiveBooking(String),
    #[error("`{0}` already holds an active booking")]
    ActiveBookingExists(String),
    #[error("customer list full")]
    LedgerFull,
    #[error("menu full")]
    CatalogFull,
    #[error("food item {0} does not exist")]
    InvalidFoodItem(usize),
    #[error("`{0}` already ordered")]
    AlreadyOrdered(String),
    #[error("food item {0} was not ordered")]
    NotOrdered(usize),
    #[error("amount out of range")]
    AmountOverflow,
    #[error("invalid {field}: `{value}`")]
    InvalidInput { field: &'static str, value: String },
    #[error("invalid inventory: {0}")]
    InvalidInventory(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HotelError {
    pub fn invalid_input(field: &'static str, value: impl Into<String>) -> Self {
        HotelError::InvalidInput {
            field,
            value: value.into(),
        }
    }
}
