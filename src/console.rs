use crate::error::HotelError;
use crate::hotel::hotel::Hotel;
use crate::money::Money;
use crate::room::RoomNumber;
use chrono::Utc;
use colored::Colorize;
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::{Editor, Helper};
use std::str::FromStr;
use tabled::settings::{Alignment, Style};
use tabled::Table;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Hotel(#[from] HotelError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

/// Where operator input comes from.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError>;

    fn add_history(&mut self, _line: &str) -> Result<(), ReadlineError> {
        Ok(())
    }
}

impl<H: Helper, I: History> LineSource for Editor<H, I> {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        self.readline(prompt)
    }

    fn add_history(&mut self, line: &str) -> Result<(), ReadlineError> {
        self.add_history_entry(line).map(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DisplayRooms,
    BookRoom,
    CheckIn,
    CheckOut,
    ViewBill,
    AddFoodItem,
    OrderFood,
    DisplayFoodMenu,
    CancelRoomBooking,
    CancelFoodOrder,
    ViewCustomerDetails,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 12] = [
        MenuChoice::DisplayRooms,
        MenuChoice::BookRoom,
        MenuChoice::CheckIn,
        MenuChoice::CheckOut,
        MenuChoice::ViewBill,
        MenuChoice::AddFoodItem,
        MenuChoice::OrderFood,
        MenuChoice::DisplayFoodMenu,
        MenuChoice::CancelRoomBooking,
        MenuChoice::CancelFoodOrder,
        MenuChoice::ViewCustomerDetails,
        MenuChoice::Exit,
    ];

    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).map_or(0, |i| i + 1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::DisplayRooms => "Display Rooms",
            MenuChoice::BookRoom => "Book Room",
            MenuChoice::CheckIn => "Check-In",
            MenuChoice::CheckOut => "Check-Out",
            MenuChoice::ViewBill => "View Bill",
            MenuChoice::AddFoodItem => "Add Food Item",
            MenuChoice::OrderFood => "Order Food",
            MenuChoice::DisplayFoodMenu => "Display Food Menu",
            MenuChoice::CancelRoomBooking => "Cancel Room Booking",
            MenuChoice::CancelFoodOrder => "Cancel Food Order",
            MenuChoice::ViewCustomerDetails => "View Customer Details",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Word accepted in place of the number, offered by tab completion.
    pub fn command(&self) -> &'static str {
        match self {
            MenuChoice::DisplayRooms => "rooms",
            MenuChoice::BookRoom => "book",
            MenuChoice::CheckIn => "checkin",
            MenuChoice::CheckOut => "checkout",
            MenuChoice::ViewBill => "bill",
            MenuChoice::AddFoodItem => "addfood",
            MenuChoice::OrderFood => "order",
            MenuChoice::DisplayFoodMenu => "menu",
            MenuChoice::CancelRoomBooking => "cancel",
            MenuChoice::CancelFoodOrder => "cancelfood",
            MenuChoice::ViewCustomerDetails => "details",
            MenuChoice::Exit => "exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| HotelError::invalid_input("choice", s));
        }
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "quit" => Ok(MenuChoice::Exit),
            _ => Self::ALL
                .iter()
                .find(|c| c.command() == lower)
                .copied()
                .ok_or_else(|| HotelError::invalid_input("choice", s)),
        }
    }
}

fn success(message: impl AsRef<str>) {
    println!("{}", message.as_ref().green());
}

fn failure(err: &HotelError) {
    debug!("operation refused: {}", err);
    println!("{}", err.to_string().red());
}

/// Menu driver: owns the hotel and turns operator input into engine calls.
pub struct Console<S: LineSource> {
    input: S,
    hotel: Hotel,
}

impl<S: LineSource> Console<S> {
    pub fn new(input: S, hotel: Hotel) -> Console<S> {
        Console { input, hotel }
    }

    #[cfg(test)]
    pub(crate) fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    pub fn print_menu(&self) {
        println!("\n{}", "==== Book And Stay ====".bold());
        for choice in MenuChoice::ALL {
            let number = format!("{}.", choice.number());
            println!("{:<4}{}", number, choice.label());
        }
    }

    /// Runs until Exit, Ctrl-C or end of input.
    pub fn run(&mut self) -> Result<(), ReadlineError> {
        loop {
            self.print_menu();
            let line = match self.input.read_line("Enter choice: ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    return Ok(());
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    return Ok(());
                }
                Err(err) => return Err(err),
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.input.add_history(trimmed)?;

            let choice = match trimmed.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(_) => {
                    println!("{}", "Invalid choice.".red());
                    continue;
                }
            };
            if choice == MenuChoice::Exit {
                println!("Thank you! Have a great day!");
                return Ok(());
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(ConsoleError::Hotel(err)) => failure(&err),
                Err(ConsoleError::Readline(ReadlineError::Interrupted | ReadlineError::Eof)) => {
                    println!("Input closed.");
                    return Ok(());
                }
                Err(ConsoleError::Readline(err)) => return Err(err),
            }
        }
    }

    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<(), ConsoleError> {
        match choice {
            MenuChoice::DisplayRooms => self.display_rooms(),
            MenuChoice::BookRoom => self.book_room()?,
            MenuChoice::CheckIn => self.check_in()?,
            MenuChoice::CheckOut => self.check_out()?,
            MenuChoice::ViewBill => self.view_bill()?,
            MenuChoice::AddFoodItem => self.add_food_item()?,
            MenuChoice::OrderFood => self.order_food()?,
            MenuChoice::DisplayFoodMenu => self.display_food_menu(),
            MenuChoice::CancelRoomBooking => self.cancel_room_booking()?,
            MenuChoice::CancelFoodOrder => self.cancel_food_order()?,
            MenuChoice::ViewCustomerDetails => self.view_customer_details()?,
            MenuChoice::Exit => {}
        }
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<String, ConsoleError> {
        Ok(self.input.read_line(label)?.trim().to_string())
    }

    fn prompt_name(&mut self) -> Result<String, ConsoleError> {
        self.prompt("Enter your name: ")
    }

    fn prompt_parsed<T: FromStr>(&mut self, label: &str, field: &'static str) -> Result<T, ConsoleError> {
        let raw = self.prompt(label)?;
        raw.parse::<T>()
            .map_err(|_| HotelError::invalid_input(field, raw).into())
    }

    fn display_rooms(&self) {
        let rooms = self.hotel.available_rooms();
        if rooms.is_empty() {
            println!("No rooms available.");
            return;
        }
        let mut table = Table::new(&rooms);
        table.with(Style::rounded());
        table.with(Alignment::left());
        println!("\nAvailable Rooms:\n{}", table);
    }

    fn display_food_menu(&self) {
        let menu = self.hotel.menu();
        if menu.is_empty() {
            println!("The menu is empty.");
            return;
        }
        let mut table = Table::new(&menu);
        table.with(Style::rounded());
        table.with(Alignment::left());
        println!("\nFood Menu:\n{}", table);
    }

    fn book_room(&mut self) -> Result<(), ConsoleError> {
        let count: usize = self.prompt_parsed("Enter number of rooms to book: ", "room count")?;
        Hotel::validate_room_count(count)?;
        let name = self.prompt_name()?;

        let mut rooms: Vec<RoomNumber> = Vec::with_capacity(count);
        for j in 1..=count {
            let number: RoomNumber =
                self.prompt_parsed(&format!("Enter room number {}: ", j), "room number")?;
            // stop at the first bad room instead of collecting the rest
            if !self.hotel.is_room_available(number) || rooms.contains(&number) {
                return Err(HotelError::RoomUnavailable(number).into());
            }
            rooms.push(number);
        }

        let receipt = self.hotel.book_rooms(&name, &rooms, Utc::now())?;
        let booked = receipt
            .rooms
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        success(format!("Room(s) {} booked for {}.", booked, receipt.customer));
        if receipt.discounted {
            println!("Total: {} (bulk discount applied)", receipt.total);
        } else {
            println!("Total: {}", receipt.total);
        }
        Ok(())
    }

    fn check_in(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt_name()?;
        self.hotel.check_in(&name)?;
        success("Checked-in.");
        Ok(())
    }

    fn check_out(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt_name()?;
        let bill = self.hotel.check_out(&name)?;
        success("Checked out.");
        println!("Total Bill: {}", bill);
        Ok(())
    }

    fn view_bill(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt_name()?;
        let bill = self.hotel.bill(&name)?;
        println!("Bill: {}", bill);
        Ok(())
    }

    fn add_food_item(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt("Food name: ")?;
        let price: Money = self.prompt_parsed("Price: ", "price")?;
        let number = self.hotel.add_food_item(&name, price)?;
        success(format!("New Food Item Added as No. {}.", number));
        Ok(())
    }

    fn order_food(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt_name()?;
        self.hotel.begin_food_order(&name)?;
        self.display_food_menu();

        loop {
            let ordered = self
                .prompt_parsed::<usize>("Enter food number: ", "food number")
                .and_then(|item| Ok(self.hotel.order_food(&name, item)?));
            match ordered {
                Ok(food) => success(format!("{} ordered.", food.name)),
                Err(ConsoleError::Hotel(err)) => failure(&err),
                Err(err) => return Err(err),
            }

            let more = self.prompt("Order more? (y/n): ")?;
            if !matches!(more.chars().next(), Some('y' | 'Y')) {
                return Ok(());
            }
        }
    }

    fn cancel_room_booking(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt_name()?;
        let receipt = self.hotel.cancel_booking(&name, Utc::now())?;
        success("Booking canceled.");
        println!(
            "Cancellation Fee ({}%): {}",
            receipt.tier.percent(),
            receipt.fee
        );
        println!("Total after fee: {}", receipt.remaining);
        println!("Released rooms: {:?}", receipt.released);
        Ok(())
    }

    fn cancel_food_order(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt_name()?;
        let item: usize = self.prompt_parsed("Enter food number to cancel: ", "food number")?;
        let food = self.hotel.cancel_food(&name, item)?;
        success(format!("{} Canceled.", food.name));
        Ok(())
    }

    fn view_customer_details(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt_name()?;
        let customer = self.hotel.customer(&name)?;
        println!("\n{}", customer);
        Ok(())
    }
}
