pub mod core {
    pub mod command;
    pub mod controller;
    pub mod domain;
    pub mod events;
    pub mod repository;
    pub mod sharing;
}

pub mod utils {
    pub mod date;
    pub mod ddb;
    pub mod memory;
}

pub mod gateway;

pub mod users;
pub mod items;
pub mod bookings;
pub mod requests;
