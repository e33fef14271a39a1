use crate::core::domain::Identifiable;

pub mod command;
pub mod domain;
pub mod dto;
pub mod factory;
pub mod repository;
pub mod controller;

// Item abstracts a shareable thing listed by its owner; only available items
// can be booked.
pub(crate) trait Item: Identifiable {
    fn owner_id(&self) -> String;
    fn name(&self) -> String;
    fn is_available(&self) -> bool;
}
