use crate::core::domain::Identifiable;

pub mod command;
pub mod domain;
pub mod dto;
pub mod factory;
pub mod repository;
pub mod controller;

// User abstracts the account of a person sharing or booking items.
pub(crate) trait User: Identifiable {
    fn name(&self) -> String;
    fn email(&self) -> String;
}
