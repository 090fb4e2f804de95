//! Entity module - SeaORM entity definitions for the local dish store.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod dish;

pub use dish::{Column as DishColumn, Entity as Dish, Model as DishModel};
