//! Endpoints the field editor calls while a user edits an item.

pub mod handlers;
