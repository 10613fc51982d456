//! Variables list and overlay widgets for a REST client, rendered in the
//! terminal.
//!
//! The widgets in [`variables_model`] are plain state objects; every user
//! gesture becomes an outbound event on a [`store::VariablesPort`], and the
//! store hands fresh collections back. [`view`] draws the widget projections
//! with crossterm and [`controller`] maps keys to widget operations.

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod store;
pub mod variables_model;
pub mod view;
