// src/service/mod.rs

//! `quiesce service`: print a systemd unit for the equivalent `monitor` call.
//!
//! Nothing is validated here; the unit runs `monitor`, which validates on
//! every start.

pub mod unit;

pub use unit::{ServiceUnit, quote_arg};
