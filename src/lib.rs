#![no_std]

#[macro_use]
mod log;

mod error;

pub mod config;
pub mod device;
pub mod fifo;
pub mod interface;
pub mod params;
pub mod sample;
pub mod sequencer;
pub mod shared;
#[cfg(test)]
mod sim;
pub mod timing;

pub use crate::device::{DriverState, Hx711};
pub use crate::error::{Error, Result};
pub use crate::params::GainChannel;
pub use crate::sample::TaggedSample;
pub use crate::shared::SharedHx711;
