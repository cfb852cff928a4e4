//! Hardware-independent core library for cardsense
//!
//! This crate contains the platform-agnostic logic of the cardsense screens:
//! the sensor service port, observable sensor state and scoped subscriptions,
//! the light-derived dice value, UI components, pages, and page management.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on embedded
//! targets as well as desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod config;
pub mod dice;
pub mod format;
pub mod framebuffer;
pub mod pages;
pub mod sensors;
pub mod state;
pub mod ui;
