//! Resgrid Core Types and Definitions
//!
//! This crate provides the foundational types for the resgrid reservation
//! calendar. It includes:
//!
//! - **Time**: Half-open reservation intervals ([`time::TimeSpan`])
//! - **Events**: Calendar events with opaque payloads ([`event::Event`])
//! - **Status**: Reservation statuses and their palettes ([`status`] module)
//! - **Colors**: CSS color handling ([`color::Color`])

pub mod color;
pub mod event;
pub mod status;
pub mod time;
