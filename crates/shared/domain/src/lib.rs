//! # Domain Models
//!
//! This crate contains pure data types with minimal dependencies (`serde`, `bitflags`, `strum`).
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.
//!
//! * [`inventory`]: the shape of the host's type inventory (modules, types, capabilities,
//!   methods, parameters, annotations).
//! * [`http`]: HTTP methods, binding sources and route selectors.
//! * [`settings`]: file-level settings deserialized by the kernel config loader.

pub mod constants;
pub mod http;
pub mod inventory;
pub mod settings;
