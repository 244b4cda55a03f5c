//! Async runtime layer: the driver event loop and host command channel.

pub mod driver;

pub use driver::{Driver, DriverHandle, HostCommand};
