//! BLE Peripheral
//!
//! GATT service definition and the advertise/serve loop that feeds
//! characteristic writes into the command queue.

pub mod advertising;
pub mod services;
