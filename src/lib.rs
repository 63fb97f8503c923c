#![no_std]

//! BLE Servo Arm Firmware Library
//!
//! Drives a 4-DOF hobby-servo arm (base, two arm joints, gripper) from
//! single-character commands written over BLE, organized into layers:
//!
//! - `core`: poses, angle → duty mapping, lockstep interpolation
//! - `servo`: PWM outputs behind the `ServoOutput` seam
//! - `commands`: command decoding, queueing and execution
//! - `ble`: GATT service and the advertise/serve loop
//! - `config`: compile-time settings

pub mod ble;
pub mod commands;
pub mod config;
pub mod core;
pub mod servo;
