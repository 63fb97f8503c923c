//! Servo Outputs
//!
//! The motion code only needs "put this compare value on this joint's
//! channel". Hardware PWM lives behind [`ServoOutput`] so the interpolation
//! can be exercised against a recording mock.

use defmt::Format;

use crate::core::pose::Joint;

pub mod pwm;

pub use pwm::NrfServoPwm;

/// Servo output errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum ServoError {
    /// Compare value larger than the PWM period
    DutyOutOfRange { joint: Joint, duty: u16, max: u16 },
}

/// Sink for per-joint PWM compare values
pub trait ServoOutput {
    /// Drive `joint` with compare value `duty`
    fn set_duty(&mut self, joint: Joint, duty: u16) -> Result<(), ServoError>;
}

impl<T: ServoOutput + ?Sized> ServoOutput for &mut T {
    fn set_duty(&mut self, joint: Joint, duty: u16) -> Result<(), ServoError> {
        (**self).set_duty(joint, duty)
    }
}
