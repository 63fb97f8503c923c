//! nRF52 PWM servo driver
//!
//! All four servos share one PWM instance. The counter runs at 1 MHz
//! (Div16 from the 16 MHz PWM clock) with a top of 20 000, so pulse widths
//! are in microseconds at a 50 Hz frame rate.
//!
//! `SimplePwm` leaves every channel at rising-edge polarity: the pin is low
//! until the counter reaches the compare value and high from there to top.
//! A pulse of `duty` ticks is therefore written as `top - duty`.

use defmt::debug;
use embassy_nrf::gpio::Pin;
use embassy_nrf::pwm::{Instance, Prescaler, SimplePwm};
use embassy_nrf::Peri;

use crate::config::{PWM_PRESCALER_DIV, PWM_TOP_TICKS};
use crate::core::pose::Joint;
use crate::servo::{ServoError, ServoOutput};

/// Four-channel hobby servo PWM
pub struct NrfServoPwm<'d, T: Instance> {
    pwm: SimplePwm<'d, T>,
    top: u16,
}

impl<'d, T: Instance> NrfServoPwm<'d, T> {
    /// Configure `pwm` with one servo per channel, in [`Joint`] order
    pub fn new(
        pwm: Peri<'d, T>,
        base: Peri<'d, impl Pin>,
        joint1: Peri<'d, impl Pin>,
        joint2: Peri<'d, impl Pin>,
        gripper: Peri<'d, impl Pin>,
    ) -> Self {
        let pwm = SimplePwm::new_4ch(pwm, base, joint1, joint2, gripper);
        pwm.set_prescaler(prescaler());
        pwm.set_max_duty(PWM_TOP_TICKS);
        debug!(
            "PWM configured: prescaler=/{}, top={} ticks",
            PWM_PRESCALER_DIV, PWM_TOP_TICKS
        );

        Self { pwm, top: PWM_TOP_TICKS }
    }

    /// Raw compare value currently loaded for `joint`
    pub fn compare(&self, joint: Joint) -> u16 {
        self.pwm.duty(joint.channel())
    }
}

impl<T: Instance> ServoOutput for NrfServoPwm<'_, T> {
    fn set_duty(&mut self, joint: Joint, duty: u16) -> Result<(), ServoError> {
        if duty > self.top {
            return Err(ServoError::DutyOutOfRange { joint, duty, max: self.top });
        }
        self.pwm.set_duty(joint.channel(), self.top - duty);
        Ok(())
    }
}

const fn prescaler() -> Prescaler {
    match PWM_PRESCALER_DIV {
        1 => Prescaler::Div1,
        2 => Prescaler::Div2,
        4 => Prescaler::Div4,
        8 => Prescaler::Div8,
        32 => Prescaler::Div32,
        64 => Prescaler::Div64,
        128 => Prescaler::Div128,
        _ => Prescaler::Div16,
    }
}
