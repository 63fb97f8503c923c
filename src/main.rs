#![no_std]
#![no_main]

use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::peripherals::PWM0;
use embassy_time::{Delay, Timer};
use nrf_softdevice::Softdevice;
use panic_probe as _;

use servo_arm_firmware::ble::{advertising, services::Server};
use servo_arm_firmware::commands;
use servo_arm_firmware::config::{self, MotionConfig, HEARTBEAT_INTERVAL, SERVO_DUTY};
use servo_arm_firmware::core::motion::Arm;
use servo_arm_firmware::servo::NrfServoPwm;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Starting servo arm firmware");

    let p = embassy_nrf::init(config::embassy_config());

    // Servo signal pins, one PWM channel each: base, joint1, joint2, gripper
    let pwm = NrfServoPwm::new(p.PWM0, p.P0_03, p.P0_04, p.P0_28, p.P0_29);
    let mut arm = Arm::new(pwm, SERVO_DUTY, MotionConfig::default());
    if let Err(e) = arm.engage() {
        error!("Failed to engage servos: {:?}", e);
    }

    info!("Embassy initialized, configuring SoftDevice...");

    let sd = Softdevice::enable(&config::softdevice_config());
    info!("SoftDevice enabled successfully!");

    let server = Server::new(sd).unwrap_or_else(|_| {
        defmt::panic!("Failed to initialize BT server");
    });
    let sd: &'static Softdevice = sd;

    // The SoftDevice event loop has to run before any BLE call completes
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(ble_task(sd, server)));
    unwrap!(spawner.spawn(motion_task(arm)));

    info!("System initialized, entering main loop");

    loop {
        Timer::after(HEARTBEAT_INTERVAL).await;
        info!("Heartbeat - system running");
    }
}

#[embassy_executor::task]
async fn ble_task(sd: &'static Softdevice, server: Server) {
    info!("Starting BLE task...");
    advertising::run(sd, &server).await
}

#[embassy_executor::task]
async fn motion_task(mut arm: Arm<NrfServoPwm<'static, PWM0>>) {
    info!("Motion task ready at {}", arm.pose());
    commands::process_commands(&mut arm, &mut Delay).await
}

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}
