//! BLE Advertising and Connection Loop
//!
//! Advertise as a connectable peripheral, serve GATT on the connection
//! until the client leaves, then go back to advertising. Only one client is
//! served at a time.

use defmt::{debug, error, info};
use embassy_time::Timer;
use nrf_softdevice::ble::advertisement_builder::{
    Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
};
use nrf_softdevice::ble::gatt_server;
use nrf_softdevice::ble::peripheral::{self, Config as PeripheralConfig, ConnectableAdvertisement};
use nrf_softdevice::Softdevice;

use crate::ble::services::{ArmServiceEvent, Server};
use crate::config::{ADVERTISING_RETRY, ARM_SERVICE_UUID_LE, DEVICE_NAME};

static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .full_name(DEVICE_NAME)
    .build();

static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_128(ServiceList::Complete, &[ARM_SERVICE_UUID_LE])
    .build();

/// Advertising parameters (250 ms interval, no timeout)
pub fn advertising_config() -> PeripheralConfig {
    PeripheralConfig {
        interval: 400,
        ..PeripheralConfig::default()
    }
}

/// Serve BLE clients forever
pub async fn run(sd: &'static Softdevice, server: &Server) -> ! {
    info!("Advertising as \"{=str}\"", DEVICE_NAME);

    loop {
        let config = advertising_config();
        let adv = ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };

        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                error!("BLE advertising failed: {:?}", defmt::Debug2Format(&e));
                Timer::after(ADVERTISING_RETRY).await;
                continue;
            }
        };

        info!("Client connected (handle {:?})", conn.handle());

        // Returns when the client disconnects
        let reason = gatt_server::run(&conn, server, |event| match event {
            ArmServiceEvent::CommandQueued(command) => {
                debug!("Write accepted: {:?}", command);
            }
        })
        .await;

        info!("Client disconnected: {:?}", defmt::Debug2Format(&reason));
        debug!("Restarting advertising");
    }
}
