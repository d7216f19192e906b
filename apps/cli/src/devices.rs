//! Device readiness
//!
//! Playback needs at least one Spotify Connect device. The device list is
//! fetched fresh every time; availability changes whenever the user opens or
//! closes a Spotify app.

use tracing::debug;

use crate::catalog::Catalog;
use crate::console::Console;

/// Whether any playback device is currently registered.
///
/// An unreachable service and an empty device list both count as not ready.
pub async fn has_ready_device<C: Catalog + ?Sized>(catalog: &C) -> bool {
    match catalog.list_devices().await {
        Ok(devices) => {
            debug!(device_count = devices.len(), "Checked device readiness");
            !devices.is_empty()
        }
        Err(e) => {
            e.log();
            false
        }
    }
}

/// Print the device list in the order the service returned it
pub async fn show_devices<C: Catalog + ?Sized>(catalog: &C, console: &mut Console) {
    let devices = match catalog.list_devices().await {
        Ok(devices) => devices,
        Err(e) => {
            e.log();
            console.line(format!("Error getting devices: {}", e));
            Vec::new()
        }
    };

    if devices.is_empty() {
        console.line("No devices found. Make sure Spotify is open on at least one device.");
        return;
    }

    console.line("Available devices:");
    for (i, device) in devices.iter().enumerate() {
        let status = if device.is_active { "Active" } else { "Inactive" };
        console.line(format!(
            "  {}. {} ({}) - {}",
            i + 1,
            device.name,
            device.device_type,
            status
        ));
    }
}
