/*
Crossing Example

Demonstrates a traffic signal controller cycling between red and green while
a handful of vehicles block until the signal lets them cross.

Usage:
    APP_ENVIRONMENT=dev cargo run --example crossing

Without APP_ENVIRONMENT=dev, logs are written to files under `logs/` instead
of the terminal.
*/

use std::error::Error;
use std::sync::Arc;

use tracing::info;
use trafficlight::controller::SignalController;
use trafficlight::error::TrafficError;
use trafficlight::state::phase::SignalPhase;
use trafficlight_config::shared::{ControllerConfig, CycleConfig};
use trafficlight_telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _log_flusher = init_tracing("crossing")?;

    let config = ControllerConfig {
        id: 1,
        cycle: CycleConfig::default(),
    };

    let mut controller = SignalController::new(config);
    controller.start().await?;

    let controller = Arc::new(controller);

    let mut vehicles = Vec::new();
    for vehicle in 1..=4 {
        let controller = controller.clone();
        vehicles.push(tokio::spawn(async move {
            info!(
                "vehicle {vehicle} waiting at a {} signal",
                controller.current_phase()
            );

            controller.wait_for_phase(SignalPhase::Green).await?;

            info!("vehicle {vehicle} crossing");

            Ok::<_, TrafficError>(())
        }));
    }

    for vehicle in vehicles {
        vehicle.await??;
    }

    let controller = Arc::into_inner(controller).expect("all vehicles have crossed");
    controller.shutdown_and_wait().await?;

    Ok(())
}
