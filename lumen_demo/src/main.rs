//! Lumen demo application
//!
//! Opens a window, brings up a Vulkan instance with a surface for it, prints
//! what every GPU can do, then idles until the window is closed.

use std::thread;
use std::time::Duration;

use lumen::foundation::logging;
use lumen::prelude::*;

const CONFIG_PATH: &str = "lumen.toml";
const FRAME_TIME: Duration = Duration::from_millis(16);

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = BootstrapConfig::load_or_default(CONFIG_PATH)?;
    config.validate()?;

    let window = &config.window;
    let mut session = WindowSession::new(GlfwBackend::new(), window.title.as_str(), window.width, window.height);
    session.create()?;

    let instance = GraphicsInstance::from_window(&session.properties(), &config.application, &config.graphics)?;
    if !instance.has_surface() {
        log::warn!("Running without a presentation surface");
    }

    let devices = instance.enumerate_physical_devices(&config.graphics.device_extensions)?;
    match select_device(&devices, &config.graphics.device_extensions) {
        Some(device) => log::info!("Selected {} ({:?})", device.name(), device.device_type()),
        None => log::warn!("No device supports everything requested"),
    }

    while session.is_running() {
        session.poll_event();
        session.render();
        thread::sleep(FRAME_TIME);
    }

    // After a quit event the window is already gone and the surface outlives
    // it until here, unused. Otherwise the surface goes first.
    drop(devices);
    drop(instance);
    session.close();

    log::info!("Shut down cleanly");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting Lumen demo");

    run().map_err(|e| {
        log::error!("Fatal: {e}");
        e
    })
}
