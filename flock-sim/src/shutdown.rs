use anyhow::{Context, Result};
use flock_core::StopHandle;

/// Stops the simulation when the process receives Ctrl-C.
///
/// The signal is awaited on a small single-threaded runtime in a background
/// thread, so the simulation loop itself stays synchronous.
pub fn stop_on_ctrl_c(handle: StopHandle) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build signal runtime")?;

    std::thread::Builder::new()
        .name("ctrl-c".into())
        .spawn(move || match runtime.block_on(tokio::signal::ctrl_c()) {
            Ok(()) => {
                log::info!("Interrupt received, stopping after the current step");
                handle.stop();
            }
            Err(e) => log::warn!("Failed to listen for Ctrl-C: {}", e),
        })
        .context("Failed to spawn signal thread")?;

    Ok(())
}
