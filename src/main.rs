//! Breakout entry point

use breakout::AppError;

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Breakout starting...");

    breakout::app::run()?;

    log::info!("Goodbye");
    Ok(())
}
