//! Loads the block colors and the world described by `blockmap.properties`.
use std::sync::Arc;

use blockmap::config::Settings;
use blockmap::consts::{file_paths, messages};
use blockmap::{fs_manager, logging, BlockColors, LogReporter, RegionFileWorld, Reporter};
use log::{error, info, warn, LevelFilter};

fn main() {
    let settings = init();

    // The log level comes from the settings, so this is the earliest we can log.
    logging::init(
        settings
            .as_ref()
            .map_or(LevelFilter::Info, |(settings, _)| settings.log_level),
    );

    info!("{}", *messages::STARTING);

    let settings = match settings {
        Ok((settings, created)) => {
            if created {
                info!("Created default settings file {}", file_paths::SETTINGS);
            }
            settings
        }
        Err(e) => {
            error!("Failed to read the settings: {e}. \nExiting...");
            gracefully_exit(ExitCode::Failure);
        }
    };

    if let Err(e) = start(&settings) {
        error!("{e}. \nExiting...");
        gracefully_exit(ExitCode::Failure);
    }

    gracefully_exit(ExitCode::Success);
}

/// Makes sure the settings file exists and reads it. Also tells whether the file was created.
fn init() -> Result<(Settings, bool), Box<dyn std::error::Error>> {
    let created = fs_manager::init(file_paths::SETTINGS)?;
    let settings = Settings::load(file_paths::SETTINGS)?;
    Ok((settings, created))
}

/// Loads everything once and logs what was found.
fn start(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let reporter: Arc<dyn Reporter> = Arc::new(LogReporter);

    let mut colors = BlockColors::new(reporter.clone()).with_extractor(settings.extractor());
    let summary = colors.load(&settings.textures_archive, &settings.color_cache)?;
    info!(
        "Loaded {} block colors with the {} policy ({} from cache, {} recomputed)",
        colors.len(),
        settings.extraction_policy,
        summary.cache_hits,
        summary.recomputed
    );
    if summary.is_dirty() && !summary.cache_written {
        warn!("The color cache could not be updated");
    }

    let world = RegionFileWorld::open(&settings.world_root, reporter)?;
    let size = world.size();
    info!(
        "Loaded {} regions from {}, world size {}x{} blocks",
        world.len(),
        world.root().display(),
        size.width,
        size.height
    );

    Ok(())
}

/// Enum representing standardized exit codes.
pub enum ExitCode {
    Success,
    Failure,
}

/// Exits the process with an exit code.
pub fn gracefully_exit(exit_code: ExitCode) -> ! {
    let numerical_exit_code: i32 = match exit_code {
        ExitCode::Success => {
            info!("{}", *messages::DONE);
            // 0 means success
            0
        }
        ExitCode::Failure => {
            warn!("{}", *messages::FAILED);
            // 1 mean general error
            1
        }
    };

    if numerical_exit_code != 0 {
        warn!("{}", messages::shutdown_code(numerical_exit_code));
    }

    std::process::exit(numerical_exit_code);
}
