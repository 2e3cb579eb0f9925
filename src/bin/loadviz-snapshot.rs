//! Writes one indicator frame to a PNG file.

use std::path::PathBuf;
use std::process::ExitCode;

use loadviz::adapter;
use loadviz::render::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use loadviz::source::{PixelSource, active_source};

fn usage() -> ExitCode {
    eprintln!("usage: loadviz-snapshot <output.png> [width height]");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    loadviz::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (output, width, height) = match args.as_slice() {
        [output] => (PathBuf::from(output), DEFAULT_WIDTH, DEFAULT_HEIGHT),
        [output, w, h] => match (w.parse::<u32>(), h.parse::<u32>()) {
            (Ok(w), Ok(h)) => (PathBuf::from(output), w, h),
            _ => return usage(),
        },
        _ => return usage(),
    };

    let mut source = active_source();
    let mut context = match source.create_context() {
        Ok(c) => c,
        Err(e) => {
            log::error!("snapshot: {e}");
            return ExitCode::FAILURE;
        }
    };

    let Some(buffer) = source.pull(&mut context, width, height) else {
        log::error!("snapshot: source produced no frame");
        return ExitCode::FAILURE;
    };

    let image = match adapter::to_image(&buffer, width, height) {
        Ok(i) => i,
        Err(e) => {
            log::error!("snapshot: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = image.as_rgb().save(&output) {
        log::error!("snapshot: cannot write {}: {e}", output.display());
        return ExitCode::FAILURE;
    }
    log::info!("snapshot: wrote {width}x{height} to {}", output.display());
    ExitCode::SUCCESS
}
