//! Login item: starts LoadViz unless it is already running, then exits.

use std::process::ExitCode;

use loadviz::bootstrap::{AutoLauncher, BootstrapOutcome, HelperInstall};
use loadviz::config::Config;
use loadviz::host::{CommandLauncher, ProcTable};

fn main() -> ExitCode {
    loadviz::init_logging();

    let exe = match std::env::current_exe() {
        Ok(p) => p,
        Err(e) => {
            log::error!("auto-launch: cannot locate own executable: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = Config::load();
    let mut auto = AutoLauncher::new(
        config.main_identity(),
        HelperInstall::from_executable(&exe),
        ProcTable::default(),
        CommandLauncher::new(config.executable.clone()),
    );

    match auto.run() {
        BootstrapOutcome::AlreadyRunning { .. } | BootstrapOutcome::LaunchRequested(_) => {
            ExitCode::SUCCESS
        }
        BootstrapOutcome::Unresolvable => ExitCode::FAILURE,
    }
}
