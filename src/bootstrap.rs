//! Login-time bootstrap: start the main app unless it is already running.
//!
//! In a bundle install the helper lives inside the main bundle at
//! `<Main>.app/Contents/Library/LoginItems/<Helper>.app`, so the main bundle
//! root is the helper bundle with [`MAIN_BUNDLE_DEPTH`] trailing components
//! removed. In a flat install (`cargo install`, a build directory) the helper
//! binary sits next to the main binary.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Components between the main bundle root and the helper bundle, the helper
/// bundle itself included.
pub const MAIN_BUNDLE_DEPTH: usize = 4;

const BUNDLE_EXTENSION: &str = "app";

/// Remove `count` trailing components from `path`.
///
/// Returns `None` when `path` does not have enough components to leave a
/// non-empty result.
pub fn strip_trailing_components(path: &Path, count: usize) -> Option<PathBuf> {
    let mut resolved = path;
    for _ in 0..count {
        resolved = resolved.parent()?;
    }
    if resolved.as_os_str().is_empty() {
        return None;
    }
    Some(resolved.to_path_buf())
}

/// The bundle directory enclosing `executable`: the nearest ancestor named
/// `*.app`, or `None` when it is not inside a bundle.
pub fn own_bundle_path(executable: &Path) -> Option<PathBuf> {
    executable
        .ancestors()
        .find(|p| p.extension().is_some_and(|ext| ext == BUNDLE_EXTENSION))
        .map(Path::to_path_buf)
}

/// Where the helper is installed, which decides where the main app is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelperInstall {
    /// Helper bundle nested [`MAIN_BUNDLE_DEPTH`] components below the main
    /// bundle root.
    Nested(PathBuf),
    /// Helper executable in the same directory as the main executable.
    Sibling(PathBuf),
}

impl HelperInstall {
    /// Classify the helper from its own executable path.
    pub fn from_executable(executable: &Path) -> Self {
        match own_bundle_path(executable) {
            Some(bundle) => Self::Nested(bundle),
            None => Self::Sibling(executable.to_path_buf()),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Nested(p) | Self::Sibling(p) => p.as_path(),
        }
    }

    /// The directory the launcher is handed: the main bundle root, or the
    /// directory holding both binaries.
    pub fn main_bundle_path(&self) -> Option<PathBuf> {
        match self {
            Self::Nested(bundle) => strip_trailing_components(bundle, MAIN_BUNDLE_DEPTH),
            Self::Sibling(exe) => strip_trailing_components(exe, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningProcess {
    pub pid: u32,
    pub bundle_id: Option<String>,
    pub executable: Option<PathBuf>,
}

impl RunningProcess {
    fn executable_name(&self) -> Option<&str> {
        self.executable.as_deref()?.file_name()?.to_str()
    }
}

/// How the main app shows up in a process listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    pub bundle_id: String,
    /// File name of the main executable, for hosts without bundle ids.
    pub executable: String,
}

impl AppIdentity {
    pub fn matches(&self, process: &RunningProcess) -> bool {
        process.bundle_id.as_deref() == Some(self.bundle_id.as_str())
            || process.executable_name() == Some(self.executable.as_str())
    }
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no application at {0}")]
    NotFound(PathBuf),
    #[error("failed to launch {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait ProcessEnumerator {
    fn running_processes(&self) -> Vec<RunningProcess>;
}

pub type LaunchCompletion = Box<dyn FnOnce(Result<(), LaunchError>) + Send + 'static>;

pub trait AppLauncher {
    /// Ask the host to start the application at `path`. `completion` runs
    /// once the host has accepted or rejected the request; nobody waits for
    /// the app itself to finish starting.
    fn open_application(&self, path: &Path, completion: LaunchCompletion);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Checking,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    AlreadyRunning { pid: u32 },
    LaunchRequested(PathBuf),
    /// The helper path is too short to contain a main app.
    Unresolvable,
}

/// One-shot check-and-launch. Never retries.
pub struct AutoLauncher<P, L> {
    identity: AppIdentity,
    helper: HelperInstall,
    processes: P,
    launcher: L,
    state: BootstrapState,
    outcome: Option<BootstrapOutcome>,
}

impl<P: ProcessEnumerator, L: AppLauncher> AutoLauncher<P, L> {
    pub fn new(identity: AppIdentity, helper: HelperInstall, processes: P, launcher: L) -> Self {
        Self {
            identity,
            helper,
            processes,
            launcher,
            state: BootstrapState::Checking,
            outcome: None,
        }
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Where the main app is expected to be installed.
    pub fn main_bundle_path(&self) -> Option<PathBuf> {
        self.helper.main_bundle_path()
    }

    /// Run the check once. Later calls return the first outcome without
    /// touching the host again.
    pub fn run(&mut self) -> BootstrapOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        let outcome = self.check_and_launch();
        self.state = BootstrapState::Done;
        self.outcome = Some(outcome.clone());
        outcome
    }

    fn check_and_launch(&self) -> BootstrapOutcome {
        if let Some(process) = self
            .processes
            .running_processes()
            .iter()
            .find(|p| self.identity.matches(p))
        {
            log::info!(
                "auto-launch: {} already running (pid {})",
                self.identity.bundle_id,
                process.pid
            );
            return BootstrapOutcome::AlreadyRunning { pid: process.pid };
        }

        let Some(path) = self.main_bundle_path() else {
            log::error!(
                "auto-launch: cannot resolve main bundle from {}",
                self.helper.path().display()
            );
            return BootstrapOutcome::Unresolvable;
        };

        log::info!("auto-launch: launching {}", path.display());
        let shown = path.display().to_string();
        self.launcher.open_application(
            &path,
            Box::new(move |result| match result {
                Ok(()) => log::info!("auto-launch: started {shown}"),
                Err(e) => log::error!("auto-launch: {e}"),
            }),
        );
        BootstrapOutcome::LaunchRequested(path)
    }
}
