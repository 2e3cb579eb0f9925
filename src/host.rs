//! Host implementations of the bootstrap and login-item capabilities.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::bootstrap::{AppLauncher, LaunchCompletion, LaunchError, ProcessEnumerator, RunningProcess};
use crate::login_item::LoginItemService;

// --- Process enumeration ---

/// Lists processes from `/proc`.
///
/// Linux has no bundle identifiers, so processes are identified by their
/// executable: `/proc/<pid>/exe` when readable, `/proc/<pid>/comm` otherwise.
pub struct ProcTable {
    root: PathBuf,
}

impl Default for ProcTable {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/proc"),
        }
    }
}

impl ProcTable {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn executable(&self, pid_dir: &Path) -> Option<PathBuf> {
        if let Ok(target) = std::fs::read_link(pid_dir.join("exe")) {
            return Some(target);
        }
        let comm = std::fs::read_to_string(pid_dir.join("comm")).ok()?;
        let comm = comm.trim();
        (!comm.is_empty()).then(|| PathBuf::from(comm))
    }
}

impl ProcessEnumerator for ProcTable {
    fn running_processes(&self) -> Vec<RunningProcess> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(e) => e,
            Err(e) => {
                log::warn!("process list: cannot read {}: {e}", self.root.display());
                return Vec::new();
            }
        };
        entries
            .flatten()
            .filter_map(|entry| {
                let pid = parse_pid(entry.file_name().to_str()?)?;
                Some(RunningProcess {
                    pid,
                    bundle_id: None,
                    executable: self.executable(&entry.path()),
                })
            })
            .collect()
    }
}

fn parse_pid(name: &str) -> Option<u32> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

// --- Launching ---

/// Starts the main app by spawning it and not waiting for it.
///
/// On macOS an `*.app` bundle is handed to `open`; otherwise the path is a
/// directory holding `executable`, which is run directly.
pub struct CommandLauncher {
    executable: String,
}

impl CommandLauncher {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    fn command_for(&self, bundle: &Path) -> Command {
        if cfg!(target_os = "macos") && bundle.extension().is_some_and(|ext| ext == "app") {
            let mut cmd = Command::new("open");
            cmd.arg(bundle);
            cmd
        } else {
            Command::new(bundle.join(&self.executable))
        }
    }
}

impl AppLauncher for CommandLauncher {
    fn open_application(&self, path: &Path, completion: LaunchCompletion) {
        if !path.exists() {
            completion(Err(LaunchError::NotFound(path.to_path_buf())));
            return;
        }
        let result = self
            .command_for(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_child| ())
            .map_err(|source| LaunchError::Spawn {
                path: path.to_path_buf(),
                source,
            });
        completion(result);
    }
}

// --- Login items ---

/// Login items as XDG autostart entries: one `<identifier>.desktop` file per
/// item, toggled through `X-GNOME-Autostart-enabled` and `Hidden`.
pub struct AutostartEntries {
    dir: PathBuf,
    exec: PathBuf,
}

impl AutostartEntries {
    /// Entries under `$XDG_CONFIG_HOME/autostart` launching `exec`.
    pub fn for_user(exec: PathBuf) -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join("autostart");
        Self::new(dir, exec)
    }

    pub fn new(dir: PathBuf, exec: PathBuf) -> Self {
        Self { dir, exec }
    }

    pub fn entry_path(&self, identifier: &str) -> PathBuf {
        self.dir.join(format!("{identifier}.desktop"))
    }
}

impl LoginItemService for AutostartEntries {
    fn set_enabled(&mut self, identifier: &str, enabled: bool) -> bool {
        let path = self.entry_path(identifier);
        let written = std::fs::create_dir_all(&self.dir)
            .and_then(|()| std::fs::write(&path, desktop_entry(identifier, &self.exec, enabled)));
        match written {
            Ok(()) => true,
            Err(e) => {
                log::error!("login item: cannot write {}: {e}", path.display());
                false
            }
        }
    }
}

pub fn desktop_entry(identifier: &str, exec: &Path, enabled: bool) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name=LoadViz Auto Launcher\n\
         X-LoadViz-Identifier={identifier}\n\
         Exec=\"{exec}\"\n\
         NoDisplay=true\n\
         Hidden={hidden}\n\
         X-GNOME-Autostart-enabled={enabled}\n",
        exec = exec.display(),
        hidden = !enabled,
    )
}
