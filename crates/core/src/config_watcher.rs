use crate::config::AppConfig;
use crate::config_loader::{profile_path, ConfigLoader};
use anyhow::Result;
use notify::{Event, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;
use tokio::sync::watch;

/// How often the blocking watch loop checks whether anyone is still listening.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct ConfigWatcher {
    tx: watch::Sender<AppConfig>,
}

impl ConfigWatcher {
    /// Creates a new configuration watcher with an initial configuration.
    ///
    /// Returns a tuple of the watcher and a receiver for configuration updates.
    #[must_use]
    pub fn new(initial_config: AppConfig) -> (Self, watch::Receiver<AppConfig>) {
        let (tx, rx) = watch::channel(initial_config);
        (Self { tx }, rx)
    }

    /// Watches the configuration file, and its profile overlay if any, for
    /// changes and broadcasts updates.
    ///
    /// The containing directory is watched so that a profile file created
    /// after startup, or a file replaced by an editor, is still picked up.
    /// A file that fails to load is logged and the previous configuration
    /// stays in effect. Returns shortly after every receiver has been dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if file watching cannot be initiated or if the watcher task fails.
    pub async fn watch(&self, config_path: impl Into<PathBuf>, profile: Option<String>) -> Result<()> {
        let tx = self.tx.clone();
        let config_path = config_path.into();

        let mut watched_names = vec![config_path.file_name().map(OsString::from)];
        if let Some(profile) = &profile {
            watched_names.push(profile_path(&config_path, profile).file_name().map(OsString::from));
        }
        let watched_names: Vec<OsString> = watched_names.into_iter().flatten().collect();

        let watch_dir = match config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        tokio::task::spawn_blocking(move || {
            let (notify_tx, notify_rx) = std::sync::mpsc::channel();

            let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            })?;

            watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

            loop {
                let event = match notify_rx.recv_timeout(POLL_INTERVAL) {
                    Ok(event) => event,
                    Err(RecvTimeoutError::Timeout) => {
                        if tx.is_closed() {
                            break;
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                };

                if !(event.kind.is_modify() || event.kind.is_create()) {
                    continue;
                }
                let relevant = event.paths.iter().any(|path| {
                    path.file_name()
                        .is_some_and(|name| watched_names.iter().any(|w| w == name))
                });
                if !relevant {
                    continue;
                }

                tracing::info!(path = %config_path.display(), "Config file changed, reloading...");
                match ConfigLoader::load_from_with_profile(&config_path, profile.as_deref()) {
                    Ok(new_config) => {
                        if tx.send(new_config).is_err() {
                            break;
                        }
                        tracing::info!("Config reloaded successfully");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to reload config, keeping previous");
                    }
                }
            }

            Ok::<_, anyhow::Error>(())
        })
        .await??;

        Ok(())
    }
}
