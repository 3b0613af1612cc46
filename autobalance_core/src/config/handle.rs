//! Shared, atomically replaceable policy snapshot

use super::{load_policy, ConfigError, PolicyConfig};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Cloneable handle to the live policy
///
/// Readers take one [`snapshot`](PolicyHandle::snapshot) per decision and use
/// it throughout; a concurrent reload swaps the whole `Arc` and never exposes a
/// half-updated config.
#[derive(Debug, Clone, Default)]
pub struct PolicyHandle {
    current: Arc<RwLock<Arc<PolicyConfig>>>,
}

impl PolicyHandle {
    /// Create a handle around an initial policy
    pub fn new(config: PolicyConfig) -> Self {
        PolicyHandle {
            current: Arc::new(RwLock::new(Arc::new(config.sanitized()))),
        }
    }

    /// Load the initial policy from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = load_policy(path)?;
        info!(path = %path.display(), reload = false, "policy_loaded");
        Ok(Self::new(config))
    }

    /// Current policy snapshot
    pub fn snapshot(&self) -> Arc<PolicyConfig> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in a new policy
    pub fn replace(&self, config: PolicyConfig) {
        let next = Arc::new(config.sanitized());
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }

    /// Re-read the policy file and swap it in
    ///
    /// On failure the previous snapshot stays active and the error is returned.
    pub fn reload_from(&self, path: &Path) -> Result<(), ConfigError> {
        match load_policy(path) {
            Ok(config) => {
                self.replace(config);
                info!(path = %path.display(), reload = true, "policy_loaded");
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "policy_reload_failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_snapshot_survives_replace() {
        let handle = PolicyHandle::new(PolicyConfig::default());
        let before = handle.snapshot();

        handle.replace(PolicyConfig {
            baseline_players: 10,
            ..PolicyConfig::default()
        });

        // Old snapshot is untouched, new readers see the new value
        assert_eq!(before.baseline_players, 5);
        assert_eq!(handle.snapshot().baseline_players, 10);
    }

    #[test]
    fn test_clones_share_policy() {
        let handle = PolicyHandle::default();
        let other = handle.clone();
        other.replace(PolicyConfig {
            enabled: false,
            ..PolicyConfig::default()
        });
        assert!(!handle.snapshot().enabled);
    }

    #[test]
    fn test_replace_sanitizes() {
        let handle = PolicyHandle::default();
        handle.replace(PolicyConfig {
            max_multiplier: -3.0,
            ..PolicyConfig::default()
        });
        assert!((handle.snapshot().max_multiplier - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reload_from_file() {
        let path = std::env::temp_dir().join(format!(
            "autobalance_reload_{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "BaselinePlayers = 25").unwrap();
        drop(file);

        let handle = PolicyHandle::default();
        handle.reload_from(&path).unwrap();
        assert_eq!(handle.snapshot().baseline_players, 25);

        std::fs::write(&path, "BaselinePlayers = [").unwrap();
        assert!(handle.reload_from(&path).is_err());
        assert_eq!(handle.snapshot().baseline_players, 25);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_reload_missing_file_keeps_policy() {
        let handle = PolicyHandle::default();
        let result = handle.reload_from(Path::new("/nonexistent/autobalance.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
        assert_eq!(*handle.snapshot(), PolicyConfig::default());
    }
}
