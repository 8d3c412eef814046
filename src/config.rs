use anyhow::{bail, Context, Result};
use reconcile::ReconcileRequest;
use restconf::{DeviceConfig, Transport};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::DeviceArgs;

/// Get the config directory path (~/.config/rconf)
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("rconf"))
}

/// Default device profile, used when a state file has no [device] section
pub fn device_profile_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("device.toml"))
}

/// Expand `~` and environment variables in a user-supplied path
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(&raw).as_ref()),
    }
}

// ============================================================================
// State File
// ============================================================================

/// A state file: device settings plus the states to reconcile, in order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateFile {
    #[serde(default)]
    pub device: Option<DeviceConfig>,
    #[serde(default, alias = "state")]
    pub states: Vec<ReconcileRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Json,
}

fn detect_format(path: &Path) -> Option<FileFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(FileFormat::Toml),
        Some(ext) if ext.eq_ignore_ascii_case("json") => Some(FileFormat::Json),
        _ => None,
    }
}

impl StateFile {
    /// Load a state file, picking the format from its extension
    ///
    /// Files without a known extension are tried as TOML, then JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let path = expand_path(path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;

        let file = match detect_format(&path) {
            Some(FileFormat::Toml) => toml::from_str(&content)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?,
            Some(FileFormat::Json) => serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?,
            None => match toml::from_str::<StateFile>(&content) {
                Ok(file) => file,
                Err(toml_err) => serde_json::from_str(&content).map_err(|json_err| {
                    anyhow::anyhow!(
                        "{} is neither TOML ({toml_err}) nor JSON ({json_err})",
                        path.display()
                    )
                })?,
            },
        };

        log::debug!("Loaded state file {}", path.display());
        Ok(file)
    }

    /// Names that appear more than once
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for state in &self.states {
            if !seen.insert(state.name.as_str()) && !duplicates.contains(&state.name.as_str()) {
                duplicates.push(state.name.as_str());
            }
        }
        duplicates
    }

    /// States to run, optionally narrowed to one name
    pub fn select(&self, only: Option<&str>) -> Result<Vec<ReconcileRequest>> {
        if self.states.is_empty() {
            bail!("State file declares no states");
        }
        match only {
            None => Ok(self.states.clone()),
            Some(name) => {
                let selected: Vec<_> = self
                    .states
                    .iter()
                    .filter(|s| s.name == name)
                    .cloned()
                    .collect();
                if selected.is_empty() {
                    bail!("No state named '{name}'");
                }
                Ok(selected)
            }
        }
    }
}

// ============================================================================
// Device Settings
// ============================================================================

/// Load the default device profile, if one exists
fn load_device_profile() -> Result<Option<DeviceConfig>> {
    let path = device_profile_path()?;
    if !path.exists() {
        log::debug!("No device profile at {}", path.display());
        return Ok(None);
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let device = toml::from_str(&content)
        .with_context(|| format!("Invalid device profile {}", path.display()))?;
    log::debug!("Loaded device profile {}", path.display());
    Ok(Some(device))
}

/// Build device settings: state file, else the default profile, then CLI overrides
pub fn resolve_device(from_file: Option<&DeviceConfig>, args: &DeviceArgs) -> Result<DeviceConfig> {
    let base = match from_file {
        Some(device) => Some(device.clone()),
        None => load_device_profile()?,
    };
    let device = apply_overrides(base.unwrap_or_else(|| DeviceConfig::new("")), args);

    if device.host.trim().is_empty() {
        bail!(
            "No device host configured.\n\
             Add a [device] section to the state file, create {}, or pass --host",
            device_profile_path()?.display()
        );
    }
    Ok(device)
}

fn apply_overrides(mut device: DeviceConfig, args: &DeviceArgs) -> DeviceConfig {
    if let Some(host) = &args.host {
        device.host = host.clone();
    }
    if let Some(username) = &args.username {
        device.username = Some(username.clone());
    }
    if let Some(password) = &args.password {
        device.password = Some(password.clone());
    }
    if args.insecure {
        device.verify_tls = false;
    }
    if args.plain_http {
        device.transport = Transport::Http;
    }
    if let Some(timeout) = args.timeout {
        device.timeout_secs = timeout;
    }
    device
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    const TOML_STATES: &str = r#"
[device]
host = "192.0.2.1"
username = "admin"
verify_tls = false
root = "restconf/data"

[[states]]
name = "uplink"
uri = "Cisco-IOS-XE-native:native/interface/GigabitEthernet=1%2F0%2F3"
method = "PATCH"

[states.config."Cisco-IOS-XE-native:GigabitEthernet"]
description = "uplink"
name = "1/0/3"

[[states]]
name = "loopback"
uri = "Cisco-IOS-XE-native:native/interface/Loopback=1"
method = "PUT"
init_uri = "Cisco-IOS-XE-native:native/interface"
config = { "Cisco-IOS-XE-native:Loopback" = { name = 1 } }
"#;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_toml_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "states.toml", TOML_STATES);

        let file = StateFile::load(&path).unwrap();
        let device = file.device.as_ref().unwrap();
        assert_eq!(device.host, "192.0.2.1");
        assert!(!device.verify_tls);

        assert_eq!(file.states.len(), 2);
        let uplink = &file.states[0];
        assert_eq!(uplink.method, "PATCH");
        assert_eq!(
            uplink.desired_config,
            json!({"Cisco-IOS-XE-native:GigabitEthernet": {"description": "uplink", "name": "1/0/3"}})
        );
        let loopback = &file.states[1];
        assert_eq!(
            loopback.fallback_uri.as_deref(),
            Some("Cisco-IOS-XE-native:native/interface")
        );
        assert_eq!(loopback.fallback_method, "PATCH");
    }

    #[test]
    fn test_load_json_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let content = json!({
            "states": [{
                "name": "iface1",
                "uri": "/a",
                "method": "PUT",
                "config": {"x": 1},
                "init_uri": "/b",
                "init_method": "POST"
            }]
        });
        let path = write_file(dir.path(), "states.json", &content.to_string());

        let file = StateFile::load(&path).unwrap();
        assert!(file.device.is_none());
        assert_eq!(file.states[0].fallback_method, "POST");
    }

    #[test]
    fn test_load_unknown_extension_falls_back_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let content = r#"{"states": [{"name": "a", "uri": "/a", "method": "PUT", "config": {"x": 1}}]}"#;
        let path = write_file(dir.path(), "states.conf", content);

        let file = StateFile::load(&path).unwrap();
        assert_eq!(file.states.len(), 1);
    }

    #[test]
    fn test_load_reports_bad_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "states.toml", "[[states]\nname =");
        let err = StateFile::load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_select_and_duplicates() {
        let mut file: StateFile = toml::from_str(TOML_STATES).unwrap();
        assert_eq!(file.select(Some("loopback")).unwrap().len(), 1);
        assert!(file.select(Some("missing")).is_err());
        assert!(file.duplicate_names().is_empty());

        let copy = file.states[0].clone();
        file.states.push(copy);
        assert_eq!(file.duplicate_names(), vec!["uplink"]);
    }

    #[test]
    fn test_select_empty_file() {
        assert!(StateFile::default().select(None).is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file_device = DeviceConfig::new("192.0.2.1");
        let args = DeviceArgs {
            host: Some("sw2".to_string()),
            username: Some("ops".to_string()),
            password: Some("secret".to_string()),
            insecure: true,
            plain_http: true,
            timeout: Some(5),
        };

        let device = resolve_device(Some(&file_device), &args).unwrap();
        assert_eq!(device.host, "sw2");
        assert_eq!(device.username.as_deref(), Some("ops"));
        assert!(!device.verify_tls);
        assert_eq!(device.transport, Transport::Http);
        assert_eq!(device.timeout_secs, 5);
    }

    #[test]
    fn test_file_device_used_without_overrides() {
        let file_device = DeviceConfig::new("192.0.2.1");
        let device = resolve_device(Some(&file_device), &DeviceArgs::default()).unwrap();
        assert_eq!(device, file_device);
    }
}
