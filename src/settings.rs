//! Client settings persistence
//!
//! Gateway base URL and per-service endpoint prefixes, saved as JSON in the
//! platform config directory. A missing or unparsable file falls back to the
//! defaults; unknown or absent fields are tolerated so old settings files
//! keep loading.

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const SETTINGS_FILE: &str = "settings.json";
const APP_NAME: &str = "ShelterHub";

/// Endpoint prefixes for each service behind the gateway
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Endpoints {
    /// Identity service (auth endpoints live under `{identity}/auth`)
    #[serde(default = "default_identity")]
    pub identity: String,
    #[serde(default = "default_animals")]
    pub animals: String,
    #[serde(default = "default_shelters")]
    pub shelters: String,
    #[serde(default = "default_users")]
    pub users: String,
}

fn default_identity() -> String {
    "/user-management".to_string()
}

fn default_animals() -> String {
    "/animal-microservice/animals".to_string()
}

fn default_shelters() -> String {
    "/shelter-microservice/shelters".to_string()
}

fn default_users() -> String {
    "/user-microservice/users".to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            identity: default_identity(),
            animals: default_animals(),
            shelters: default_shelters(),
            users: default_users(),
        }
    }
}

/// Client settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientSettings {
    /// API gateway base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub endpoints: Endpoints,
}

fn default_api_base_url() -> String {
    "http://localhost:8765".to_string()
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            endpoints: Endpoints::default(),
        }
    }
}

fn get_settings_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME))
}

fn get_settings_path() -> Option<PathBuf> {
    get_settings_dir().map(|p| p.join(SETTINGS_FILE))
}

/// Load settings from disk, falling back to defaults
pub fn load_settings() -> ClientSettings {
    let path = match get_settings_path() {
        Some(p) => p,
        None => {
            debug!("Could not determine settings path, using defaults");
            return ClientSettings::default();
        }
    };

    if !path.exists() {
        debug!("Settings file does not exist, using defaults");
        return ClientSettings::default();
    }

    match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                error!("Failed to parse settings file: {}", e);
                ClientSettings::default()
            }
        },
        Err(e) => {
            error!("Failed to read settings file: {}", e);
            ClientSettings::default()
        }
    }
}

/// Save settings to disk
pub fn save_settings(settings: &ClientSettings) -> Result<(), String> {
    let dir = match get_settings_dir() {
        Some(d) => d,
        None => return Err("Could not determine settings directory".to_string()),
    };

    if !dir.exists() {
        if let Err(e) = fs::create_dir_all(&dir) {
            return Err(format!("Failed to create settings directory: {}", e));
        }
    }

    let path = dir.join(SETTINGS_FILE);

    let json = match serde_json::to_string_pretty(settings) {
        Ok(j) => j,
        Err(e) => return Err(format!("Failed to serialize settings: {}", e)),
    };

    match fs::write(&path, json) {
        Ok(_) => {
            info!("Saved settings to {:?}", path);
            Ok(())
        }
        Err(e) => Err(format!("Failed to write settings file: {}", e)),
    }
}
