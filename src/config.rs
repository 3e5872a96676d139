use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub threshold_minutes: Option<u64>,
    #[serde(default)]
    pub reset_every: Option<u64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub debug: bool,
}

impl Config {
    pub fn load() -> Self {
        Self::load_internal(false)
    }

    pub fn load_quiet() -> Self {
        Self::load_internal(true)
    }

    fn load_internal(quiet: bool) -> Self {
        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        tracing::debug!("loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        if !quiet {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Project-local: ./.progress-log.toml
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".progress-log.toml"));
        }

        // 2. XDG config: ~/.config/progress-log/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("progress-log").join("config.toml"));
        }

        // 3. Platform config dir (Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("progress-log").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 4. Home directory: ~/.progress-log.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".progress-log.toml"));
        }

        paths
    }
}
