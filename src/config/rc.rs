use crate::variables_model::DEFAULT_ENVIRONMENT;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const RC_FILE_NAME: &str = ".varpanelrc";

#[derive(Debug, Clone, PartialEq)]
pub struct RcConfig {
    pub show_values: bool,
    pub system_variables: bool,
    pub name_width: usize,
    pub environment: String,
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            show_values: false,
            system_variables: false,
            name_width: 24,
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .varpanelrc in:
    /// 1. Current directory
    /// 2. Home directory (~/.varpanelrc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(RC_FILE_NAME);
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(RC_FILE_NAME);
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load and parse the RC file found by `get_rc_path`, or defaults.
    pub fn load_config() -> RcConfig {
        match Self::get_rc_path() {
            Some(path) => Self::load_from(&path),
            None => RcConfig::default(),
        }
    }

    /// Load a specific RC file. Unreadable files fall back to defaults.
    pub fn load_from(path: &Path) -> RcConfig {
        let mut config = RcConfig::default();
        match fs::read_to_string(path) {
            Ok(content) => {
                Self::parse_config_content(&content, &mut config);
                debug!(path = %path.display(), ?config, "Loaded rc file");
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Could not read rc file"),
        }
        config
    }

    fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    fn parse_config_line(line: &str, config: &mut RcConfig) {
        // Remove inline comments
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();

        if let Some(stripped) = line.strip_prefix("set ") {
            match stripped.trim() {
                "showvalues" => config.show_values = true,
                "noshowvalues" => config.show_values = false,
                "system" => config.system_variables = true,
                "nosystem" => config.system_variables = false,
                setting => {
                    if let Some((key, value)) = setting.split_once('=') {
                        Self::apply_pair(key.trim(), value.trim(), config);
                    }
                }
            }
        } else if let Some((key, value)) = line.split_once('=') {
            Self::apply_pair(key.trim(), value.trim(), config);
        }
    }

    fn apply_pair(key: &str, value: &str, config: &mut RcConfig) {
        match key {
            "show_values" | "showvalues" => config.show_values = Self::parse_bool(value),
            "system_variables" | "system" => config.system_variables = Self::parse_bool(value),
            "name_width" | "namewidth" => {
                if let Ok(width) = value.parse::<usize>() {
                    if (8..=64).contains(&width) {
                        config.name_width = width;
                    }
                }
            }
            "environment" | "env" => {
                if !value.is_empty() {
                    config.environment = value.to_string();
                }
            }
            _ => {} // Unknown setting, ignore
        }
    }

    fn parse_bool(value: &str) -> bool {
        value == "true" || value == "1" || value == "yes"
    }

    /// Generate a sample RC file content
    pub fn generate_sample_rc() -> String {
        r#"# varpanel configuration file (.varpanelrc)
# Lines starting with # or " are comments

set showvalues         # Show values unmasked (or set noshowvalues)
set system             # Show system variables on start (or set nosystem)
set namewidth=24       # Width of the name column

# Alternative key=value syntax:
# show_values=true
# system_variables=false
# name_width=24
# environment=default
"#
        .to_string()
    }
}
