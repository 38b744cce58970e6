use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_company")]
    pub company: String,
    #[serde(default = "default_cost_per_liter")]
    pub cost_per_liter: f64,
    #[serde(default = "default_cost_code")]
    pub default_cost_code: String,
    #[serde(default = "default_cost_codes")]
    pub cost_codes: BTreeMap<String, String>,
    #[serde(default = "default_start_time")]
    pub default_start_time: String,
    #[serde(default)]
    pub abort_on_delete_failure: bool,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_company() -> String {
    "KFC".to_string()
}
fn default_cost_per_liter() -> f64 {
    21.0
}
fn default_cost_code() -> String {
    "KFC-0001-0001-0003".to_string()
}
fn default_cost_codes() -> BTreeMap<String, String> {
    [
        ("ALEX", "KFC-0001-0001-0001"),
        ("BALLYCLARE", "KFC-0001-0001-0002-0004"),
        ("BERGBRON", "KFC-0001-0001-0003"),
        ("BEYERSPARK", "KFC-0001-0001-0003"),
        ("RANDBURG", "KFC-0001-0001-0003"),
        ("MOBILE 3", "KFC-0001-0001-0003"),
        ("FARRAMERE", "KFC-0001-0001-0003"),
    ]
    .into_iter()
    .map(|(site, code)| (site.to_string(), code.to_string()))
    .collect()
}
fn default_start_time() -> String {
    "06:00:00".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            company: default_company(),
            cost_per_liter: default_cost_per_liter(),
            default_cost_code: default_cost_code(),
            cost_codes: default_cost_codes(),
            default_start_time: default_start_time(),
            abort_on_delete_failure: false,
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rfuelimport")
        } else {
            let home = env::var("HOME")
                .map(PathBuf::from)
                .ok()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."));
            home.join(".rfuelimport")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rfuelimport.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rfuelimport.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rfuelimport.sqlite")
        };

        let config = Self::with_database(db_path.clone());

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())
                .map_err(|_| AppError::ConfigSave)?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/fuel.sqlite\n").unwrap();
        assert_eq!(cfg.company, "KFC");
        assert_eq!(cfg.cost_per_liter, 21.0);
        assert_eq!(cfg.default_start_time, "06:00:00");
        assert_eq!(cfg.cost_codes.get("ALEX").unwrap(), "KFC-0001-0001-0001");
        assert!(!cfg.abort_on_delete_failure);
    }

    #[test]
    fn explicit_cost_codes_replace_defaults() {
        let yaml = "database: x.sqlite\ncost_per_liter: 19.44\ncost_codes:\n  WATERFORD: WATE-0001\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.cost_per_liter, 19.44);
        assert_eq!(cfg.cost_codes.len(), 1);
        assert_eq!(cfg.cost_codes.get("WATERFORD").unwrap(), "WATE-0001");
    }

    #[test]
    fn absent_file_yields_defaults() {
        let cfg = Config::load_from(Path::new("/nonexistent/rfuelimport.conf")).unwrap();
        assert_eq!(cfg.separator_char, "-");
    }
}
