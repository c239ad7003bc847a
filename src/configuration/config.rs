#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiBaseURL,
    ConfigFile,
    NotificationTimeout,
    RequestTimeout,
    Route,
    TokenFile,
}

impl ConfigKey {
    fn is_numeric(&self) -> bool {
        return *self == ConfigKey::NotificationTimeout || *self == ConfigKey::RequestTimeout;
    }
}

fn validate_value(key: ConfigKey, val: &str, source: &str) -> Result<()> {
    if key.is_numeric() && val.parse::<u64>().is_err() {
        bail!(format!(
            "{source} has an invalid value for key '{key}': {val}\nExpected a whole number of milliseconds."
        ));
    }

    return Ok(());
}

/// Fails startup when no API base URL has been provided by any source.
pub fn validate_api_base_url(url: &str, config_file: &str) -> Result<()> {
    if url.trim().is_empty() {
        bail!(format!(
            "No API base URL is configured. Pass --{key}, set MARQUEE_API_BASE_URL, or add `{key} = \"https://...\"` to {config_file}",
            key = ConfigKey::ApiBaseURL
        ));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        bail!(format!(
            "The API base URL must start with http:// or https://, got: {url}"
        ));
    }

    return Ok(());
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let config_dir = dirs::config_dir().unwrap_or_else(env::temp_dir);
        let cache_dir = dirs::cache_dir().unwrap_or_else(env::temp_dir);

        #[cfg(not(target_os = "macos"))]
        let config_path = config_dir.join("marquee/config.toml");
        #[cfg(target_os = "macos")]
        let config_path = env::var("HOME")
            .map(|home| return path::PathBuf::from(home).join(".config/marquee/config.toml"))
            .unwrap_or_else(|_| return config_dir.join("marquee/config.toml"));

        let token_path = cache_dir.join("marquee/token");

        let res = match key {
            ConfigKey::ApiBaseURL => "".to_string(),
            ConfigKey::NotificationTimeout => "3000".to_string(),
            ConfigKey::RequestTimeout => "10000".to_string(),
            ConfigKey::Route => "/dashboard".to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
            ConfigKey::TokenFile => token_path.to_string_lossy().to_string(),
        };

        return res;
    }

    pub fn millis(key: ConfigKey) -> u64 {
        return Config::get(key)
            .parse::<u64>()
            .unwrap_or_else(|_| return Config::default(key).parse::<u64>().unwrap_or(0));
    }

    pub fn validate() -> Result<()> {
        return validate_api_base_url(
            &Config::get(ConfigKey::ApiBaseURL),
            &Config::get(ConfigKey::ConfigFile),
        );
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }
        Config::set(ConfigKey::ConfigFile, &config_file);

        let config_path = path::PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_int) = val.as_integer() {
                        validate_value(key, &val_int.to_string(), "config.toml")?;
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        validate_value(key, val_str, "config.toml")?;
                        Config::set(key, val_str);
                    } else {
                        bail!(format!(
                            "config.toml has an invalid value for key '{key}', expected a string or a number"
                        ));
                    }
                }
            }
        }

        // Flags and environment variables win over the config file.
        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    validate_value(key, val, &format!("--{key}"))?;
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            api_base_url = Config::get(ConfigKey::ApiBaseURL),
            config_file = Config::get(ConfigKey::ConfigFile),
            token_file = Config::get(ConfigKey::TokenFile),
            request_timeout = Config::get(ConfigKey::RequestTimeout),
            route = Config::get(ConfigKey::Route),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if key.is_numeric() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
