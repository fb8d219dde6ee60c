use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the current directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "gradle2std.toml";

/// Environment variable overriding the support library directory
pub const SUPPORT_LIBS_ENV: &str = "GRADLE2STD_SUPPORT_LIBS";

/// Support jar location relative to the home directory
pub const DEFAULT_SUPPORT_LIBS: &str = "Documents/source/Scanr/supportJars";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub support: SupportConfig,
    #[serde(default)]
    pub convert: ConvertConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct SupportConfig {
    /// Directory of jars merged into every converted `libs/`
    pub libs_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct ConvertConfig {
    #[serde(default = "default_variant")]
    pub variant: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            variant: default_variant(),
        }
    }
}

fn default_variant() -> String {
    "debug".to_string()
}

/// Load the config file
///
/// An explicitly requested file must exist. Without one, `gradle2std.toml` in
/// the current directory is used if present, otherwise defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(Config::default());
            }
            default
        }
    };

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::anyhow!("could not find `{}`", path.display())
        } else {
            anyhow::anyhow!("failed to read `{}`: {}", path.display(), e)
        }
    })?;

    parse_config(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse `{}`: {}", path.display(), e))
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;

    if config.convert.variant.trim().is_empty() {
        anyhow::bail!("`convert.variant` must not be empty");
    }

    Ok(config)
}

impl Config {
    /// Pick the support library directory
    ///
    /// Precedence: command line, then `GRADLE2STD_SUPPORT_LIBS`, then the
    /// config file, then `~/Documents/source/Scanr/supportJars`.
    pub fn support_libs_dir(&self, cli: Option<&Path>) -> Option<PathBuf> {
        let env = std::env::var_os(SUPPORT_LIBS_ENV).map(PathBuf::from);
        resolve_support_libs(
            cli,
            env,
            self.support.libs_dir.as_deref(),
            dirs::home_dir(),
        )
    }

    /// Command-line variant wins over the config file
    pub fn variant(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .unwrap_or_else(|| self.convert.variant.clone())
    }
}

fn resolve_support_libs(
    cli: Option<&Path>,
    env: Option<PathBuf>,
    file: Option<&Path>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    cli.map(Path::to_path_buf)
        .or(env.filter(|dir| !dir.as_os_str().is_empty()))
        .or_else(|| file.map(Path::to_path_buf))
        .or_else(|| home.map(|home| home.join(DEFAULT_SUPPORT_LIBS)))
}
