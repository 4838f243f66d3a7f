//! Generator configuration.
//!
//! Settings come from an optional TOML file with CLI flags layered on top:
//!
//! ```toml
//! module = "assets"
//! output = "src/assets.rs"
//! prefix = "site"
//! paths = ["site/static"]
//! ignore = ['\.map$']
//! include_mtime = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GenError, GenResult};
use crate::render::sanitize_module_name;

/// Raw generator settings, every field optional until [`validate`](Self::validate).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenConfig {
    /// Name of the generated module.
    pub module: Option<String>,
    /// File the generated source is written to.
    pub output: Option<PathBuf>,
    /// Directory the virtual root maps to.
    pub prefix: Option<PathBuf>,
    /// Regexes matched against real host paths.
    pub ignore: Vec<String>,
    /// Allowed roots, each at or below the prefix.
    pub paths: Vec<PathBuf>,
    /// Record modification times. Defaults to on.
    pub include_mtime: Option<bool>,
}

/// Settings after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub module: String,
    pub output: PathBuf,
    pub prefix: PathBuf,
    pub ignore: Vec<String>,
    pub paths: Vec<PathBuf>,
    pub include_mtime: bool,
}

impl GenConfig {
    /// Read a TOML config file.
    pub fn load(path: &Path) -> GenResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| GenError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> GenResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay `other` onto `self`: set scalars replace, lists append.
    pub fn merge_args(mut self, other: GenConfig) -> Self {
        if other.module.is_some() {
            self.module = other.module;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
        if other.prefix.is_some() {
            self.prefix = other.prefix;
        }
        if other.include_mtime.is_some() {
            self.include_mtime = other.include_mtime;
        }
        self.ignore.extend(other.ignore);
        self.paths.extend(other.paths);
        self
    }

    /// Check required settings and fill in defaults.
    ///
    /// The prefix defaults to the current directory. The module name
    /// defaults to the name of the directory holding the output file.
    pub fn validate(self) -> GenResult<ResolvedConfig> {
        let output = self
            .output
            .ok_or_else(|| GenError::config("no output file given"))?;
        if self.paths.is_empty() {
            return Err(GenError::config("at least one path is required"));
        }

        let prefix = match self.prefix {
            Some(prefix) => prefix,
            None => std::env::current_dir()?,
        };

        let module = match self.module {
            Some(module) => module,
            None => default_module_name(&output)?,
        };

        Ok(ResolvedConfig {
            module: sanitize_module_name(&module),
            output,
            prefix,
            ignore: self.ignore,
            paths: self.paths,
            include_mtime: self.include_mtime.unwrap_or(true),
        })
    }
}

/// Base name of the output's directory, resolved against the current
/// directory when the output path is relative.
fn default_module_name(output: &Path) -> GenResult<String> {
    let absolute = embedfs::path::absolute_host(output)?;
    let name = absolute
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(sanitize_module_name(&name))
}
