//! Run configuration: where the input comes from and where plots go.

use std::path::PathBuf;
use thiserror::Error;

/// Environment variable consulted when no input path is given.
pub const SOURCE_ENV_VAR: &str = "PATH_TO_GLB";

/// Horizontal cuts in a Z scan unless asked otherwise.
pub const DEFAULT_SLICES: usize = 100;

pub const DEFAULT_OUT_DIR: &str = "plots";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no input file: pass a path or set PATH_TO_GLB")]
    MissingSourcePath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: PathBuf,
    pub out_dir: PathBuf,
    pub slices: usize,
    pub mesh_index: usize,
    pub flatten: bool,
}

impl Config {
    /// Config for `source` with every other setting at its default.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            slices: DEFAULT_SLICES,
            mesh_index: 0,
            flatten: false,
        }
    }

    /// Resolve the input path from the process environment.
    pub fn resolve(cli_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::resolve_with(cli_path, |key| std::env::var_os(key))
    }

    /// Resolve the input path, preferring `cli_path` over `lookup(SOURCE_ENV_VAR)`.
    /// Empty values count as unset.
    pub fn resolve_with<F>(cli_path: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<std::ffi::OsString>,
    {
        cli_path
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| lookup(SOURCE_ENV_VAR).filter(|v| !v.is_empty()).map(PathBuf::from))
            .map(Self::new)
            .ok_or(ConfigError::MissingSourcePath)
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub const fn with_slices(mut self, slices: usize) -> Self {
        self.slices = slices;
        self
    }

    pub const fn with_mesh_index(mut self, mesh_index: usize) -> Self {
        self.mesh_index = mesh_index;
        self
    }

    pub const fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// `<out_dir>/<stem>_<suffix>.svg` where `stem` is the input file stem.
    pub fn plot_path(&self, suffix: &str) -> PathBuf {
        let stem = self
            .source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mesh".to_owned());
        self.out_dir.join(format!("{stem}_{suffix}.svg"))
    }
}
