use glb_inspect::config::{Config, ConfigError, DEFAULT_OUT_DIR, SOURCE_ENV_VAR};
use std::ffi::OsString;
use std::path::PathBuf;

fn env_with(path: &str) -> impl Fn(&str) -> Option<OsString> + '_ {
    move |key: &str| (key == SOURCE_ENV_VAR).then(|| OsString::from(path))
}

#[test]
fn cli_path_wins_over_environment() {
    let config = Config::resolve_with(Some(PathBuf::from("cli.glb")), env_with("env.glb")).unwrap();
    assert_eq!(config.source, PathBuf::from("cli.glb"));
}

#[test]
fn environment_fills_in_missing_path() {
    let config = Config::resolve_with(None, env_with("env.glb")).unwrap();
    assert_eq!(config.source, PathBuf::from("env.glb"));
    assert_eq!(config.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
}

#[test]
fn nothing_configured_is_an_error() {
    let err = Config::resolve_with(None, |_| None).unwrap_err();
    assert_eq!(err, ConfigError::MissingSourcePath);
    assert!(err.to_string().contains(SOURCE_ENV_VAR));
}

#[test]
fn builders_and_plot_paths() {
    let config = Config::new("/models/part.v2.glb")
        .with_out_dir("out")
        .with_slices(12)
        .with_mesh_index(3)
        .with_flatten(true);
    assert_eq!(config.slices, 12);
    assert_eq!(config.mesh_index, 3);
    assert!(config.flatten);
    assert_eq!(config.plot_path("scan"), PathBuf::from("out/part.v2_scan.svg"));
}
