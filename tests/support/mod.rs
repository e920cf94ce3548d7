use assert_cmd::{cargo::cargo_bin_cmd, Command};
use tempfile::TempDir;

/// Get a Command for fleet with an isolated, empty config directory.
///
/// Ambient credentials and log filters from the developer's shell are
/// cleared so tests see only what they set themselves.
pub fn fleet(config_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("fleet");
    cmd.env("FLEET_CONFIG_DIR", config_dir.path())
        .env_remove("FLEET_API_URL")
        .env_remove("FLEET_API_TOKEN")
        .env_remove("FLEET_TIMEOUT")
        .env_remove("FLEET_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Like [`fleet`], pointed at a mock API server and logged in.
#[allow(dead_code)]
pub fn fleet_against(config_dir: &TempDir, api_url: &str) -> Command {
    let mut cmd = fleet(config_dir);
    cmd.env("FLEET_API_URL", api_url)
        .env("FLEET_API_TOKEN", "test-token");
    cmd
}
