//! Configuration management for the Spotscreen authorization endpoint.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Every value has a default that matches a typical
//! device deployment, so an empty environment still yields a working listener.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (handled by the binary)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults

use std::{
    env,
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

/// Port used when `CALLBACK_PORT` is not set.
pub const DEFAULT_CALLBACK_PORT: u16 = 8080;

/// Interface bound when `CALLBACK_BIND_ADDRESS` is not set.
pub const DEFAULT_BIND_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Seconds `listen` waits for a redirect when `AUTH_TIMEOUT_SECS` is not set.
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 300;

/// Idle delay between polls when `POLL_INTERVAL_MS` is not set.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `spotscreen-auth` data directory if it doesn't exist and loads
/// the `.env` file inside it when present. A missing file is not an error;
/// the defaults of this module apply instead.
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotscreen-auth/.env`
/// - macOS: `~/Library/Application Support/spotscreen-auth/.env`
/// - Windows: `%LOCALAPPDATA%/spotscreen-auth/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Location of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotscreen-auth/.env");
    path
}

/// Returns the port the redirect endpoint listens on (`CALLBACK_PORT`).
///
/// # Example
///
/// ```
/// let port = callback_port()?; // e.g., 8080
/// ```
pub fn callback_port() -> Result<u16, String> {
    parse_var("CALLBACK_PORT", DEFAULT_CALLBACK_PORT)
}

/// Returns the interface the listener binds to (`CALLBACK_BIND_ADDRESS`).
pub fn bind_address() -> Result<IpAddr, String> {
    parse_var("CALLBACK_BIND_ADDRESS", DEFAULT_BIND_ADDRESS)
}

/// Returns how long a single pairing waits for the redirect (`AUTH_TIMEOUT_SECS`).
pub fn auth_timeout() -> Result<Duration, String> {
    parse_var("AUTH_TIMEOUT_SECS", DEFAULT_AUTH_TIMEOUT_SECS).map(Duration::from_secs)
}

/// Returns the idle delay between two polls (`POLL_INTERVAL_MS`).
pub fn poll_interval() -> Result<Duration, String> {
    parse_var("POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS).map(Duration::from_millis)
}

fn parse_var<T>(name: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(name, env::var(name).ok(), default)
}

/// Parses an optional raw configuration value, falling back to `default`.
///
/// Blank values count as unset. The error message names the variable so a
/// typo in `.env` is easy to find.
pub fn parse_value<T>(name: &str, raw: Option<String>, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|e| format!("Invalid value for {name} ({value:?}): {e}")),
        _ => Ok(default),
    }
}
