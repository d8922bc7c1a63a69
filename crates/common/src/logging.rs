// solpick - Solidity compiler version picker
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Logging configuration for solpick components
//!
//! Console output goes to stderr so that command output on stdout stays
//! machine readable. `RUST_LOG` always takes precedence over the verbosity
//! picked on the command line.

use eyre::Result;
use std::{env, io, sync::Once};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging for a solpick component
///
/// # Arguments
/// * `component_name` - Name of the component (e.g., "solpick")
/// * `verbosity` - Number of `-v` flags: 0 for INFO, 1 for DEBUG, 2+ for TRACE
///
/// # Examples
/// ```rust
/// use solpick_common::logging;
///
/// fn main() -> eyre::Result<()> {
///     logging::init_logging("solpick", 0)?;
///     tracing::info!("Application started");
///     Ok(())
/// }
/// ```
pub fn init_logging(component_name: &str, verbosity: u8) -> Result<()> {
    let level = level_for_verbosity(verbosity);
    let env_filter = env_filter_or(level)?;

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(verbosity > 0)
        .with_file(verbosity > 1)
        .with_line_number(verbosity > 1)
        .with_ansi(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing subscriber: {}", e))?;

    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| level.as_str().to_lowercase());
    tracing::debug!(component = component_name, rust_log = %rust_log, "Logging initialized");

    Ok(())
}

/// Map the number of `-v` flags to a default level.
fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Build a filter from `RUST_LOG`, falling back to `level`.
fn env_filter_or(level: Level) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.as_str()))
        .map_err(|e| eyre::eyre!("Failed to create environment filter: {}", e))
}

/// Initialize simple logging (console only, no target or location)
///
/// # Arguments
/// * `level` - The default log level to use
pub fn init_simple_logging(level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter_or(level)?)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize simple logging: {}", e))?;

    Ok(())
}

// Global test logging initialization - ensures logging is only set up once across all tests
static TEST_LOGGING_INIT: Once = Once::new();

/// Safe logging initialization for tests - can be called multiple times without crashing
///
/// Defaults to INFO but respects `RUST_LOG` if set.
///
/// # Usage
/// ```rust
/// use solpick_common::logging;
/// use tracing::info;
///
/// logging::ensure_test_logging(None);
/// info!("This will work safely in any test!");
/// ```
pub fn ensure_test_logging(default_level: Option<Level>) {
    TEST_LOGGING_INIT.call_once(|| {
        let default_level = default_level.unwrap_or(Level::INFO);
        // A subscriber may already be installed by the harness; that is fine.
        let _ = init_simple_logging(default_level);
    });
}
