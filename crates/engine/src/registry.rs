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

//! The registry of compiler versions that pragmas are resolved against.
//!
//! The registry is built once per process. The upstream release listing is
//! tried first; if it cannot be reached, the compilers already installed by
//! svm are used instead. After initialization the registry is read-only.

use std::{collections::BTreeMap, env, time::Duration};

use foundry_compilers::solc::Solc;
use once_cell::sync::OnceCell;
use semver::Version;
use serde::Deserialize;
use solpick_common::env::{
    is_truthy, DEFAULT_SOLC_LIST_URL, SOLPICK_OFFLINE, SOLPICK_SOLC_LIST_URL,
};
use thiserror::Error;
use tracing::{debug, info, warn};

static GLOBAL_REGISTRY: OnceCell<VersionRegistry> = OnceCell::new();

/// Timeout for the release listing request.
const LISTING_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors raised while building the version registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The release listing host could not be reached
    #[error("cannot reach the compiler release listing: {0}")]
    Connectivity(String),

    /// The release listing was reached but could not be used
    #[error("failed to fetch the compiler release listing: {0}")]
    Listing(#[from] reqwest::Error),

    /// The release listing does not have the expected shape
    #[error("malformed compiler release listing at {url}: {source}")]
    MalformedListing {
        /// Where the listing was fetched from
        url: String,
        /// Decoding error
        source: serde_json::Error,
    },

    /// [`VersionRegistry::init_global`] was called more than once
    #[error("the version registry is already initialized")]
    AlreadyInitialized,
}

/// A source of compiler version strings.
pub trait VersionSource {
    /// List the available versions, newest first.
    fn list_versions(&self) -> Result<Vec<String>, RegistryError>;
}

/// Known compiler versions, tagged with where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRegistry {
    /// Releases published upstream
    Released(Vec<String>),
    /// Compilers installed on this machine
    Installed(Vec<String>),
}

impl VersionRegistry {
    /// The versions, in resolution order.
    pub fn versions(&self) -> &[String] {
        match self {
            Self::Released(versions) | Self::Installed(versions) => versions,
        }
    }

    /// Human readable name of the registry source.
    pub fn source_name(&self) -> &'static str {
        match self {
            Self::Released(_) => "released",
            Self::Installed(_) => "installed",
        }
    }

    /// Registry of the compilers installed by svm.
    pub fn installed() -> Self {
        Self::Installed(InstalledListing.versions())
    }

    /// Query `network`, falling back to `local` if there is no connectivity.
    ///
    /// Errors other than [`RegistryError::Connectivity`] are not recovered from.
    pub fn fetch_with(
        network: &dyn VersionSource,
        local: &dyn VersionSource,
    ) -> Result<Self, RegistryError> {
        match network.list_versions() {
            Ok(versions) => {
                debug!(count = versions.len(), "using released compiler versions");
                Ok(Self::Released(versions))
            }
            Err(RegistryError::Connectivity(err)) => {
                warn!(%err, "no connectivity, proceeding with installed compilers");
                Ok(Self::Installed(local.list_versions()?))
            }
            Err(err) => Err(err),
        }
    }

    /// Build the registry from the environment.
    ///
    /// Honours [`SOLPICK_OFFLINE`] and [`SOLPICK_SOLC_LIST_URL`].
    pub fn fetch() -> Result<Self, RegistryError> {
        if is_truthy(SOLPICK_OFFLINE) {
            info!("offline mode, using installed compilers only");
            return Ok(Self::installed());
        }
        Self::fetch_with(&ReleaseListing::from_env(), &InstalledListing)
    }

    /// Install `registry` as the process-wide registry.
    ///
    /// Fails with [`RegistryError::AlreadyInitialized`] if a registry is already
    /// in place, whether installed explicitly or fetched by [`Self::global`].
    pub fn init_global(registry: Self) -> Result<&'static Self, RegistryError> {
        GLOBAL_REGISTRY.try_insert(registry).map_err(|_| RegistryError::AlreadyInitialized)
    }

    /// The process-wide registry, fetched on first use if not yet initialized.
    pub fn global() -> Result<&'static Self, RegistryError> {
        GLOBAL_REGISTRY.get_or_try_init(Self::fetch)
    }
}

/// Sort parsable versions newest first and render them.
fn newest_first(versions: impl IntoIterator<Item = Version>) -> Vec<String> {
    let mut versions: Vec<_> = versions.into_iter().collect();
    versions.sort_unstable_by(|a, b| b.cmp(a));
    versions.dedup();
    versions.iter().map(ToString::to_string).collect()
}

/// The `list.json` document published next to the compiler binaries.
#[derive(Debug, Deserialize)]
struct ReleaseList {
    releases: BTreeMap<String, String>,
}

/// Parse a `list.json` body into versions, newest first.
fn parse_release_list(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let list: ReleaseList = serde_json::from_str(body)?;
    Ok(newest_first(list.releases.keys().filter_map(|v| Version::parse(v).ok())))
}

/// The upstream release listing at `<base_url>/<platform>/list.json`.
#[derive(Debug, Clone)]
pub struct ReleaseListing {
    base_url: String,
    timeout: Duration,
}

impl Default for ReleaseListing {
    fn default() -> Self {
        Self::new(DEFAULT_SOLC_LIST_URL)
    }
}

impl ReleaseListing {
    /// Listing served from `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: LISTING_TIMEOUT }
    }

    /// Replace the request timeout, which covers reading the body as well.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Listing served from [`SOLPICK_SOLC_LIST_URL`], or the default host.
    pub fn from_env() -> Self {
        env::var(SOLPICK_SOLC_LIST_URL)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    /// The URL of the listing for the current platform.
    pub fn url(&self) -> String {
        format!("{}/{}/list.json", self.base_url.trim_end_matches('/'), platform())
    }
}

impl VersionSource for ReleaseListing {
    fn list_versions(&self) -> Result<Vec<String>, RegistryError> {
        let url = self.url();
        debug!(%url, "fetching compiler release listing");

        let client = reqwest::blocking::Client::builder().timeout(self.timeout).build()?;
        let response = client.get(&url).send().map_err(listing_error)?;
        let body = response.error_for_status()?.text().map_err(listing_error)?;

        parse_release_list(&body).map_err(|source| RegistryError::MalformedListing { url, source })
    }
}

/// Connect and timeout failures, including while reading the body, count as
/// missing connectivity.
fn listing_error(err: reqwest::Error) -> RegistryError {
    if err.is_connect() || err.is_timeout() {
        RegistryError::Connectivity(err.to_string())
    } else {
        RegistryError::Listing(err)
    }
}

/// Compilers already installed by svm on this machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstalledListing;

impl InstalledListing {
    /// Installed versions, newest first.
    pub fn versions(&self) -> Vec<String> {
        newest_first(Solc::installed_versions())
    }
}

impl VersionSource for InstalledListing {
    fn list_versions(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.versions())
    }
}

/// Platform directory of the release host.
fn platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macosx-amd64"
    } else if cfg!(target_os = "windows") {
        "windows-amd64"
    } else {
        "linux-amd64"
    }
}
