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

//! Solidity compiler invocation over the standard JSON interface.
//!
//! The compiler is spawned as a blocking subprocess: the request document is
//! written to its stdin and the response is read from its stdout. There is no
//! timeout; callers that need cancellation have to wrap the call themselves.

use std::{
    env, fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use solpick_common::env::SOLPICK_SOLC_ARGS;
use thiserror::Error;
use tracing::{debug, error, trace};

/// Arguments following `--standard-json` unless extra arguments are configured.
const DEFAULT_ARGS: [&str; 2] = ["--allow-paths", ".,/"];

/// Severity marking a fatal diagnostic.
const SEVERITY_ERROR: &str = "error";

/// Errors raised while running the compiler.
#[derive(Debug, Error)]
pub enum CompilerError {
    /// The compiler executable does not exist
    #[error(
        "Compiler not found at `{}`. Make sure that solc is installed and in PATH, or set the SOLC environment variable.",
        binary.display()
    )]
    NotFound {
        /// The binary that was attempted
        binary: PathBuf,
    },

    /// The compiler reported a diagnostic with severity `error`
    #[error("Solc experienced a fatal error.\n\n{0}")]
    Fatal(String),

    /// The compiler output is not a valid response document
    #[error("failed to decode compiler output: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request document could not be serialized
    #[error("failed to encode compiler input: {0}")]
    Encode(#[source] serde_json::Error),

    /// The settings file could not be read
    #[error("failed to read compiler settings from {}: {source}", path.display())]
    SettingsIo {
        /// The settings file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The settings are not a JSON object
    #[error("invalid compiler settings: {0}")]
    InvalidSettings(String),

    /// Spawning or talking to the compiler failed
    #[error("compiler I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A single entry of the `errors` array in the compiler response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// `error`, `warning` or `info`
    pub severity: String,
    /// Message including source location and code excerpt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_message: Option<String>,
    /// Plain message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Diagnostic kind, e.g. `ParserError`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Diagnostic {
    /// Whether this diagnostic aborts the compilation.
    pub fn is_error(&self) -> bool {
        self.severity == SEVERITY_ERROR
    }

    /// The formatted message, or the plain one if the compiler gave none.
    pub fn display_message(&self) -> &str {
        self.formatted_message.as_deref().or(self.message.as_deref()).unwrap_or_default()
    }
}

/// A decoded compiler response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilerOutput {
    /// Diagnostics of every severity
    #[serde(default)]
    pub errors: Vec<Diagnostic>,
    /// Everything else: `sources`, `contracts`, ...
    #[serde(flatten)]
    pub artifacts: Map<String, Value>,
}

impl CompilerOutput {
    /// Non-fatal diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().filter(|d| !d.is_error())
    }

    /// Fail on the first fatal diagnostic.
    pub fn check(&self) -> Result<(), CompilerError> {
        match self.errors.iter().find(|d| d.is_error()) {
            Some(fatal) => Err(CompilerError::Fatal(fatal.display_message().to_string())),
            None => Ok(()),
        }
    }
}

/// The fixed `outputSelection` of every request.
pub fn output_selection() -> Value {
    json!({
        "*": {
            "": ["ast"],
            "*": [
                "metadata",
                "evm.bytecode",
                "evm.deployedBytecode",
                "evm.methodIdentifiers",
            ],
        }
    })
}

/// Build the standard JSON request for a single source file.
///
/// Caller `settings` are kept as given, except that the optimizer is disabled
/// when not mentioned and `outputSelection` is always the fixed shape from
/// [`output_selection`].
pub fn build_input(file: &Path, settings: Option<Value>) -> Result<Value, CompilerError> {
    let mut settings = match settings.unwrap_or_else(|| Value::Object(Map::new())) {
        Value::Object(settings) => settings,
        other => {
            return Err(CompilerError::InvalidSettings(format!(
                "expected a JSON object, found `{other}`"
            )))
        }
    };

    settings.entry("optimizer").or_insert_with(|| json!({ "enabled": false }));
    settings.insert("outputSelection".to_string(), output_selection());

    let file = file.to_string_lossy().into_owned();
    Ok(json!({
        "language": "Solidity",
        "sources": { file.clone(): { "urls": [file] } },
        "settings": settings,
    }))
}

/// Read caller settings from a JSON file.
pub fn read_settings(path: &Path) -> Result<Value, CompilerError> {
    let content = fs::read_to_string(path)
        .map_err(|source| CompilerError::SettingsIo { path: path.to_path_buf(), source })?;
    serde_json::from_str(&content).map_err(|err| {
        CompilerError::InvalidSettings(format!("{} is not valid JSON: {err}", path.display()))
    })
}

/// A compiler binary driven through `--standard-json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardJsonCompiler {
    binary: PathBuf,
    extra_args: Option<Vec<String>>,
}

impl StandardJsonCompiler {
    /// Compiler at `binary` with the default arguments.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into(), extra_args: None }
    }

    /// Replace the default `--allow-paths .,/` with whitespace separated `args`.
    pub fn with_extra_args(mut self, args: &str) -> Self {
        self.extra_args = Some(args.split_whitespace().map(ToString::to_string).collect());
        self
    }

    /// Compiler at `binary`, taking extra arguments from [`SOLPICK_SOLC_ARGS`].
    pub fn from_env(binary: impl Into<PathBuf>) -> Self {
        let compiler = Self::new(binary);
        match env::var(SOLPICK_SOLC_ARGS) {
            Ok(args) if !args.trim().is_empty() => compiler.with_extra_args(&args),
            _ => compiler,
        }
    }

    /// The compiler binary.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Arguments passed to the compiler.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["--standard-json".to_string()];
        match &self.extra_args {
            Some(extra) => args.extend(extra.iter().cloned()),
            None => args.extend(DEFAULT_ARGS.iter().map(ToString::to_string)),
        }
        args
    }

    /// Compile `file`, optionally with settings read from `settings_path`.
    pub fn compile(
        &self,
        file: &Path,
        settings_path: Option<&Path>,
    ) -> Result<CompilerOutput, CompilerError> {
        let settings = settings_path.map(read_settings).transpose()?;
        self.compile_with_settings(file, settings)
    }

    /// Compile `file` with in-memory caller settings.
    pub fn compile_with_settings(
        &self,
        file: &Path,
        settings: Option<Value>,
    ) -> Result<CompilerOutput, CompilerError> {
        let input = build_input(file, settings)?;
        let output = self.run(&input)?;
        output.check()?;

        for warning in output.warnings() {
            trace!(severity = %warning.severity, "{}", warning.display_message());
        }
        Ok(output)
    }

    /// Run the compiler on a raw request and decode the response.
    pub fn run(&self, input: &Value) -> Result<CompilerOutput, CompilerError> {
        let args = self.args();
        debug!(binary = %self.binary.display(), ?args, "invoking compiler");

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => CompilerError::NotFound { binary: self.binary.clone() },
                _ => CompilerError::Io(err),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let request = serde_json::to_vec(input).map_err(CompilerError::Encode)?;
            match stdin.write_all(&request) {
                // the compiler may exit before reading its input
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("compiler closed stdin early");
                }
                result => result?,
            }
        }

        let output = child.wait_with_output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        serde_json::from_str(&stdout).map_err(|err| {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(%err, %stdout, %stderr, status = ?output.status, "Encountered a decode error");
            CompilerError::Decode(err)
        })
    }
}
