//! Yarn CLI driver

use crate::core::TaskError;
use crate::execution::CommandExecutor;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// One row of `yarn plugin runtime --json` output
///
/// The listing is newline-delimited JSON; each row carries more fields
/// than we need, but only the plugin name matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginEntry {
    pub name: String,
}

/// Drives the yarn CLI inside a project directory
///
/// All invocations go through the injected executor, so tests script the
/// yarn side without spawning processes.
pub struct YarnClient {
    exec: Arc<dyn CommandExecutor>,
    cwd: PathBuf,
}

impl YarnClient {
    pub fn new(exec: Arc<dyn CommandExecutor>, cwd: PathBuf) -> Self {
        Self { exec, cwd }
    }

    /// List the runtime plugins yarn currently loads
    ///
    /// Parses the NDJSON listing; a malformed row is fatal since the
    /// caller can no longer trust the install-state probe.
    pub async fn runtime_plugins(&self) -> Result<Vec<PluginEntry>, TaskError> {
        let stdout = self
            .exec
            .run("yarn", &["plugin", "runtime", "--json"], &self.cwd)
            .await?;

        stdout
            .trim()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|source| TaskError::MalformedJson {
                    command: "yarn plugin runtime --json".to_string(),
                    source,
                })
            })
            .collect()
    }

    /// Whether a runtime plugin with the given (scoped) name is loaded
    pub async fn has_runtime_plugin(&self, name: &str) -> Result<bool, TaskError> {
        let plugins = self.runtime_plugins().await?;
        let present = plugins.iter().any(|p| p.name == name);
        debug!("Plugin {} present: {}", name, present);
        Ok(present)
    }

    /// `yarn plugin import <name>`
    pub async fn import_plugin(&self, name: &str) -> Result<String, TaskError> {
        self.exec
            .run("yarn", &["plugin", "import", name], &self.cwd)
            .await
    }

    /// `yarn workspace <workspace> add <package>`
    pub async fn workspace_add(&self, workspace: &str, package: &str) -> Result<String, TaskError> {
        self.exec
            .run("yarn", &["workspace", workspace, "add", package], &self.cwd)
            .await
    }
}
