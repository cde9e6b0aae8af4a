//! Docker deployment scaffolding pipeline
//!
//! The one pipeline instantiation drydock ships: confirm with the
//! operator, make sure the yarn workspace-tools plugin is loaded, add the
//! runtime server packages to both sides, write the deployment
//! descriptors, and flip the experimental flag in drydock.toml.

use crate::core::{Pipeline, Step, StepAction, TaskContext, TaskError};
use crate::execution::CommandExecutor;
use crate::fsops;
use crate::prompt::ConfirmationGate;
use crate::setup::project::ProjectPaths;
use crate::setup::yarn::YarnClient;
use async_trait::async_trait;
use std::fs;
use std::sync::Arc;

/// Scoped name the plugin listing reports for workspace-tools
pub const WORKSPACE_TOOLS_PLUGIN: &str = "@yarnpkg/plugin-workspace-tools";

/// Short name accepted by `yarn plugin import`
pub const WORKSPACE_TOOLS_IMPORT: &str = "workspace-tools";

/// Runtime server package for the api side
pub const API_SERVER_PACKAGE: &str = "@drydock/api-server";

/// Runtime server package for the web side
pub const WEB_SERVER_PACKAGE: &str = "@drydock/web-server";

/// Marker guarding the config append; its presence means the block exists
pub const CONFIG_MARKER: &str = "[experimental.dockerfile]";

/// Fragment appended to drydock.toml, guarded by `CONFIG_MARKER`
pub const CONFIG_FRAGMENT: &str = "\n[experimental.dockerfile]\n\tenabled = true\n";

pub const DOCKERFILE_TEMPLATE: &str = include_str!("templates/docker/Dockerfile");
pub const COMPOSE_DEV_TEMPLATE: &str = include_str!("templates/docker/docker-compose.dev.yml");
pub const COMPOSE_PROD_TEMPLATE: &str = include_str!("templates/docker/docker-compose.prod.yml");

/// Options for the setup pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct SetupOptions {
    /// Skip the confirmation step entirely
    pub force: bool,

    /// Replace deployment descriptors that already exist
    pub overwrite: bool,
}

/// Asks the operator before any mutation happens
struct ConfirmStep {
    gate: Arc<dyn ConfirmationGate>,
    force: bool,
}

#[async_trait]
impl StepAction for ConfirmStep {
    fn should_skip(&self, _ctx: &TaskContext) -> Option<String> {
        self.force.then(|| "--force supplied".to_string())
    }

    async fn run(&self, _ctx: &mut TaskContext) -> Result<String, TaskError> {
        let confirmed = self
            .gate
            .confirm("The Dockerfile is experimental. Continue?")
            .await?;

        if confirmed {
            Ok("confirmed".to_string())
        } else {
            Err(TaskError::UserAborted)
        }
    }
}

/// Imports the official workspace-tools plugin unless yarn already has it
struct InstallWorkspaceToolsStep {
    yarn: Arc<YarnClient>,
}

#[async_trait]
impl StepAction for InstallWorkspaceToolsStep {
    async fn already_satisfied(&self, _ctx: &TaskContext) -> Result<Option<String>, TaskError> {
        let present = self.yarn.has_runtime_plugin(WORKSPACE_TOOLS_PLUGIN).await?;
        Ok(present.then(|| "already installed".to_string()))
    }

    async fn run(&self, ctx: &mut TaskContext) -> Result<String, TaskError> {
        let output = self.yarn.import_plugin(WORKSPACE_TOOLS_IMPORT).await?;
        ctx.set("yarn.workspace_tools", "imported");
        Ok(output)
    }
}

/// Adds one package to one workspace
struct AddWorkspacePackageStep {
    yarn: Arc<YarnClient>,
    workspace: &'static str,
    package: &'static str,
}

#[async_trait]
impl StepAction for AddWorkspacePackageStep {
    async fn run(&self, _ctx: &mut TaskContext) -> Result<String, TaskError> {
        self.yarn.workspace_add(self.workspace, self.package).await
    }
}

/// Writes the Dockerfile and both compose files from the embedded templates
struct WriteDeployFilesStep {
    paths: ProjectPaths,
    overwrite: bool,
}

#[async_trait]
impl StepAction for WriteDeployFilesStep {
    async fn run(&self, _ctx: &mut TaskContext) -> Result<String, TaskError> {
        fsops::write_template(&self.paths.dockerfile(), DOCKERFILE_TEMPLATE, self.overwrite)?;
        fsops::write_template(&self.paths.compose_dev(), COMPOSE_DEV_TEMPLATE, self.overwrite)?;
        fsops::write_template(&self.paths.compose_prod(), COMPOSE_PROD_TEMPLATE, self.overwrite)?;

        Ok("Dockerfile, docker-compose.dev.yml, docker-compose.prod.yml".to_string())
    }
}

/// Appends the experimental flag block to drydock.toml
struct PatchConfigStep {
    paths: ProjectPaths,
}

#[async_trait]
impl StepAction for PatchConfigStep {
    async fn already_satisfied(&self, _ctx: &TaskContext) -> Result<Option<String>, TaskError> {
        let path = self.paths.config_file();
        if !path.exists() {
            return Err(TaskError::FileNotFound { path });
        }

        let content = fs::read_to_string(&path).map_err(|source| TaskError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(content
            .contains(CONFIG_MARKER)
            .then(|| format!("the {} block already exists", CONFIG_MARKER)))
    }

    async fn run(&self, _ctx: &mut TaskContext) -> Result<String, TaskError> {
        fsops::patch_if_absent(&self.paths.config_file(), CONFIG_MARKER, CONFIG_FRAGMENT)?;
        Ok(format!("appended the {} block", CONFIG_MARKER))
    }
}

/// Assemble the docker setup pipeline against the given collaborators
///
/// Order matters: the plugin must be loaded before the workspace adds that
/// rely on it, and nothing touches the filesystem until the operator has
/// confirmed.
pub fn build_pipeline(
    paths: &ProjectPaths,
    options: SetupOptions,
    gate: Arc<dyn ConfirmationGate>,
    exec: Arc<dyn CommandExecutor>,
) -> Pipeline {
    let yarn = Arc::new(YarnClient::new(exec, paths.base().to_path_buf()));

    Pipeline::new("docker setup")
        .step(Step::new(
            "Confirmation",
            ConfirmStep {
                gate,
                force: options.force,
            },
        ))
        .step(Step::new(
            "Adding the yarn workspace-tools plugin",
            InstallWorkspaceToolsStep { yarn: yarn.clone() },
        ))
        .step(Step::new(
            "Adding @drydock/api-server to the api side",
            AddWorkspacePackageStep {
                yarn: yarn.clone(),
                workspace: "api",
                package: API_SERVER_PACKAGE,
            },
        ))
        .step(Step::new(
            "Adding @drydock/web-server to the web side",
            AddWorkspacePackageStep {
                yarn,
                workspace: "web",
                package: WEB_SERVER_PACKAGE,
            },
        ))
        .step(Step::new(
            "Adding the experimental Dockerfile and compose files",
            WriteDeployFilesStep {
                paths: paths.clone(),
                overwrite: options.overwrite,
            },
        ))
        .step(Step::new(
            "Adding config to drydock.toml",
            PatchConfigStep {
                paths: paths.clone(),
            },
        ))
}
