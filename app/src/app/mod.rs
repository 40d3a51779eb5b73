use crate::{tool::ToolBinary, workspace::Workspace};

mod clip_config;

pub use clip_config::{ClipConfig, ConfigBuilder, ConfigError};

#[derive(Debug, thiserror::Error)]
pub enum ClipAppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unable to prepare scratch directory")]
    Workspace(#[source] std::io::Error),
}

#[derive(Debug)]
pub struct ClipBuilder {
    pub config: ConfigBuilder,
}

impl ClipBuilder {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(ClipBuilder {
            config: ConfigBuilder::new()?.load_environment(true),
        })
    }

    pub fn build(self) -> Result<ClipApp, ClipAppError> {
        let config = self.config.build()?;
        let workspace = Workspace::new(config.scratch_root()).map_err(ClipAppError::Workspace)?;
        let app = ClipApp { config, workspace };
        log::trace!("{:#?}", app);
        Ok(app)
    }
}

/// Everything a request handler needs: the resolved configuration and
/// the scratch workspace, built once at startup and injected.
#[derive(Debug)]
pub struct ClipApp {
    pub config: ClipConfig,
    pub workspace: Workspace,
}

impl ClipApp {
    pub fn fetch_tool(&self) -> ToolBinary {
        self.config.fetch_tool()
    }

    pub fn trim_tool(&self) -> ToolBinary {
        self.config.trim_tool()
    }
}
