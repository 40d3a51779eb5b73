use std::path::{Path, PathBuf};

use camino::{Utf8Path, Utf8PathBuf};

use crate::tool::ToolBinary;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "cliptube";
const APP: &str = "cliptube";
const APP_CAPS: &str = "CLIPTUBE";

const SCRATCH_ROOT_KEY: &str = "scratch_root";
const SCRATCH_DIR: &str = "cliptube";

const FETCH_CMD_KEY: &str = "fetch_cmd";
const TRIM_CMD_KEY: &str = "trim_cmd";

const BIND_KEY: &str = "bind";
const DEFAULT_BIND: &str = "0.0.0.0:3001";

const FETCH_PROGRAM: &str = "yt-dlp";
const TRIM_PROGRAM: &str = "ffmpeg";

const DEFAULT_CONFIG_FILE: &str = "cliptube.toml";

type ExtConfigBuilder = config::ConfigBuilder<config::builder::DefaultState>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    ConfigError(#[from] config::ConfigError),
    #[error("unable to get user home directory")]
    NoUserHome,
    #[error("path is not utf8: {:?}", _0)]
    NonUtf8Path(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config_dir: Utf8PathBuf,
    config_path: Option<Utf8PathBuf>,
    load_environment: bool,
    config_builder: ExtConfigBuilder,
}

fn camino_path(std_path: &Path) -> Result<&Utf8Path, ConfigError> {
    Utf8Path::from_path(std_path).ok_or_else(|| ConfigError::NonUtf8Path(std_path.to_path_buf()))
}

fn new_config_builder(scratch_default: &Utf8Path) -> ExtConfigBuilder {
    // unwraps are if our KEYs are not strings. These are statics, so its safe.
    config::Config::builder()
        .set_default(FETCH_CMD_KEY, Option::<&str>::None)
        .unwrap()
        .set_default(TRIM_CMD_KEY, Option::<&str>::None)
        .unwrap()
        .set_default(BIND_KEY, DEFAULT_BIND)
        .unwrap()
        .set_default(SCRATCH_ROOT_KEY, scratch_default.as_str())
        .unwrap()
}

impl ConfigBuilder {
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APP)
            .ok_or(ConfigError::NoUserHome)?;
        let config_dir = camino_path(dirs.config_dir())?.to_path_buf();

        let scratch_default = std::env::temp_dir().join(SCRATCH_DIR);
        let scratch_default = camino_path(&scratch_default)?.to_path_buf();
        let config_builder = new_config_builder(&scratch_default);

        Ok(Self {
            load_environment: false,
            config_path: None,
            config_dir,
            config_builder,
        })
    }

    /// Should we load configuration from the environment?
    pub fn load_environment(mut self, load_environment: bool) -> Self {
        self.load_environment = load_environment;
        self
    }

    fn set_path_override(mut self, key: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        let path_override = path.map(camino_path).transpose()?;
        let str_override = path_override.as_ref().map(|c| c.as_str());
        self.config_builder = self
            .config_builder
            .set_override_option(key, str_override)
            .unwrap();
        Ok(self)
    }

    pub fn config_file(mut self, config_file: Option<&Path>) -> Result<Self, ConfigError> {
        self.config_path = config_file
            .map(|p| camino_path(p).map(|p| p.to_path_buf()))
            .transpose()?;
        Ok(self)
    }

    pub fn scratch_root(self, scratch_root: Option<&Path>) -> Result<Self, ConfigError> {
        self.set_path_override(SCRATCH_ROOT_KEY, scratch_root)
    }

    pub fn fetch_override(self, fetch: Option<&Path>) -> Result<Self, ConfigError> {
        self.set_path_override(FETCH_CMD_KEY, fetch)
    }

    pub fn trim_override(self, trim: Option<&Path>) -> Result<Self, ConfigError> {
        self.set_path_override(TRIM_CMD_KEY, trim)
    }

    pub fn bind(mut self, bind: Option<&str>) -> Result<Self, ConfigError> {
        self.config_builder = self
            .config_builder
            .set_override_option(BIND_KEY, bind)
            .unwrap();
        Ok(self)
    }

    pub fn build(mut self) -> Result<ClipConfig, ConfigError> {
        let cfg_file = self
            .config_path
            .unwrap_or_else(|| self.config_dir.join(DEFAULT_CONFIG_FILE));

        if cfg_file.exists() {
            self.config_builder = self
                .config_builder
                .add_source(config::File::from(cfg_file.as_std_path()));
        }

        if self.load_environment {
            self.config_builder = self
                .config_builder
                .add_source(config::Environment::with_prefix(APP_CAPS))
        }

        let clip_cfg = ClipConfig {
            inner: self.config_builder.build().map_err(ConfigError::from)?,
        };
        log::trace!("{:#?}", clip_cfg);
        Ok(clip_cfg)
    }
}

#[derive(Debug, Clone)]
pub struct ClipConfig {
    inner: config::Config,
}

impl ClipConfig {
    fn get_path(&self, key: &str) -> PathBuf {
        PathBuf::from(self.inner.get_string(key).unwrap())
    }

    fn tool(&self, key: &str, program: &'static str) -> ToolBinary {
        match self.inner.get::<Option<String>>(key) {
            Ok(Some(s)) => ToolBinary::with_path(program, s),
            Ok(None) => ToolBinary::new(program),
            Err(e) => panic!("{}", e),
        }
    }

    pub fn scratch_root(&self) -> PathBuf {
        self.get_path(SCRATCH_ROOT_KEY)
    }

    pub fn bind_address(&self) -> String {
        self.inner.get_string(BIND_KEY).unwrap()
    }

    pub fn fetch_tool(&self) -> ToolBinary {
        self.tool(FETCH_CMD_KEY, FETCH_PROGRAM)
    }

    pub fn trim_tool(&self) -> ToolBinary {
        self.tool(TRIM_CMD_KEY, TRIM_PROGRAM)
    }
}
