use std::{
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use cliptube_core::token::SessionToken;

const INPUT_SUFFIX: &str = "input.mp4";
const OUTPUT_SUFFIX: &str = "output.mp4";

/// The process-wide scratch directory. Constructed once at startup and
/// handed to whoever produces clips; every request gets its own
/// token-namespaced file pair, so concurrent requests never collide.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create (idempotently) and open the scratch directory.
    pub fn new<P: Into<PathBuf>>(p: P) -> Result<Workspace, std::io::Error> {
        let root: PathBuf = p.into();
        std::fs::create_dir_all(&root)?;
        let root = root.canonicalize()?;
        Ok(Workspace { root })
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Reserve the input/output path pair for one request. The paths are
    /// not created here; the external tools create the files.
    pub fn create_session(&self) -> ScratchSession {
        let token = SessionToken::generate();
        ScratchSession {
            input: self.root.join(format!("{}-{}", token, INPUT_SUFFIX)),
            output: self.root.join(format!("{}-{}", token, OUTPUT_SUFFIX)),
            token,
        }
    }

    /// Remove scratch files last modified at or before `max_age` ago.
    /// Live sessions are untouched as long as `max_age` exceeds any
    /// plausible request duration. Returns the affected paths; with
    /// `dry_run` nothing is deleted.
    pub async fn sweep(
        &self,
        max_age: Duration,
        dry_run: bool,
    ) -> Result<Vec<PathBuf>, std::io::Error> {
        let cutoff = SystemTime::now() - max_age;
        let mut swept = Vec::new();

        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let meta = match entry.metadata().await {
                Ok(m) => m,
                Err(e) => {
                    log::warn!("could not stat {:?}: {}", entry.path(), e);
                    continue;
                }
            };
            if !meta.is_file() {
                continue;
            }
            let modified = match meta.modified() {
                Ok(m) => m,
                Err(_) => continue,
            };
            if modified > cutoff {
                continue;
            }
            let path = entry.path();
            if !dry_run {
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    log::warn!("could not remove stale scratch file {:?}: {}", path, e);
                    continue;
                }
                log::trace!("rm {:?}", path);
            }
            swept.push(path);
        }
        Ok(swept)
    }
}

/// The scratch file pair for one request, owned exclusively by that
/// request. Dropping the session removes both files, each attempted
/// independently; the session must not outlive its request.
#[derive(Debug)]
pub struct ScratchSession {
    token: SessionToken,
    input: PathBuf,
    output: PathBuf,
}

impl ScratchSession {
    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn input_path(&self) -> &Path {
        self.input.as_path()
    }

    pub fn output_path(&self) -> &Path {
        self.output.as_path()
    }
}

impl Drop for ScratchSession {
    fn drop(&mut self) {
        for path in [&self.input, &self.output] {
            match std::fs::remove_file(path) {
                Ok(()) => log::trace!("rm {:?}", path),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => log::warn!("could not remove scratch file {:?}: {}", path, e),
            }
        }
    }
}
