use std::path::Path;

use cliptube_core::request::ClipRequest;

use crate::{app::ClipApp, fetch, tool::ToolError, trim, workspace::ScratchSession};

#[derive(Debug, thiserror::Error)]
pub enum ClipError {
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("tool reported success but produced no usable output")]
    EmptyOutput,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A verified clip on disk. Owns the scratch session, so the files
/// survive exactly as long as this value (or the session it hands back).
#[derive(Debug)]
pub struct ClipOutput {
    session: ScratchSession,
    len: u64,
}

impl ClipOutput {
    pub fn path(&self) -> &Path {
        self.session.output_path()
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Open the clip for reading, handing the session guard back to the
    /// caller so it controls when the scratch files are released.
    pub async fn open(self) -> Result<(tokio::fs::File, ScratchSession), std::io::Error> {
        let file = tokio::fs::File::open(self.session.output_path()).await?;
        Ok((file, self.session))
    }
}

/// Drive fetch -> trim -> verify for one accepted request. The stages
/// are strictly sequential: trim reads what fetch wrote. Any early
/// return drops the session, which removes whatever was partially
/// written.
pub async fn produce_clip(app: &ClipApp, req: &ClipRequest) -> Result<ClipOutput, ClipError> {
    let session = app.workspace.create_session();
    log::debug!(
        "clip {} [{} -> {}] session {}",
        req.video_id,
        req.start_time,
        req.end_time,
        session.token()
    );

    fetch::fetch_source(&app.fetch_tool(), &req.video_id, session.input_path()).await?;
    trim::trim_clip(
        &app.trim_tool(),
        session.input_path(),
        session.output_path(),
        req.start_time,
        req.end_time,
    )
    .await?;

    let len = verify_output(session.output_path()).await?;
    log::debug!("clip session {} verified, {} bytes", session.token(), len);
    Ok(ClipOutput { session, len })
}

/// Guard against tools that exit 0 but write nothing usable.
async fn verify_output(path: &Path) -> Result<u64, ClipError> {
    let meta = match tokio::fs::metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(ClipError::EmptyOutput),
        Err(e) => return Err(ClipError::Io(e)),
    };
    if meta.len() == 0 {
        return Err(ClipError::EmptyOutput);
    }
    Ok(meta.len())
}
