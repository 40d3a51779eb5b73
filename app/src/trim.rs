use std::path::Path;

use crate::tool::{ToolBinary, ToolCommand, ToolError};

fn build_trim(bin: &ToolBinary, src: &Path, dest: &Path, start: f64, end: f64) -> ToolCommand {
    let mut cmd = bin.build_command();
    cmd.arg("-i")
        .arg(src)
        .arg("-ss")
        .arg(start.to_string())
        .arg("-to")
        .arg(end.to_string())
        // stream copy, no re-encode
        .arg("-c")
        .arg("copy")
        .arg("-y")
        .arg(dest);
    cmd
}

/// Cut `[start, end)` out of `src` into `dest`, overwriting `dest`.
/// The caller guarantees `src` already exists and is non-empty; the
/// ordering lives in the pipeline, not here.
pub async fn trim_clip(
    bin: &ToolBinary,
    src: &Path,
    dest: &Path,
    start: f64,
    end: f64,
) -> Result<(), ToolError> {
    build_trim(bin, src, dest, start, end).run().await
}
