use std::path::Path;

use cliptube_core::identifiers::VideoId;

use crate::tool::{ToolBinary, ToolCommand, ToolError};

const SOURCE_URL_BASE: &str = "https://www.youtube.com/watch?v=";
const CONTAINER_FORMAT: &str = "mp4";

fn source_url(video_id: &VideoId) -> String {
    format!("{}{}", SOURCE_URL_BASE, video_id)
}

fn build_fetch(bin: &ToolBinary, video_id: &VideoId, dest: &Path) -> ToolCommand {
    let mut cmd = bin.build_command();
    cmd.arg(source_url(video_id))
        .arg("-f")
        .arg(CONTAINER_FORMAT)
        .arg("-o")
        .arg(dest);
    cmd
}

/// Retrieve the full source video for `video_id` into `dest`. A single
/// failed fetch fails the whole request; there is no retry.
pub async fn fetch_source(
    bin: &ToolBinary,
    video_id: &VideoId,
    dest: &Path,
) -> Result<(), ToolError> {
    build_fetch(bin, video_id, dest).run().await
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fetch_arguments_follow_the_tool_contract() {
        let bin = ToolBinary::new("yt-dlp");
        let id = VideoId::new("abc123");
        let cmd = build_fetch(&bin, &id, Path::new("/scratch/tok-input.mp4"));

        let args: Vec<&str> = cmd.args().iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(
            args,
            vec![
                "https://www.youtube.com/watch?v=abc123",
                "-f",
                "mp4",
                "-o",
                "/scratch/tok-input.mp4",
            ]
        );
    }
}
