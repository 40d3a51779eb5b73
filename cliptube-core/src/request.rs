use serde::{Deserialize, Serialize};

use crate::identifiers::VideoId;

/// Prefix for generated attachment filenames.
pub const FILENAME_PREFIX: &str = "cliptube";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRequest {
    #[error("Invalid videoId")]
    InvalidVideoId,
    #[error("Invalid time range")]
    InvalidTimeRange,
    #[error("Invalid time range values")]
    InvalidTimeRangeValues,
}

/// One accepted clip request: a source video and a half-open
/// `[start_time, end_time)` range in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipRequest {
    pub video_id: VideoId,
    pub start_time: f64,
    pub end_time: f64,
}

impl ClipRequest {
    /// Build a request, enforcing `0 <= start_time < end_time`.
    pub fn new(video_id: VideoId, start_time: f64, end_time: f64) -> Result<Self, InvalidRequest> {
        if video_id.as_str().is_empty() {
            return Err(InvalidRequest::InvalidVideoId);
        }
        if !start_time.is_finite() || !end_time.is_finite() {
            return Err(InvalidRequest::InvalidTimeRangeValues);
        }
        if start_time < 0.0 || end_time <= start_time {
            return Err(InvalidRequest::InvalidTimeRangeValues);
        }
        Ok(ClipRequest {
            video_id,
            start_time,
            end_time,
        })
    }

    /// Validate an inbound JSON body. The checks run in a fixed order so
    /// the caller gets the most specific complaint: identifier first,
    /// then time types, then time values.
    pub fn parse(body: &serde_json::Value) -> Result<ClipRequest, InvalidRequest> {
        let video_id = body
            .get("videoId")
            .and_then(|v| v.as_str())
            .ok_or(InvalidRequest::InvalidVideoId)?;
        let start_time = body
            .get("startTime")
            .and_then(|v| v.as_f64())
            .ok_or(InvalidRequest::InvalidTimeRange)?;
        let end_time = body
            .get("endTime")
            .and_then(|v| v.as_f64())
            .ok_or(InvalidRequest::InvalidTimeRange)?;
        ClipRequest::new(VideoId::new(video_id), start_time, end_time)
    }

    /// Human-readable download name: identifier plus floor()'d seconds.
    /// Fractional precision is preserved everywhere else; only the name
    /// truncates.
    pub fn attachment_filename(&self) -> String {
        format!(
            "{}-{}-{}-{}.mp4",
            FILENAME_PREFIX,
            self.video_id,
            self.start_time.floor() as i64,
            self.end_time.floor() as i64,
        )
    }
}
