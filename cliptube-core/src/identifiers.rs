use serde::{Deserialize, Serialize};

/// Opaque identifier for a source video. The fetch tool resolves it;
/// nothing in this system interprets its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new<S: Into<String>>(id: S) -> VideoId {
        VideoId(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VideoId {
    fn from(id: &str) -> VideoId {
        VideoId::new(id)
    }
}
