mod cmd;

pub use cmd::{ToolBinary, ToolCommand};

#[cfg(test)]
pub(crate) use cmd::testtools;

/// Failure of one external tool invocation. The captured stderr is kept
/// out of the `Display` impl so it can be logged server-side without
/// leaking into caller-facing messages.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("unable to launch `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with status {code}")]
    Exit {
        program: String,
        code: i32,
        stderr: String,
    },
}

impl ToolError {
    pub fn program(&self) -> &str {
        match self {
            ToolError::Spawn { program, .. } => program,
            ToolError::Exit { program, .. } => program,
        }
    }
}
