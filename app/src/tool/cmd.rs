use std::{ffi::OsString, path::PathBuf, process::Stdio};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::Command,
};

use super::ToolError;

/// A named external program, optionally pinned to a configured path.
#[derive(Debug, Clone)]
pub struct ToolBinary {
    name: &'static str,
    path: Option<PathBuf>,
}

impl ToolBinary {
    pub fn new(name: &'static str) -> ToolBinary {
        ToolBinary { name, path: None }
    }

    pub fn with_path<P: Into<PathBuf>>(name: &'static str, p: P) -> ToolBinary {
        ToolBinary {
            name,
            path: Some(p.into()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn executable_path(&self) -> &std::path::Path {
        if let Some(p) = &self.path {
            p.as_path()
        } else {
            std::path::Path::new(self.name)
        }
    }

    pub fn build_command(&self) -> ToolCommand {
        ToolCommand {
            bin: self.clone(),
            args: Vec::new(),
        }
    }
}

/// Low level interface over calling an external tool. Arguments are
/// always passed as a vector, never through a shell.
#[derive(Debug)]
pub struct ToolCommand {
    bin: ToolBinary,
    args: Vec<OsString>,
}

impl ToolCommand {
    pub fn arg<S: Into<OsString>>(&mut self, arg: S) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub(crate) fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Spawn the tool and wait for it to fully terminate. stderr is
    /// drained incrementally into a diagnostic buffer; a chatty tool is
    /// not a failed tool, the exit status is the only success signal.
    pub async fn run(mut self) -> Result<(), ToolError> {
        log::trace!("run {:?}", &self);
        let program = self.bin.name().to_string();

        let mut st = Command::new(self.bin.executable_path());
        for arg in self.args.drain(..) {
            st.arg(arg);
        }
        st.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = st.spawn().map_err(|source| ToolError::Spawn {
            program: program.clone(),
            source,
        })?;

        let stderr = child
            .stderr
            .take()
            .expect("child stderr was requested piped");
        let mut lines = BufReader::new(stderr).lines();
        let mut diagnostics = String::new();
        while let Ok(Some(line)) = lines.next_line().await {
            diagnostics.push_str(&line);
            diagnostics.push('\n');
        }

        let status = child.wait().await.map_err(|source| ToolError::Spawn {
            program: program.clone(),
            source,
        })?;
        log::trace!("{} complete: {:?}", program, status);

        if status.success() {
            Ok(())
        } else {
            let code = status.code().unwrap_or(-1);
            Err(ToolError::Exit {
                program,
                code,
                stderr: diagnostics,
            })
        }
    }
}
