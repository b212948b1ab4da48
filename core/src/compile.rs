use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::{anyhow, Context, Result};
use thiserror::Error;

/// Captured result of one compiler invocation: exit status plus everything
/// the compiler wrote to its standard streams.
#[derive(Debug)]
pub struct CompileOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

impl CompileOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// The compiler's exit code, or 1 when it was killed by a signal.
    pub fn code(&self) -> i32 {
        self.status.code().unwrap_or(1)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

/// A compiler invocation that returned a non-zero status. Fatal to the whole
/// run; carries the compiler's exit code and its captured stderr so the
/// caller can surface both.
#[derive(Debug, Error)]
#[error("failed to compile {}: compiler exited with code {}", .shader.display(), .code)]
pub struct CompileFailed {
    shader: PathBuf,
    code: i32,
    stderr: String,
}

impl CompileFailed {
    pub(crate) fn new(shader: PathBuf, output: CompileOutput) -> Self {
        Self {
            shader,
            code: output.code(),
            stderr: output.stderr,
        }
    }

    pub fn shader(&self) -> &Path {
        &self.shader
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    /// The compiler's diagnostics, verbatim.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

/// Runs `<compiler> <shader_file> -o <target>` and blocks until it exits,
/// capturing both output streams in full. Arguments go straight to the child
/// process, so paths with spaces need no quoting.
pub(crate) fn compile_shader(
    compiler: &Path,
    shader_file: &Path,
    target: &Path,
) -> Result<CompileOutput> {
    let output = Command::new(compiler)
        .arg(shader_file)
        .arg("-o")
        .arg(target)
        .output();

    let output = match output {
        Ok(output) => output,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(anyhow!(
                "shader compiler not found: {compiler}",
                compiler = compiler.display()
            ));
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!(
                    "could not run shader compiler {compiler}",
                    compiler = compiler.display()
                )
            });
        }
    };

    Ok(CompileOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
