use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use walkdir::WalkDir;

mod classify;
mod compile;

pub use classify::{classify, BuildDecision, INCLUDE_EXTENSIONS};
pub use compile::{CompileFailed, CompileOutput};

/// Suffix appended to a source file name to form its compiled artifact name.
pub const COMPILED_SHADER_SUFFIX: &str = ".spv";

/// Incremental shader build driver.
///
/// Walks a shader folder, compares every source against its compiled
/// artifact under the output folder, and invokes the external compiler for
/// the stale ones. The output folder mirrors the source tree layout.
/// ```rust,no_run
/// use shader_precompiler::Precompiler;
///
/// let precompiler = Precompiler::new("glslc", "shaders", "precompiled");
/// let summary = precompiler.precompile().unwrap();
/// println!("{count} shaders compiled", count = summary.compiled);
/// ```
pub struct Precompiler {
    compiler: PathBuf,
    shaders: PathBuf,
    output: PathBuf,
}

/// Per-run counts, returned when every discovered shader was processed
/// without a compiler failure.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub compiled: usize,
    pub up_to_date: usize,
    pub skipped: usize,
}

impl Precompiler {
    pub fn new(
        compiler: impl Into<PathBuf>,
        shaders: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            compiler: compiler.into(),
            shaders: shaders.into(),
            output: output.into(),
        }
    }

    /// Compiles every stale shader under the source folder, one at a time in
    /// traversal order. The first compiler failure aborts the run with a
    /// [CompileFailed] error; everything compiled up to that point is kept.
    pub fn precompile(&self) -> Result<BuildSummary> {
        let mut summary = BuildSummary::default();
        let mut targets = HashSet::new();

        for entry in WalkDir::new(&self.shaders) {
            let entry = entry.with_context(|| {
                format!(
                    "could not walk shader folder {path}",
                    path = self.shaders.display()
                )
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let shader_file = entry.path();
            let target = self.target_path(shader_file)?;
            if !targets.insert(target.clone()) {
                return Err(anyhow!(
                    "{shader} maps to {target}, which another shader already produced",
                    shader = shader_file.display(),
                    target = target.display()
                ));
            }

            match self.classify_file(shader_file, &target)? {
                BuildDecision::Skip => {
                    debug!("Skipped {file}", file = shader_file.display());
                    summary.skipped += 1;
                }
                BuildDecision::UpToDate => {
                    debug!("Up-to-date {file}", file = shader_file.display());
                    summary.up_to_date += 1;
                }
                BuildDecision::Stale => {
                    self.compile_file(shader_file, &target)?;
                    summary.compiled += 1;
                }
            }
        }

        info!(
            "Compilation complete: {compiled} compiled, {up_to_date} up to date, {skipped} skipped",
            compiled = summary.compiled,
            up_to_date = summary.up_to_date,
            skipped = summary.skipped
        );

        Ok(summary)
    }

    /// Maps a source file to its artifact: the source path relative to the
    /// shader folder, re-rooted under the output folder, with the compiled
    /// suffix appended.
    fn target_path(&self, shader_file: &Path) -> Result<PathBuf> {
        let relative = pathdiff::diff_paths(shader_file, &self.shaders).ok_or_else(|| {
            anyhow!(
                "{file} is not under the shader folder {path}",
                file = shader_file.display(),
                path = self.shaders.display()
            )
        })?;

        let mut target: OsString = self.output.join(relative).into_os_string();
        target.push(COMPILED_SHADER_SUFFIX);

        Ok(PathBuf::from(target))
    }

    fn classify_file(&self, shader_file: &Path, target: &Path) -> Result<BuildDecision> {
        let source_mtime = modification_time(shader_file)?.ok_or_else(|| {
            anyhow!(
                "{file} disappeared during the walk",
                file = shader_file.display()
            )
        })?;
        let target_mtime = modification_time(target)?;

        Ok(classify(shader_file.extension(), source_mtime, target_mtime))
    }

    fn compile_file(&self, shader_file: &Path, target: &Path) -> Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "could not create output folder {path}",
                    path = parent.display()
                )
            })?;
        }

        info!("Compiling {file}", file = shader_file.display());
        let output = compile::compile_shader(&self.compiler, shader_file, target)?;

        // glslc is quiet on success; surface whatever it printed anyway.
        if !output.stdout().trim().is_empty() {
            info!("{chatter}", chatter = output.stdout().trim_end());
        }
        if !output.success() {
            return Err(CompileFailed::new(shader_file.to_path_buf(), output).into());
        }

        info!("Compiled {file}", file = shader_file.display());
        Ok(())
    }
}

/// Convenience wrapper around [Precompiler] for one-shot use.
pub fn precompile_shaders(compiler: &Path, shaders: &Path, output: &Path) -> Result<BuildSummary> {
    let precompiler = Precompiler::new(compiler, shaders, output);
    precompiler.precompile()
}

fn modification_time(path: &Path) -> Result<Option<SystemTime>> {
    match fs::metadata(path) {
        Ok(metadata) => {
            let mtime = metadata.modified().with_context(|| {
                format!(
                    "could not read modification time of {path}",
                    path = path.display()
                )
            })?;
            Ok(Some(mtime))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| {
            format!("could not read metadata of {path}", path = path.display())
        }),
    }
}
