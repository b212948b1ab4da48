use std::ffi::OsStr;
use std::time::SystemTime;

/// Extensions of include-only shader fragments. Those are inlined into other
/// shaders by the compiler and must never be compiled on their own.
pub const INCLUDE_EXTENSIONS: &[&str] = &["glsl"];

/// What to do with one discovered shader source. Recomputed on every run,
/// never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildDecision {
    /// Include-only fragment, never reaches the compiler.
    Skip,
    /// The artifact exists and is at least as recent as the source.
    UpToDate,
    /// The artifact is missing or strictly older than the source.
    Stale,
}

/// Classifies a shader source from its extension, its modification time and
/// the modification time of its compiled artifact, if one exists.
///
/// Equal timestamps count as up to date, so a run right after a successful
/// one recompiles nothing.
pub fn classify(
    extension: Option<&OsStr>,
    source_mtime: SystemTime,
    target_mtime: Option<SystemTime>,
) -> BuildDecision {
    if let Some(extension) = extension {
        if INCLUDE_EXTENSIONS
            .iter()
            .any(|&include| extension == OsStr::new(include))
        {
            return BuildDecision::Skip;
        }
    }

    match target_mtime {
        Some(target_mtime) if target_mtime >= source_mtime => BuildDecision::UpToDate,
        _ => BuildDecision::Stale,
    }
}
