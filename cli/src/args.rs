use std::path::PathBuf;

use clap::Parser;

/// Incrementally compiles a folder of shader sources to SPIR-V, skipping
/// every shader whose compiled artifact is already up to date.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder containing the shader sources, walked recursively
    #[clap(short, long, value_parser, default_value = "shaders")]
    pub shaders: PathBuf,
    /// Folder receiving the compiled artifacts, mirroring the source tree
    #[clap(short, long, value_parser, default_value = "precompiled")]
    pub output: PathBuf,
    /// Shader compiler executable, resolved on PATH when not an explicit path
    #[clap(short, long, value_parser, env = "GLSLC", default_value = "glslc")]
    pub compiler: PathBuf,
    /// Only log warnings and errors
    #[clap(short, long, action)]
    pub quiet: bool,
}
