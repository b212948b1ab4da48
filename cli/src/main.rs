use std::io::Write as _;
use std::process;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::error;
use shader_precompiler::{CompileFailed, Precompiler};

mod args;

use args::Cli;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if let Err(err) = run(&cli) {
        if let Some(failure) = err.downcast_ref::<CompileFailed>() {
            // The compiler's own diagnostics, verbatim, then our one-liner.
            let stderr = std::io::stderr();
            let mut stderr = stderr.lock();
            let _ = write!(stderr, "{diagnostics}", diagnostics = failure.stderr());
            let _ = stderr.flush();
            error!("{failure}");
            process::exit(failure.code());
        }

        error!("{err:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let precompiler = Precompiler::new(&cli.compiler, &cli.shaders, &cli.output);
    precompiler.precompile()?;

    Ok(())
}
