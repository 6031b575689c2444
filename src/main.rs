use std::io;

use anyhow::Result;
use clap::Parser;
use fonts_config::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Sysconfig files may change the verbosity later; start from the flags.
    fonts_config::debug::init_log_bridge(cli.verbosity().unwrap_or_default());

    log::info!("Starting fonts-config {}", fonts_config::VERSION);

    let result = fonts_config::runner::run(&cli);
    if let Err(ref e) = result {
        let denied = e.chain().any(|cause| {
            cause
                .downcast_ref::<io::Error>()
                .is_some_and(|err| err.kind() == io::ErrorKind::PermissionDenied)
        });
        if denied && !cli.user {
            eprintln!(
                "fonts-config: hint: the system setup needs root permissions; \
                 rerun with --user to configure fonts for the current user"
            );
        }
    }
    // Return the original error so main exits with code 1 (anyhow default)
    result
}
