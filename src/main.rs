use clap::{CommandFactory, Parser};
use clap_complete::generate;
use miette::{IntoDiagnostic, Result};
use std::io::{self, IsTerminal};

use kshell::cli::shell::{banner, farewell};
use kshell::cli::{Cli, OutputFormat, Shell};
use kshell::core::{Config, KafkaSession};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if cli.global.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "kshell", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load();

    let Some(server) = cli.server.clone().or_else(|| config.server.clone()) else {
        Cli::command().print_help().into_diagnostic()?;
        println!();
        return Ok(());
    };

    let format = OutputFormat::resolve(cli.global.format, config.format.as_deref());
    let client_id = cli.client_id.as_deref().unwrap_or(config.client_id());

    let session =
        KafkaSession::connect(&server, client_id).map_err(|e| miette::miette!("{}", e))?;

    let mut shell = Shell::new(session, format);
    if io::stdin().is_terminal() {
        if !cli.global.quiet {
            println!("{}", banner());
        }
        kshell::cli::interrupt::install().into_diagnostic()?;
        shell
            .run_interactive(config.history_size())
            .into_diagnostic()?;
        println!("\n{}", farewell());
    } else {
        shell
            .run_script(io::stdin().lock(), &mut io::stdout())
            .into_diagnostic()?;
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(io::stderr)
        .init();
}
