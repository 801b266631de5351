use clap::{Parser, ValueEnum};
use miette::Result;
use dimcheck::cli::{commands, Cli, Commands, OutputFormat};
use dimcheck::core::Config;

fn main() -> Result<()> {
    // Terminate quietly on a closed pipe (e.g. `dimcheck entities x | head`)
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
    let mut global = cli.global;
    if global.format == OutputFormat::Auto {
        if let Some(format) = Config::load()
            .default_format
            .and_then(|f| OutputFormat::from_str(&f, true).ok())
        {
            global.format = format;
        }
    }

    match cli.command {
        Commands::Annotate(args) => commands::annotate::run(args, &global),
        Commands::Classify(args) => commands::classify::run(args, &global),
        Commands::Bands(args) => commands::classify::run_bands(args, &global),
        Commands::Layers(args) => commands::layers::run(args, &global),
        Commands::Entities(args) => commands::entities::run(args, &global),
        Commands::Report(args) => commands::report::run(args, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
