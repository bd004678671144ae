use clap::Parser;
use todo_cache::cli::{
    handle_add, handle_convert, handle_done, handle_get, handle_list, handle_remove, Cli,
    Commands,
};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout stays parseable with --json
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir;
    let format = cli.format;

    let result = match cli.command {
        Commands::Add {
            text,
            priority,
            deadline,
            done,
            id,
            json,
        } => handle_add(data_dir, format, text, priority, deadline, done, id, json),
        Commands::List { json } => handle_list(data_dir, format, json),
        Commands::Get { id, json } => handle_get(data_dir, format, id, json),
        Commands::Done { id, undo } => handle_done(data_dir, format, id, undo),
        Commands::Remove { id, force } => handle_remove(data_dir, format, id, force),
        Commands::Convert { to } => handle_convert(data_dir, format, to),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
