use glcli::cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the program
#[tokio::main]
async fn main() {
    // Initialize the logging subsystem
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match cli::execute_command().await {
        Ok(()) => ::std::process::exit(exitcode::OK),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ::std::process::exit(e.exit_code().code());
        }
    }
}
