use tracing_subscriber::EnvFilter;

fn main() {
    // Quiet by default; RUST_LOG=debug shows fallback usage.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(err) = memory_graph_layout::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
