#![warn(clippy::all, rust_2018_idioms)]

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;
    let args = learnexia_client::cli::Cli::parse();
    let config = learnexia_client::configuration::get_configuration()?;

    if let Err(e) = learnexia_client::tracing::init(&args, &config.logging) {
        eprintln!("Failed to start tracing: {e}");
    }

    let rt = learnexia_client::runtime::create_runtime()?;
    // The runtime must be entered so requests can be spawned onto it
    let _enter = rt.enter();
    rt.block_on(learnexia_client::app::run(args.command, config))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a web front end, there is no browser binary
}
