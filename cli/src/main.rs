use clap::Parser;
use regolo_cli::{logging, run, Cli};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();
    let reply = run(&cli)?;
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}
