//! Basic usage example for the libretag library.
//!
//! Resolves a retag operation and runs it against Docker Hub using
//! `DOCKER_USER` and `DOCKER_PASS` from the environment.
//!
//! Run with: cargo run --example basic_usage -- myorg/app:1.2.3 stable

use libretag::{Config, Credentials, Retagger, resolve};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let op = resolve(args.as_slice())?;
    println!("Resolved: {}", op);

    let credentials = Credentials::from_env()?;
    let retagger = Retagger::from_config(&Config::load(None)?)?;

    match retagger.retag(&op, &credentials).await {
        Ok(retagged) => {
            println!("{}", retagged);
            println!("Manifest digest: {}", retagged.digest);
        }
        Err(e) => {
            eprintln!("Retag failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
