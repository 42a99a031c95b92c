//! ftclient - Entry Point
//!
//! Lists files on, or fetches a file from, a two-channel file server.

use clap::Parser;
use log::info;
use std::process;

use ftclient::cli::{CliArgs, resolve_request};
use ftclient::config::ClientConfig;
use ftclient::console::{Console, StdConsole};
use ftclient::error::{ClientError, exit_code, handle_error};
use ftclient::session::Session;
use ftclient::utils::logging::setup_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    setup_logging();

    let args = CliArgs::parse();
    let mut console = StdConsole::new();

    if let Err(e) = run(&args, &mut console).await {
        handle_error(&e);
        match e {
            ClientError::ControlProtocol(ref message) => console.print(message),
            ref other => eprintln!("{}", other),
        }
        process::exit(exit_code(&e));
    }
}

async fn run(args: &CliArgs, console: &mut StdConsole) -> Result<(), ClientError> {
    let config = ClientConfig::load(args.config.as_deref())?;
    let request = resolve_request(args, &config, console).await?;

    info!("Starting session with {}:{}", request.host, request.control_port);
    let mut session = Session::new(request, config);
    session.run(console).await?;
    Ok(())
}
