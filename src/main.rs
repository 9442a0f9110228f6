// serial-ws-echo - Serial to websocket relay
use clap::Parser;
use serial_ws_echo::cli::{execute_command, Args};
use serial_ws_echo::EchoError;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = execute_command(args).await {
        if let EchoError::Config { .. } = e {
            eprintln!("Error: {}", e);
            eprintln!("Run 'serial-ws-echo --help' for usage.");
        } else {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}
