use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use message_sender::{parse_channel_id, send, DeviceNode, SendError};

#[derive(Parser)]
#[command(name = "message_sender")]
#[command(about = "Write one message to a message slot channel", long_about = None)]
struct Cli {
    /// Message slot device file
    device: PathBuf,

    /// Channel id (non-zero)
    channel: String,

    /// Message to write
    message: String,
}

fn run(cli: &Cli) -> Result<usize, SendError> {
    let id = parse_channel_id(&cli.channel)?;
    let mut node = DeviceNode::open(&cli.device)?;
    send(&mut node, id, cli.message.as_bytes())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(written) => {
            log::info!("{}: {} bytes on channel {}", cli.device.display(), written, cli.channel);
            eprintln!("done writing");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error - {err}");
            ExitCode::FAILURE
        }
    }
}
