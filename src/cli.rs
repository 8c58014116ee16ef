// CLI definitions using clap

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ledrelay")]
#[command(author, version, about = "Relay LED on/off state over UDP")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay daemon: receive LED datagrams and mirror their state
    #[command(visible_alias = "l")]
    Listen {
        /// UDP port to bind (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Brightness (0-255) applied on an unrecognized state token
        #[arg(long, value_name = "N")]
        fallback_brightness: Option<u8>,

        /// Don't print a status line on every applied change
        #[arg(short, long)]
        quiet: bool,
    },

    /// Send one LED state datagram (the kernel module's wire format)
    #[command(visible_alias = "s")]
    Send {
        /// LED channel: R, G or B
        led: String,

        /// Desired state: on or off
        state: String,

        /// Destination address (overrides the config file)
        #[arg(long, value_name = "ADDR")]
        to: Option<String>,
    },

    /// Print the startup state table and exit
    Status,
}
