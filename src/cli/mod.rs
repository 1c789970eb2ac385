use clap::Subcommand;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP service receiving chat platform events
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Print the closest catalog requests for a query
    Search {
        query: String,

        #[arg(long, default_value = "8")]
        num: usize,
    },

    /// Run the answer pipeline once and print the reply that would be posted
    Ask {
        text: String,

        /// Print section text and buttons instead of the message JSON
        #[arg(long)]
        plain: bool,
    },
}
