mod commands;
mod terminal;

use commands::{CommandLine, Commands, hosts, ip, ports};
use lanscope_common::config::ScanConfig;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose)?;
    print::banner();

    let mut cfg = ScanConfig::default();

    let result = match commands.command {
        Commands::Hosts(args) => {
            args.apply(&mut cfg);
            hosts::hosts(&cfg).await
        }
        Commands::Open(args) => {
            args.apply(&mut cfg);
            ports::open(&cfg).await
        }
        Commands::Free(args) => {
            args.apply(&mut cfg);
            ports::free(&cfg).await
        }
        Commands::Ip => ip::ip(),
    };

    print::end_of_program();
    result
}
