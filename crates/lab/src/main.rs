use clap::Parser;
use trellis_lab::Cli;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	trellis_lab::init_tracing(cli.verbose);
	trellis_lab::run(&cli, &mut std::io::stdout().lock())
}
