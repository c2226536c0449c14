#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "memlayout", about = "Game memory field layout tools")]
struct Cli {
	/// JSON catalog used instead of the built-in one.
	#[arg(long, global = true)]
	catalog: Option<PathBuf>,
	/// Raise log verbosity on stderr (repeatable).
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// List every field kind with its size.
	Types {
		#[arg(long)]
		json: bool,
	},
	/// Print the field list of a record or class.
	Schema {
		type_name: String,
		#[arg(long)]
		flatten: bool,
		#[arg(long)]
		json: bool,
	},
	/// Resolve a layout to absolute addresses.
	Resolve {
		type_name: String,
		#[arg(long, default_value = "0")]
		base: String,
		#[arg(long)]
		json: bool,
	},
	/// Pick the class schema for an entity name.
	Classify {
		name: String,
	},
	/// Decode hex bytes as a primitive kind.
	Decode {
		type_name: String,
		hex: String,
		#[arg(long)]
		json: bool,
	},
	/// Decode a layout from a memory dump.
	Inspect {
		dump: PathBuf,
		#[arg(long)]
		image_base: String,
		#[arg(long)]
		at: String,
		#[arg(long = "type", conflicts_with = "name")]
		type_name: Option<String>,
		#[arg(long)]
		name: Option<String>,
		#[arg(long)]
		names: Option<PathBuf>,
		#[arg(long)]
		path: Option<String>,
		#[arg(long)]
		json: bool,
	},
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("memlayout={level}")));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}

fn run(cli: Cli) -> memlayout::layout::Result<()> {
	let registry = cmd::util::load_registry(cli.catalog.as_deref())?;

	match cli.command {
		Commands::Types { json } => cmd::types::run(&registry, json),
		Commands::Schema { type_name, flatten, json } => cmd::schema::run(&registry, &type_name, flatten, json),
		Commands::Resolve { type_name, base, json } => cmd::resolve::run(&registry, &type_name, &base, json),
		Commands::Classify { name } => cmd::classify::run(&registry, &name),
		Commands::Decode { type_name, hex, json } => cmd::decode::run(&type_name, &hex, json),
		Commands::Inspect {
			dump,
			image_base,
			at,
			type_name,
			name,
			names,
			path,
			json,
		} => cmd::inspect::run(
			&registry,
			cmd::inspect::InspectArgs {
				dump,
				image_base,
				at,
				type_name,
				name,
				names,
				path,
				json,
			},
		),
	}
}
