use std::path::PathBuf;

use memlayout::layout::{
	ChaseHop, Expansion, FieldPath, FieldRow, FieldType, LayoutError, MemoryImage, NameTable, Result, SchemaRegistry, chase, classify_at, expansion,
	follow_c_string, inspect, parse_address, read_row,
};

use crate::cmd::util::{addr_hex, emit_json, parse_type};

/// Parsed `inspect` command arguments.
pub struct InspectArgs {
	/// Raw or zstd-compressed dump file.
	pub dump: PathBuf,
	/// Address the first dump byte was read from.
	pub image_base: String,
	/// Address of the inspected instance.
	pub at: String,
	/// Explicit layout to apply.
	pub type_name: Option<String>,
	/// Entity name to classify into a layout.
	pub name: Option<String>,
	/// JSON address-to-name table.
	pub names: Option<PathBuf>,
	/// Dotted field path walked from the instance.
	pub path: Option<String>,
	/// Emit JSON instead of text.
	pub json: bool,
}

/// Decode a layout from a dump file and print its rows.
pub fn run(registry: &SchemaRegistry, args: InspectArgs) -> Result<()> {
	let image = MemoryImage::open(&args.dump, parse_address(&args.image_base)?)?;
	tracing::debug!(
		dump = %args.dump.display(),
		encoding = image.encoding().as_str(),
		base = %addr_hex(image.base()),
		bytes = image.len(),
		"mapped dump"
	);

	let names = match &args.names {
		Some(path) => NameTable::open(path)?,
		None => NameTable::new(),
	};
	let at = parse_address(&args.at)?;
	let root_type = match (&args.type_name, &args.name) {
		(Some(type_name), _) => parse_type(type_name)?,
		(None, Some(name)) => registry.classify(name),
		(None, None) => classify_at(registry, &names, at),
	};

	let mut hops = Vec::new();
	let (layout_type, layout_base, rows) = match &args.path {
		None => (root_type, at, inspect(registry, &image, root_type, at)?),
		Some(path) => {
			let result = chase(registry, &image, &names, root_type, at, &FieldPath::parse(path)?)?;
			for hop in &result.hops {
				tracing::debug!(
					field = %hop.field,
					next_type = hop.next_type.ident(),
					next_base = %addr_hex(hop.next_base),
					via_pointer = hop.via_pointer,
					"path hop"
				);
			}
			hops = result.hops;

			match expansion(registry, &image, &names, &result.field) {
				Ok(Expansion::Inline { field_type, base } | Expansion::Pointer { field_type, address: base }) => {
					(field_type, base, inspect(registry, &image, field_type, base)?)
				}
				Ok(Expansion::NullPointer | Expansion::Leaf) | Err(LayoutError::ReadFailure { .. }) => {
					(result.owner, result.field.offset, vec![read_row(&image, result.field)?])
				}
				Err(err) => return Err(err),
			}
		}
	};

	let rows: Vec<_> = rows
		.into_iter()
		.map(|row| {
			let text = match row.field_type {
				FieldType::ConstCharPointerPointer => follow_c_string(&image, row.offset).ok().flatten(),
				_ => None,
			};
			RowJson { row, text }
		})
		.collect();

	let payload = InspectJson {
		dump: args.dump.display().to_string(),
		encoding: image.encoding().as_str(),
		image_base: addr_hex(image.base()),
		root_type: root_type.ident(),
		at: addr_hex(at),
		path: args.path,
		hops,
		layout_type: layout_type.ident(),
		layout_base: addr_hex(layout_base),
		rows,
	};

	if args.json {
		return emit_json(&payload);
	}

	println!("dump: {}", payload.dump);
	println!("encoding: {}", payload.encoding);
	println!("root_type: {}", payload.root_type);
	println!("at: {}", payload.at);
	if let Some(path) = &payload.path {
		println!("path: {path}");
		for (idx, hop) in payload.hops.iter().enumerate() {
			let arrow = if hop.via_pointer { "->" } else { "." };
			println!("  {idx}: {} {arrow} {} @ {}", hop.field, hop.next_type.ident(), addr_hex(hop.next_base));
		}
	}
	println!("layout: {} @ {}", payload.layout_type, payload.layout_base);
	for item in &payload.rows {
		print_row(&item.row, item.text.as_deref());
	}
	Ok(())
}

fn print_row(row: &FieldRow, text: Option<&str>) {
	let hex = row.hex.as_deref().unwrap_or("-");
	match text {
		Some(text) => println!(
			"  {} {:<24} {:<28} = {} {hex} -> {text:?}",
			addr_hex(row.offset),
			row.type_name,
			row.name,
			row.value
		),
		None => println!("  {} {:<24} {:<28} = {} {hex}", addr_hex(row.offset), row.type_name, row.name, row.value),
	}
}

#[derive(serde::Serialize)]
struct RowJson {
	#[serde(flatten)]
	row: FieldRow,
	text: Option<String>,
}

#[derive(serde::Serialize)]
struct InspectJson {
	dump: String,
	encoding: &'static str,
	image_base: String,
	root_type: &'static str,
	at: String,
	path: Option<String>,
	hops: Vec<ChaseHop>,
	layout_type: &'static str,
	layout_base: String,
	rows: Vec<RowJson>,
}
