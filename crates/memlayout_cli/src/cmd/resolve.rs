use memlayout::layout::{ResolvedField, Result, SchemaRegistry, parse_address, resolve};

use crate::cmd::util::{addr_hex, emit_json, parse_type};

/// Resolve a layout at `base` and print every field address.
pub fn run(registry: &SchemaRegistry, type_name: &str, base: &str, json: bool) -> Result<()> {
	let field_type = parse_type(type_name)?;
	let base = parse_address(base)?;
	let fields = resolve(registry, field_type, base)?;
	let size = registry.size_of(field_type)?;

	if json {
		return emit_json(&ResolveJson {
			field_type: field_type.ident(),
			base: addr_hex(base),
			size,
			fields,
		});
	}

	println!("type: {}", field_type.ident());
	println!("base: {}", addr_hex(base));
	println!("size: 0x{size:x}");
	for field in &fields {
		println!(
			"  {} +0x{:<5x} {:<24} {:<28} 0x{:x}",
			addr_hex(field.offset),
			field.offset - base,
			field.field_type.display_name(),
			field.name,
			field.size
		);
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct ResolveJson {
	#[serde(rename = "type")]
	field_type: &'static str,
	base: String,
	size: u64,
	fields: Vec<ResolvedField>,
}
