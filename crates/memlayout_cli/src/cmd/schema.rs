use memlayout::layout::{ExtraInfo, FieldDescriptor, Result, SchemaRegistry};

use crate::cmd::util::{emit_json, parse_type};

/// Print the own or flattened field list of a record or class.
pub fn run(registry: &SchemaRegistry, type_name: &str, flatten: bool, json: bool) -> Result<()> {
	let field_type = parse_type(type_name)?;
	let fields: Vec<&FieldDescriptor> = if flatten {
		registry.flattened(field_type)?
	} else {
		registry.schema_for(field_type)?.iter().collect()
	};

	let mut rows = Vec::with_capacity(fields.len());
	for field in fields {
		rows.push(FieldJson {
			name: field.name().to_owned(),
			field_type: field.field_type().ident(),
			extra: field.extra(),
			size: registry.field_size(field)?,
		});
	}

	let payload = SchemaJson {
		field_type: field_type.ident(),
		name: field_type.display_name(),
		size: registry.size_of(field_type)?,
		base: registry.base_of(field_type).map(|base| base.ident()),
		flattened: flatten,
		fields: rows,
	};

	if json {
		return emit_json(&payload);
	}

	println!("type: {} ({})", payload.field_type, payload.name);
	println!("size: 0x{:x}", payload.size);
	if let Some(base) = payload.base {
		println!("base: {base}");
	}
	println!("fields: {}", payload.fields.len());
	for field in &payload.fields {
		match field.extra {
			ExtraInfo::Skip(bytes) => println!("  {:<24} skip 0x{bytes:x}", field.field_type),
			ExtraInfo::None => println!("  {:<24} {:<28} 0x{:x}", field.field_type, field.name, field.size),
		}
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	#[serde(rename = "type")]
	field_type: &'static str,
	extra: ExtraInfo,
	size: u64,
}

#[derive(serde::Serialize)]
struct SchemaJson {
	#[serde(rename = "type")]
	field_type: &'static str,
	name: &'static str,
	size: u64,
	base: Option<&'static str>,
	flattened: bool,
	fields: Vec<FieldJson>,
}
