use memlayout::layout::{FieldKind, FieldType, Result, SchemaRegistry};

use crate::cmd::util::emit_json;

/// Print every field kind with its category and size.
pub fn run(registry: &SchemaRegistry, json: bool) -> Result<()> {
	let rows: Vec<_> = FieldType::ALL
		.into_iter()
		.map(|field_type| TypeJson {
			ident: field_type.ident(),
			name: field_type.display_name(),
			kind: field_type.kind().as_str(),
			size: match field_type.kind() {
				FieldKind::Padding => None,
				_ => registry.size_of(field_type).ok(),
			},
			registered: registry.contains(field_type),
		})
		.collect();

	if json {
		return emit_json(&rows);
	}

	for row in &rows {
		let size = row.size.map_or_else(|| "-".to_owned(), |size| format!("0x{size:x}"));
		println!("{:<26} {:<9} {:>7}  {}", row.ident, row.kind, size, row.name);
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct TypeJson {
	ident: &'static str,
	name: &'static str,
	kind: &'static str,
	size: Option<u64>,
	registered: bool,
}
