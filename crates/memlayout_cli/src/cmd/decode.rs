use memlayout::layout::{DecodedValue, ExtraInfo, LayoutError, ResolvedField, Result, decode, hex, is_decodable};

use crate::cmd::util::{emit_json, parse_hex_bytes, parse_type};

/// Decode command-line hex bytes as a primitive field kind.
pub fn run(type_name: &str, input: &str, json: bool) -> Result<()> {
	let field_type = parse_type(type_name)?;
	let size = field_type
		.fixed_size()
		.filter(|_| is_decodable(field_type))
		.ok_or(LayoutError::NotDecodable { field_type })?;
	let bytes = parse_hex_bytes(input)?;

	let field = ResolvedField {
		name: "value".into(),
		field_type,
		extra: ExtraInfo::None,
		offset: 0,
		size,
	};
	let value = decode(&field, &bytes)?;

	if json {
		return emit_json(&DecodeJson {
			field_type: field_type.ident(),
			hex: hex(&bytes),
			value,
		});
	}

	println!("type: {}", field_type.display_name());
	println!("hex: {}", hex(&bytes));
	println!("value: {value}");
	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson {
	#[serde(rename = "type")]
	field_type: &'static str,
	hex: String,
	value: DecodedValue,
}
