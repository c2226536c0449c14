use std::path::Path;

use memlayout::layout::{CatalogFile, FieldType, LayoutError, Result, SchemaRegistry};
use serde::Serialize;

/// Load the catalog named on the command line, or the built-in one.
pub(crate) fn load_registry(catalog: Option<&Path>) -> Result<SchemaRegistry> {
	let Some(path) = catalog else {
		return SchemaRegistry::builtin();
	};

	let file = CatalogFile::open(path)?;
	tracing::debug!(
		path = %path.display(),
		schemas = file.schemas.len(),
		rules = file.rules.len(),
		"loading catalog"
	);
	file.build()
}

/// Parse a `FieldType` identifier, case-insensitively.
pub(crate) fn parse_type(name: &str) -> Result<FieldType> {
	name.parse()
}

/// Parse hex bytes.
///
/// `0x`-prefixed input is read as a little-endian number, most significant
/// byte first, matching the hex column of inspection rows. Bare input is read
/// as bytes in memory order; whitespace between bytes is ignored.
pub(crate) fn parse_hex_bytes(value: &str) -> Result<Vec<u8>> {
	let invalid = || LayoutError::InvalidHex { value: value.to_owned() };
	let trimmed = value.trim();
	let (digits, reversed) = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
		Some(stripped) => (stripped.replace('_', ""), true),
		None => (trimmed.split_whitespace().collect::<String>(), false),
	};
	if digits.is_empty() || digits.len() % 2 != 0 || !digits.is_ascii() {
		return Err(invalid());
	}

	let mut bytes = Vec::with_capacity(digits.len() / 2);
	for idx in (0..digits.len()).step_by(2) {
		bytes.push(u8::from_str_radix(&digits[idx..idx + 2], 16).map_err(|_| invalid())?);
	}
	if reversed {
		bytes.reverse();
	}
	Ok(bytes)
}

/// Render an address as fixed-width lowercase hex.
pub(crate) fn addr_hex(value: u64) -> String {
	format!("0x{value:016x}")
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::{addr_hex, parse_hex_bytes};

	#[test]
	fn prefixed_hex_reads_as_little_endian_number() {
		assert_eq!(parse_hex_bytes("0x3F000000").expect("parses"), vec![0x00, 0x00, 0x00, 0x3f]);
		assert_eq!(parse_hex_bytes("0x0001_0040").expect("parses"), vec![0x40, 0x00, 0x01, 0x00]);
	}

	#[test]
	fn bare_hex_reads_in_memory_order() {
		assert_eq!(parse_hex_bytes("0000003f").expect("parses"), vec![0x00, 0x00, 0x00, 0x3f]);
		assert_eq!(parse_hex_bytes("de ad be ef").expect("parses"), vec![0xde, 0xad, 0xbe, 0xef]);
	}

	#[test]
	fn malformed_hex_is_rejected() {
		for bad in ["", "0x", "abc", "zz", "0xé0"] {
			assert!(parse_hex_bytes(bad).is_err(), "{bad:?} should fail");
		}
	}

	#[test]
	fn addresses_render_fixed_width() {
		assert_eq!(addr_hex(0x10040), "0x0000000000010040");
	}
}
