use std::fmt;

use serde::Serialize;

use crate::layout::decode::is_decodable;
use crate::layout::resolve::advance;
use crate::layout::{
	DecodedValue, FieldType, LayoutError, MemorySource, NameOracle, POINTER_SIZE, PointerTarget, PointerValue, ResolvedField, Result, SchemaRegistry, decode, hex, resolve,
};

/// Longest string read when following a `const char**` field.
pub const MAX_C_STRING: u64 = 256;

/// One presentation row: a resolved field with its decoded value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRow {
	/// Field name.
	pub name: Box<str>,
	/// Field kind.
	#[serde(rename = "type")]
	pub field_type: FieldType,
	/// Display label of the kind.
	pub type_name: &'static str,
	/// Absolute address.
	pub offset: u64,
	/// Byte size.
	pub size: u64,
	/// Decoded value or state marker.
	pub value: RowValue,
	/// Little-endian hex of the raw bytes, when they were read.
	pub hex: Option<String>,
}

/// Value column of a [`FieldRow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RowValue {
	/// Primitive decoded from memory.
	Value(DecodedValue),
	/// Nested record; expand it to see its fields.
	Composite,
	/// Memory could not be read; no stale or zeroed value is shown.
	Unavailable,
}

impl fmt::Display for RowValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value(value) => write!(f, "{value}"),
			Self::Composite => f.write_str("{...}"),
			Self::Unavailable => f.write_str("<unavailable>"),
		}
	}
}

/// Resolve `field_type` at `base` and decode every primitive field from `source`.
pub fn inspect<S: MemorySource + ?Sized>(registry: &SchemaRegistry, source: &S, field_type: FieldType, base: u64) -> Result<Vec<FieldRow>> {
	let fields = resolve(registry, field_type, base)?;
	let mut rows = Vec::with_capacity(fields.len());
	for field in fields {
		rows.push(read_row(source, field)?);
	}
	Ok(rows)
}

/// Decode one resolved field into a presentation row.
pub fn read_row<S: MemorySource + ?Sized>(source: &S, field: ResolvedField) -> Result<FieldRow> {
	let (value, hex_text) = if is_decodable(field.field_type) {
		match source.read_bytes(field.offset, field.size) {
			Ok(bytes) => (RowValue::Value(decode(&field, &bytes)?), Some(hex(&bytes))),
			Err(_) => (RowValue::Unavailable, None),
		}
	} else {
		(RowValue::Composite, None)
	};

	Ok(FieldRow {
		name: field.name,
		field_type: field.field_type,
		type_name: field.field_type.display_name(),
		offset: field.offset,
		size: field.size,
		value,
		hex: hex_text,
	})
}

/// Class schema for the entity at `address`; the fallback class when the oracle has no name.
pub fn classify_at<O: NameOracle + ?Sized>(registry: &SchemaRegistry, oracle: &O, address: u64) -> FieldType {
	oracle
		.name_for_offset(address)
		.map_or(registry.fallback_class(), |name| registry.classify(&name))
}

/// Layout to apply at a pointer's address, or `None` when the target has no schema.
pub fn pointer_target_type<O: NameOracle + ?Sized>(registry: &SchemaRegistry, oracle: &O, pointer: &PointerValue) -> Option<FieldType> {
	match pointer.target? {
		PointerTarget::Record(field_type) => Some(field_type),
		PointerTarget::Entity => Some(classify_at(registry, oracle, pointer.address)),
		PointerTarget::CString => None,
	}
}

/// Re-resolve what a non-null typed pointer refers to.
pub fn resolve_pointer<O: NameOracle + ?Sized>(
	registry: &SchemaRegistry,
	oracle: &O,
	pointer: &PointerValue,
) -> Result<Option<(FieldType, Vec<ResolvedField>)>> {
	if pointer.is_null() {
		return Ok(None);
	}
	let Some(field_type) = pointer_target_type(registry, oracle, pointer) else {
		return Ok(None);
	};
	Ok(Some((field_type, resolve(registry, field_type, pointer.address)?)))
}

/// Follow a `const char**` field at `slot` to the string it names.
///
/// The field holds the address of a `char*`; both pointers are read before
/// the bytes. Reads byte by byte so a string ending near the edge of readable
/// memory still decodes. Stops at NUL or after [`MAX_C_STRING`] bytes.
/// Returns `None` when either pointer is null.
pub fn follow_c_string<S: MemorySource + ?Sized>(source: &S, slot: u64) -> Result<Option<String>> {
	let chars = read_pointer(source, slot)?;
	if chars == 0 {
		return Ok(None);
	}
	let mut cursor = read_pointer(source, chars)?;
	if cursor == 0 {
		return Ok(None);
	}

	let mut bytes = Vec::new();
	while (bytes.len() as u64) < MAX_C_STRING {
		match source.read_bytes(cursor, 1)?.first() {
			Some(0) | None => break,
			Some(byte) => bytes.push(*byte),
		}
		cursor = advance(cursor, 1)?;
	}

	Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

fn read_pointer<S: MemorySource + ?Sized>(source: &S, address: u64) -> Result<u64> {
	let raw = source.read_bytes(address, POINTER_SIZE)?;
	let bytes: [u8; 8] = raw.as_slice().try_into().map_err(|_| LayoutError::BufferSizeMismatch {
		expected: POINTER_SIZE,
		got: raw.len(),
	})?;
	Ok(u64::from_le_bytes(bytes))
}
