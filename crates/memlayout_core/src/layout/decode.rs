use std::fmt;

use serde::{Serialize, Serializer};

use crate::layout::{FieldKind, FieldType, LayoutError, PointerTarget, ResolvedField, Result};

/// Set bits of a 32-bit flag field, numbered 1..=32 from the least significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagSet(u32);

impl FlagSet {
	/// Wrap raw flag bits.
	pub fn from_bits(bits: u32) -> Self {
		Self(bits)
	}

	/// Raw flag bits.
	pub fn bits(self) -> u32 {
		self.0
	}

	/// Whether 1-indexed `position` is set; out-of-range positions are never set.
	pub fn contains(self, position: u8) -> bool {
		(1..=32).contains(&position) && self.0 & (1 << (position - 1)) != 0
	}

	/// Set positions in ascending order.
	pub fn positions(self) -> Vec<u8> {
		(1..=32).filter(|position| self.contains(*position)).collect()
	}

	/// Whether no flag is set.
	pub fn is_empty(self) -> bool {
		self.0 == 0
	}
}

impl fmt::Display for FlagSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("{")?;
		for (idx, position) in self.positions().into_iter().enumerate() {
			if idx > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{position}")?;
		}
		f.write_str("}")
	}
}

impl Serialize for FlagSet {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_seq(self.positions())
	}
}

/// Raw pointer plus what following it would resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointerValue {
	/// Address stored in the field.
	pub address: u64,
	/// Layout to re-resolve at `address`; `None` for untyped pointers.
	pub target: Option<PointerTarget>,
}

impl PointerValue {
	/// Whether the stored address is null.
	pub fn is_null(&self) -> bool {
		self.address == 0
	}
}

/// Typed value decoded from a primitive field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DecodedValue {
	/// Sign-extended integer.
	Signed(i64),
	/// Zero-extended integer.
	Unsigned(u64),
	/// Single precision float.
	Float(f32),
	/// Nonzero byte.
	Bool(bool),
	/// Flag positions.
	Flags(FlagSet),
	/// Address with follow-up marker.
	Pointer(PointerValue),
	/// NUL-terminated text.
	Text(String),
}

impl fmt::Display for DecodedValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Signed(v) => write!(f, "{v}"),
			Self::Unsigned(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::Bool(v) => write!(f, "{v}"),
			Self::Flags(v) => write!(f, "{v}"),
			Self::Pointer(v) => write!(f, "0x{:016X}", v.address),
			Self::Text(v) => write!(f, "{v:?}"),
		}
	}
}

/// Decode the bytes of a resolved primitive field.
///
/// `bytes` must hold exactly `field.size` bytes; a short or absent read is
/// never decoded partially.
pub fn decode(field: &ResolvedField, bytes: &[u8]) -> Result<DecodedValue> {
	if !is_decodable(field.field_type) {
		return Err(LayoutError::NotDecodable {
			field_type: field.field_type,
		});
	}
	if bytes.len() as u64 != field.size {
		return Err(LayoutError::BufferSizeMismatch {
			expected: field.size,
			got: bytes.len(),
		});
	}
	decode_as(field.field_type, bytes)
}

/// Decode `bytes` as a value of `field_type`, which must be a pointer or scalar kind.
pub fn decode_as(field_type: FieldType, bytes: &[u8]) -> Result<DecodedValue> {
	let value = match field_type {
		FieldType::Byte => DecodedValue::Signed(i64::from(i8::from_le_bytes(array(bytes)?))),
		FieldType::UnsignedByte => DecodedValue::Unsigned(u64::from(u8::from_le_bytes(array(bytes)?))),
		FieldType::Word => DecodedValue::Signed(i64::from(i16::from_le_bytes(array(bytes)?))),
		FieldType::UnsignedWord => DecodedValue::Unsigned(u64::from(u16::from_le_bytes(array(bytes)?))),
		FieldType::Dword => DecodedValue::Signed(i64::from(i32::from_le_bytes(array(bytes)?))),
		FieldType::UnsignedDword | FieldType::EntityDbId => DecodedValue::Unsigned(u64::from(u32::from_le_bytes(array(bytes)?))),
		FieldType::Qword => DecodedValue::Signed(i64::from_le_bytes(array(bytes)?)),
		FieldType::UnsignedQword => DecodedValue::Unsigned(u64::from_le_bytes(array(bytes)?)),
		FieldType::Float => DecodedValue::Float(f32::from_le_bytes(array(bytes)?)),
		FieldType::Bool => DecodedValue::Bool(array::<1>(bytes)?[0] != 0),
		FieldType::Flags32 => DecodedValue::Flags(FlagSet::from_bits(u32::from_le_bytes(array(bytes)?))),
		_ if field_type.is_pointer() => DecodedValue::Pointer(PointerValue {
			address: u64::from_le_bytes(array(bytes)?),
			target: field_type.pointer_target(),
		}),
		_ => return Err(LayoutError::NotDecodable { field_type }),
	};
	Ok(value)
}

/// Decode a fixed-size text buffer up to the first NUL byte.
pub fn decode_text(bytes: &[u8]) -> DecodedValue {
	let end = bytes.iter().position(|byte| *byte == 0).unwrap_or(bytes.len());
	DecodedValue::Text(String::from_utf8_lossy(&bytes[..end]).into_owned())
}

/// Render little-endian `bytes` as a zero-padded uppercase hex number.
pub fn hex(bytes: &[u8]) -> String {
	let mut out = String::with_capacity(2 + bytes.len() * 2);
	out.push_str("0x");
	for byte in bytes.iter().rev() {
		out.push_str(&format!("{byte:02X}"));
	}
	out
}

/// Whether [`decode`] accepts fields of this type.
pub fn is_decodable(field_type: FieldType) -> bool {
	matches!(field_type.kind(), FieldKind::Pointer | FieldKind::Scalar)
}

fn array<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
	bytes.try_into().map_err(|_| LayoutError::BufferSizeMismatch {
		expected: N as u64,
		got: bytes.len(),
	})
}
