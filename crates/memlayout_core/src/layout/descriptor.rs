use serde::Serialize;

use crate::layout::{FieldType, LayoutError, Result};

/// Per-field payload whose meaning depends on the field's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExtraInfo {
	/// No payload.
	#[default]
	None,
	/// Padding byte count for [`FieldType::Skip`].
	Skip(u64),
}

impl ExtraInfo {
	/// Flatten to the untyped integer shown in the extra-info column.
	pub fn raw(self) -> u64 {
		match self {
			Self::None => 0,
			Self::Skip(bytes) => bytes,
		}
	}
}

/// One named, typed entry of a structure schema.
///
/// Padding entries always carry their byte count; build them with
/// [`FieldDescriptor::skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
	name: Box<str>,
	#[serde(rename = "type")]
	field_type: FieldType,
	extra: ExtraInfo,
}

impl FieldDescriptor {
	/// Build a plain field without payload; [`FieldType::Skip`] is rejected.
	pub fn new(name: impl Into<Box<str>>, field_type: FieldType) -> Result<Self> {
		let name = name.into();
		if field_type == FieldType::Skip {
			return Err(LayoutError::MissingSkipCount { field: name.into() });
		}
		Ok(Self {
			name,
			field_type,
			extra: ExtraInfo::None,
		})
	}

	/// Build a padding entry that skips `bytes` bytes.
	pub fn skip(bytes: u64) -> Self {
		Self {
			name: "-".into(),
			field_type: FieldType::Skip,
			extra: ExtraInfo::Skip(bytes),
		}
	}

	/// Field name, unique only within its schema.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Field kind.
	pub fn field_type(&self) -> FieldType {
		self.field_type
	}

	/// Kind-specific payload.
	pub fn extra(&self) -> ExtraInfo {
		self.extra
	}

	/// Whether this entry only advances the offset.
	pub fn is_padding(&self) -> bool {
		self.field_type == FieldType::Skip
	}
}

/// Compile-time field table entry used by static catalogs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldDef {
	name: &'static str,
	field_type: FieldType,
	skip: u64,
}

impl FieldDef {
	pub(crate) const fn new(name: &'static str, field_type: FieldType) -> Self {
		Self { name, field_type, skip: 0 }
	}

	pub(crate) const fn skip(bytes: u64) -> Self {
		Self {
			name: "-",
			field_type: FieldType::Skip,
			skip: bytes,
		}
	}

	pub(crate) fn to_descriptor(self) -> FieldDescriptor {
		if self.field_type == FieldType::Skip {
			return FieldDescriptor::skip(self.skip);
		}
		FieldDescriptor {
			name: self.name.into(),
			field_type: self.field_type,
			extra: ExtraInfo::None,
		}
	}
}
