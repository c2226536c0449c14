use serde::Serialize;

use crate::layout::{ExtraInfo, FieldType, LayoutError, Result, SchemaRegistry};

/// Schema entry bound to an absolute address.
///
/// Created fresh by every [`resolve`] call and never cached; resolving the
/// same type at another base yields a new sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
	/// Field name from the owning schema.
	pub name: Box<str>,
	/// Field kind.
	#[serde(rename = "type")]
	pub field_type: FieldType,
	/// Kind-specific payload copied from the descriptor.
	pub extra: ExtraInfo,
	/// Absolute byte address of the first byte.
	pub offset: u64,
	/// Bytes covered by the field.
	pub size: u64,
}

impl ResolvedField {
	/// Whether the field has its own schema and can be expanded in place.
	pub fn is_expandable(&self) -> bool {
		self.field_type.has_schema()
	}

	/// Resolve the direct children of a composite or class field at its own offset.
	pub fn expand(&self, registry: &SchemaRegistry) -> Result<Vec<ResolvedField>> {
		if !self.is_expandable() {
			return Err(LayoutError::PathNotExpandable {
				field: self.name.to_string(),
				field_type: self.field_type,
			});
		}
		resolve(registry, self.field_type, self.offset)
	}

	/// One past the last byte of the field.
	pub fn end(&self) -> Result<u64> {
		advance(self.offset, self.size)
	}
}

/// Resolve the direct fields of `field_type` laid out at `base`.
///
/// Inherited fields come first, root class outermost. Padding entries move
/// the cursor without producing a field. Composite fields appear as a single
/// entry; expand them with a fresh call at the field offset.
pub fn resolve(registry: &SchemaRegistry, field_type: FieldType, base: u64) -> Result<Vec<ResolvedField>> {
	let mut out = Vec::new();
	resolve_into(registry, field_type, base, &mut out)?;
	Ok(out)
}

fn resolve_into(registry: &SchemaRegistry, field_type: FieldType, base: u64, out: &mut Vec<ResolvedField>) -> Result<u64> {
	let fields = registry.schema_for(field_type)?;
	let mut cursor = match registry.base_of(field_type) {
		Some(parent) => resolve_into(registry, parent, base, out)?,
		None => base,
	};

	for field in fields {
		let size = registry.field_size(field)?;
		let next = advance(cursor, size)?;
		if !field.is_padding() {
			out.push(ResolvedField {
				name: field.name().into(),
				field_type: field.field_type(),
				extra: field.extra(),
				offset: cursor,
				size,
			});
		}
		cursor = next;
	}

	Ok(cursor)
}

pub(crate) fn advance(base: u64, add: u64) -> Result<u64> {
	base.checked_add(add).ok_or(LayoutError::OffsetOverflow { base, add })
}
