use serde::Serialize;

use crate::layout::inspect::pointer_target_type;
use crate::layout::{
	DecodedValue, FieldPath, FieldType, LayoutError, MemorySource, NameOracle, ResolvedField, Result, SchemaRegistry, decode, resolve,
};

/// What lies beneath a resolved field when a caller expands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expansion {
	/// Composite laid out in place.
	Inline {
		/// Record or class type.
		field_type: FieldType,
		/// Address of its first byte.
		base: u64,
	},
	/// Typed pointer whose target layout lives elsewhere.
	Pointer {
		/// Target layout.
		field_type: FieldType,
		/// Address read from the field.
		address: u64,
	},
	/// Typed pointer holding null.
	NullPointer,
	/// Nothing to expand.
	Leaf,
}

/// One followed step of a chase.
#[derive(Debug, Clone, Serialize)]
pub struct ChaseHop {
	/// Field name walked through.
	pub field: String,
	/// Field type walked through.
	pub field_type: FieldType,
	/// Address of the field itself.
	pub offset: u64,
	/// Layout entered after the step.
	pub next_type: FieldType,
	/// Base of the entered layout.
	pub next_base: u64,
	/// Whether a pointer was dereferenced.
	pub via_pointer: bool,
}

/// Outcome of walking a field path.
#[derive(Debug, Clone, Serialize)]
pub struct ChaseResult {
	/// Final field named by the path.
	pub field: ResolvedField,
	/// Layout the final field belongs to.
	pub owner: FieldType,
	/// Steps taken before reaching the final field.
	pub hops: Vec<ChaseHop>,
}

/// Determine how `field` expands, reading pointer fields from `source`.
pub fn expansion<S, O>(registry: &SchemaRegistry, source: &S, oracle: &O, field: &ResolvedField) -> Result<Expansion>
where
	S: MemorySource + ?Sized,
	O: NameOracle + ?Sized,
{
	if field.is_expandable() {
		return Ok(Expansion::Inline {
			field_type: field.field_type,
			base: field.offset,
		});
	}
	if field.field_type.pointer_target().is_none() {
		return Ok(Expansion::Leaf);
	}

	let bytes = source.read_bytes(field.offset, field.size)?;
	let DecodedValue::Pointer(pointer) = decode(field, &bytes)? else {
		return Ok(Expansion::Leaf);
	};
	if pointer.is_null() {
		return Ok(Expansion::NullPointer);
	}

	Ok(match pointer_target_type(registry, oracle, &pointer) {
		Some(field_type) => Expansion::Pointer {
			field_type,
			address: pointer.address,
		},
		None => Expansion::Leaf,
	})
}

/// Walk `path` from `field_type` at `base`, stepping into composites and typed pointers.
pub fn chase<S, O>(registry: &SchemaRegistry, source: &S, oracle: &O, field_type: FieldType, base: u64, path: &FieldPath) -> Result<ChaseResult>
where
	S: MemorySource + ?Sized,
	O: NameOracle + ?Sized,
{
	let Some((last, walk)) = path.steps.split_last() else {
		return Err(LayoutError::InvalidFieldPath { path: String::new() });
	};

	let mut current = field_type;
	let mut cursor = base;
	let mut hops = Vec::new();

	for step in walk {
		let field = find_field(registry, current, cursor, step)?;
		let (next_type, next_base, via_pointer) = match expansion(registry, source, oracle, &field)? {
			Expansion::Inline { field_type, base } => (field_type, base, false),
			Expansion::Pointer { field_type, address } => (field_type, address, true),
			Expansion::NullPointer => return Err(LayoutError::NullPointer { field: step.clone() }),
			Expansion::Leaf => {
				return Err(LayoutError::PathNotExpandable {
					field: step.clone(),
					field_type: field.field_type,
				});
			}
		};

		hops.push(ChaseHop {
			field: step.clone(),
			field_type: field.field_type,
			offset: field.offset,
			next_type,
			next_base,
			via_pointer,
		});
		current = next_type;
		cursor = next_base;
	}

	Ok(ChaseResult {
		field: find_field(registry, current, cursor, last)?,
		owner: current,
		hops,
	})
}

fn find_field(registry: &SchemaRegistry, field_type: FieldType, base: u64, name: &str) -> Result<ResolvedField> {
	resolve(registry, field_type, base)?
		.into_iter()
		.find(|field| field.name.as_ref() == name)
		.ok_or_else(|| LayoutError::PathFieldNotFound {
			field_type,
			field: name.to_owned(),
		})
}

#[cfg(test)]
mod tests;
