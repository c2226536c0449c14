use std::collections::{BTreeMap, HashMap, HashSet};

use crate::layout::{DefaultClassRule, FieldDescriptor, FieldKind, FieldType, LayoutError, Result};

/// Immutable catalog of structure schemas, class hierarchy, and default-class rules.
///
/// Built once through [`RegistryBuilder`] and shared read-only afterwards.
/// Composite sizes are computed during the build and never change.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
	schemas: HashMap<FieldType, Vec<FieldDescriptor>>,
	hierarchy: HashMap<FieldType, FieldType>,
	rules: Vec<DefaultClassRule>,
	fallback_class: FieldType,
	sizes: HashMap<FieldType, u64>,
}

/// Incremental constructor for [`SchemaRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
	schemas: BTreeMap<FieldType, Vec<FieldDescriptor>>,
	hierarchy: BTreeMap<FieldType, FieldType>,
	rules: Vec<(String, FieldType)>,
	fallback_class: FieldType,
}

impl Default for RegistryBuilder {
	fn default() -> Self {
		Self {
			schemas: BTreeMap::new(),
			hierarchy: BTreeMap::new(),
			rules: Vec::new(),
			fallback_class: FieldType::ClassEntity,
		}
	}
}

impl RegistryBuilder {
	/// Start an empty builder falling back to [`FieldType::ClassEntity`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Register (or replace) the own field list of a composite or class type.
	pub fn schema(mut self, field_type: FieldType, fields: Vec<FieldDescriptor>) -> Self {
		self.schemas.insert(field_type, fields);
		self
	}

	/// Declare `base` as the single parent class of `subclass`.
	pub fn base(mut self, subclass: FieldType, base: FieldType) -> Self {
		self.hierarchy.insert(subclass, base);
		self
	}

	/// Append a default-class rule; rules are tried in the order added.
	pub fn rule(mut self, pattern: impl Into<String>, target: FieldType) -> Self {
		self.rules.push((pattern.into(), target));
		self
	}

	/// Class applied when no rule matches.
	pub fn fallback_class(mut self, field_type: FieldType) -> Self {
		self.fallback_class = field_type;
		self
	}

	/// Validate the catalog and precompute composite sizes.
	pub fn build(self) -> Result<SchemaRegistry> {
		for field_type in self.schemas.keys() {
			if !field_type.has_schema() {
				return Err(LayoutError::SchemaNotComposite { field_type: *field_type });
			}
		}

		for (subclass, base) in &self.hierarchy {
			for item in [*subclass, *base] {
				self.check_class(item)?;
			}
		}
		check_hierarchy(&self.hierarchy)?;

		let mut rules = Vec::with_capacity(self.rules.len());
		for (pattern, target) in &self.rules {
			self.check_class(*target)?;
			rules.push(DefaultClassRule::new(pattern, *target)?);
		}

		let mut sizes = HashMap::with_capacity(self.schemas.len());
		let mut visiting = HashSet::new();
		for field_type in self.schemas.keys() {
			compute_size(*field_type, &self.schemas, &self.hierarchy, &mut sizes, &mut visiting)?;
		}
		self.check_class(self.fallback_class)?;

		Ok(SchemaRegistry {
			schemas: self.schemas.into_iter().collect(),
			hierarchy: self.hierarchy.into_iter().collect(),
			rules,
			fallback_class: self.fallback_class,
			sizes,
		})
	}

	fn check_class(&self, field_type: FieldType) -> Result<()> {
		if field_type.kind() != FieldKind::Class {
			return Err(LayoutError::NotAClass { field_type });
		}
		if !self.schemas.contains_key(&field_type) {
			return Err(LayoutError::UnknownType { field_type });
		}
		Ok(())
	}
}

impl SchemaRegistry {
	/// Own field list of `field_type`, excluding inherited fields.
	pub fn schema_for(&self, field_type: FieldType) -> Result<&[FieldDescriptor]> {
		self.schemas
			.get(&field_type)
			.map(Vec::as_slice)
			.ok_or(LayoutError::UnknownType { field_type })
	}

	/// Parent class of `field_type`, if any.
	pub fn base_of(&self, field_type: FieldType) -> Option<FieldType> {
		self.hierarchy.get(&field_type).copied()
	}

	/// Byte size of a type.
	///
	/// [`FieldType::Skip`] reports 0 here; the bytes a padding entry covers
	/// are carried by its descriptor, see [`SchemaRegistry::field_size`].
	pub fn size_of(&self, field_type: FieldType) -> Result<u64> {
		if let Some(size) = field_type.fixed_size() {
			return Ok(size);
		}
		if field_type.kind() == FieldKind::Padding {
			return Ok(0);
		}
		self.sizes.get(&field_type).copied().ok_or(LayoutError::UnknownType { field_type })
	}

	/// Bytes covered by one schema entry.
	pub fn field_size(&self, field: &FieldDescriptor) -> Result<u64> {
		match field.field_type().kind() {
			FieldKind::Padding => Ok(field.extra().raw()),
			_ => self.size_of(field.field_type()),
		}
	}

	/// Full field list of `field_type`, root class fields first.
	pub fn flattened(&self, field_type: FieldType) -> Result<Vec<&FieldDescriptor>> {
		let mut out = Vec::new();
		for item in self.lineage(field_type).into_iter().rev() {
			out.extend(self.schema_for(item)?);
		}
		Ok(out)
	}

	/// `field_type` followed by its ancestors, nearest first.
	pub fn lineage(&self, field_type: FieldType) -> Vec<FieldType> {
		let mut chain = vec![field_type];
		let mut current = field_type;
		while let Some(base) = self.base_of(current) {
			chain.push(base);
			current = base;
		}
		chain
	}

	/// Pick the class schema for an instance from its declared name.
	pub fn classify(&self, instance_name: &str) -> FieldType {
		self.rules
			.iter()
			.find(|rule| rule.matches(instance_name))
			.map_or(self.fallback_class, DefaultClassRule::target)
	}

	/// Class used when classification has nothing to go on.
	pub fn fallback_class(&self) -> FieldType {
		self.fallback_class
	}

	/// Display label for `field_type`.
	pub fn display_name(&self, field_type: FieldType) -> &'static str {
		field_type.display_name()
	}

	/// Default-class rules in evaluation order.
	pub fn rules(&self) -> &[DefaultClassRule] {
		&self.rules
	}

	/// Types with a registered schema, in enum order.
	pub fn registered_types(&self) -> Vec<FieldType> {
		let mut out: Vec<_> = self.schemas.keys().copied().collect();
		out.sort();
		out
	}

	/// Whether `field_type` has a registered schema.
	pub fn contains(&self, field_type: FieldType) -> bool {
		self.schemas.contains_key(&field_type)
	}
}

fn check_hierarchy(hierarchy: &BTreeMap<FieldType, FieldType>) -> Result<()> {
	for start in hierarchy.keys() {
		let mut seen = HashSet::from([*start]);
		let mut current = *start;
		while let Some(base) = hierarchy.get(&current) {
			if !seen.insert(*base) {
				return Err(LayoutError::HierarchyCycle { field_type: *start });
			}
			current = *base;
		}
	}
	Ok(())
}

fn compute_size(
	field_type: FieldType,
	schemas: &BTreeMap<FieldType, Vec<FieldDescriptor>>,
	hierarchy: &BTreeMap<FieldType, FieldType>,
	sizes: &mut HashMap<FieldType, u64>,
	visiting: &mut HashSet<FieldType>,
) -> Result<u64> {
	if let Some(size) = sizes.get(&field_type) {
		return Ok(*size);
	}
	if !visiting.insert(field_type) {
		return Err(LayoutError::SchemaCycle { field_type });
	}

	let fields = schemas.get(&field_type).ok_or(LayoutError::UnknownType { field_type })?;
	let mut total = match hierarchy.get(&field_type) {
		Some(base) => compute_size(*base, schemas, hierarchy, sizes, visiting)?,
		None => 0,
	};

	for field in fields {
		let size = match (field.field_type().kind(), field.field_type().fixed_size()) {
			(FieldKind::Padding, _) => field.extra().raw(),
			(_, Some(size)) => size,
			(_, None) => compute_size(field.field_type(), schemas, hierarchy, sizes, visiting)?,
		};
		total = total.checked_add(size).ok_or(LayoutError::OffsetOverflow { base: total, add: size })?;
	}

	visiting.remove(&field_type);
	sizes.insert(field_type, total);
	Ok(total)
}

#[cfg(test)]
mod tests;
