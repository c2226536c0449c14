use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::layout::{FieldDescriptor, FieldType, LayoutError, RegistryBuilder, Result, SchemaRegistry};

/// On-disk catalog: schemas, hierarchy and default-class rules keyed by type identifier.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
	/// Own field lists per composite or class type.
	#[serde(default)]
	pub schemas: BTreeMap<String, Vec<CatalogField>>,
	/// Subclass to base class.
	#[serde(default)]
	pub hierarchy: BTreeMap<String, String>,
	/// Ordered default-class rules.
	#[serde(default)]
	pub rules: Vec<CatalogRule>,
	/// Class used when no rule matches.
	#[serde(default)]
	pub fallback: Option<String>,
}

/// One schema entry in a catalog file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogField {
	/// Field name; ignored for padding.
	#[serde(default)]
	pub name: String,
	/// Type identifier.
	#[serde(rename = "type")]
	pub field_type: String,
	/// Padding byte count for `Skip` entries.
	#[serde(default)]
	pub skip: Option<u64>,
}

/// One default-class rule in a catalog file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogRule {
	/// Regular expression matched against the whole entity name.
	pub pattern: String,
	/// Class type identifier.
	#[serde(rename = "type")]
	pub field_type: String,
}

impl CatalogFile {
	/// Parse catalog JSON.
	pub fn from_json_str(input: &str) -> Result<Self> {
		Ok(serde_json::from_str(input)?)
	}

	/// Read and parse a catalog JSON file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::from_json_str(&fs::read_to_string(path)?)
	}

	/// Translate type identifiers into a registry builder.
	pub fn to_builder(&self) -> Result<RegistryBuilder> {
		let mut builder = RegistryBuilder::new();

		for (name, fields) in &self.schemas {
			let mut descriptors = Vec::with_capacity(fields.len());
			for field in fields {
				descriptors.push(field.to_descriptor()?);
			}
			builder = builder.schema(name.parse()?, descriptors);
		}

		for (subclass, base) in &self.hierarchy {
			builder = builder.base(subclass.parse()?, base.parse()?);
		}

		for rule in &self.rules {
			builder = builder.rule(rule.pattern.as_str(), rule.field_type.parse()?);
		}

		if let Some(fallback) = &self.fallback {
			builder = builder.fallback_class(fallback.parse()?);
		}

		Ok(builder)
	}

	/// Build and validate the registry described by this catalog.
	pub fn build(&self) -> Result<SchemaRegistry> {
		self.to_builder()?.build()
	}
}

impl CatalogField {
	fn to_descriptor(&self) -> Result<FieldDescriptor> {
		let field_type: FieldType = self.field_type.parse()?;
		match (field_type, self.skip) {
			(FieldType::Skip, Some(bytes)) => Ok(FieldDescriptor::skip(bytes)),
			(FieldType::Skip, None) => Err(LayoutError::MissingSkipCount {
				field: self.name.clone(),
			}),
			(_, Some(_)) => Err(LayoutError::UnexpectedSkipCount {
				field: self.name.clone(),
				field_type,
			}),
			(_, None) => FieldDescriptor::new(self.name.as_str(), field_type),
		}
	}
}

#[cfg(test)]
mod tests;
