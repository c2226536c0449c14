use regex::Regex;

use crate::layout::{FieldType, LayoutError, Result};

/// Name pattern selecting the class schema applied to an entity instance.
///
/// Patterns match the whole instance name, so `CHAR_.*` accepts `CHAR_PILOT`
/// but not `MY_CHAR_PILOT`.
#[derive(Debug, Clone)]
pub struct DefaultClassRule {
	pattern: Box<str>,
	regex: Regex,
	target: FieldType,
}

impl DefaultClassRule {
	/// Compile a rule mapping names matching `pattern` to `target`.
	pub fn new(pattern: &str, target: FieldType) -> Result<Self> {
		let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| LayoutError::InvalidRulePattern {
			pattern: pattern.to_owned(),
			source,
		})?;

		Ok(Self {
			pattern: pattern.into(),
			regex,
			target,
		})
	}

	/// Pattern text as authored.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Class kind applied on match.
	pub fn target(&self) -> FieldType {
		self.target
	}

	/// Whether `instance_name` matches this rule in full.
	pub fn matches(&self, instance_name: &str) -> bool {
		self.regex.is_match(instance_name)
	}
}
