use crate::layout::{LayoutError, Result};

/// Parsed dotted field path such as `type.rect_collision.side`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
	/// Field names in walk order.
	pub steps: Vec<String>,
}

impl FieldPath {
	/// Parse dotted field syntax.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || LayoutError::InvalidFieldPath { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let mut steps = Vec::new();
		for part in input.split('.') {
			if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'*') {
				return Err(invalid());
			}
			steps.push(part.to_owned());
		}

		Ok(Self { steps })
	}

	/// Number of steps.
	pub fn len(&self) -> usize {
		self.steps.len()
	}

	/// Whether the path has no steps.
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::FieldPath;

	#[test]
	fn dotted_names_split_into_steps() {
		let path = FieldPath::parse("type.rect_collision.side").expect("path parses");
		assert_eq!(path.steps, ["type", "rect_collision", "side"]);
	}

	#[test]
	fn star_suffix_is_part_of_a_name() {
		let path = FieldPath::parse("layer0.first_entity*").expect("path parses");
		assert_eq!(path.len(), 2);
		assert_eq!(path.steps[1], "first_entity*");
	}

	#[test]
	fn malformed_paths_are_rejected() {
		for bad in ["", ".", "a..b", "a.", ".a", "a[0]", "a b"] {
			assert!(FieldPath::parse(bad).is_err(), "{bad:?} should fail");
		}
	}
}
