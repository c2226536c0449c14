use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::layout::{LayoutError, Result};

/// Supplier of raw bytes from the inspected address space.
///
/// Implementations either return exactly `len` bytes or fail with
/// [`LayoutError::ReadFailure`]; a short buffer is never returned.
pub trait MemorySource {
	/// Read `len` bytes starting at `address`.
	fn read_bytes(&self, address: u64, len: u64) -> Result<Vec<u8>>;
}

/// Supplier of declared entity names used to pick a class schema.
pub trait NameOracle {
	/// Declared type name of the entity at `address`, if it can be determined.
	fn name_for_offset(&self, address: u64) -> Option<String>;
}

/// Oracle that never knows a name; every instance gets the fallback class.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNames;

impl NameOracle for NoNames {
	fn name_for_offset(&self, _address: u64) -> Option<String> {
		None
	}
}

/// Fixed address to entity-name table.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
	names: BTreeMap<u64, String>,
}

impl NameTable {
	/// Empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record `name` for the entity at `address`.
	pub fn insert(&mut self, address: u64, name: impl Into<String>) {
		self.names.insert(address, name.into());
	}

	/// Parse a JSON object mapping address literals to names.
	pub fn from_json_str(input: &str) -> Result<Self> {
		let raw: HashMap<String, String> = serde_json::from_str(input)?;
		let mut table = Self::new();
		for (key, name) in raw {
			table.insert(parse_address(&key)?, name);
		}
		Ok(table)
	}

	/// Load a JSON name table from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::from_json_str(&fs::read_to_string(path)?)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Whether the table is empty.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}

impl NameOracle for NameTable {
	fn name_for_offset(&self, address: u64) -> Option<String> {
		self.names.get(&address).cloned()
	}
}

/// Parse decimal or `0x`-prefixed hex address literal.
pub fn parse_address(value: &str) -> Result<u64> {
	let value = value.trim();
	let parsed = if let Some(stripped) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		u64::from_str_radix(&stripped.replace('_', ""), 16)
	} else {
		value.parse::<u64>()
	};

	parsed.map_err(|_| LayoutError::InvalidAddressLiteral { value: value.to_owned() })
}
