//! Shared test helpers for workspace crates.

use std::fs;
use std::path::{Path, PathBuf};

use memlayout::layout::{FieldDescriptor, FieldType, MemoryImage, RegistryBuilder, SchemaRegistry};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Path for a throwaway file under the target directory, unique per process.
pub fn scratch_path(name: &str) -> PathBuf {
	let dir = target_dir().join("memlayout-scratch").join(std::process::id().to_string());
	fs::create_dir_all(&dir).expect("scratch directory is creatable");
	dir.join(name)
}

/// Small registry with a three-level class chain and one inline record.
///
/// `ClassEntity` is `{uid: Dword, tint: Color, owner: EntityPointer}` (28 bytes),
/// `ClassMovable` adds `speed: Float`, `ClassMonster` adds `health: UnsignedByte`
/// plus 3 bytes of padding. Names starting with `MONS_` classify as monsters.
pub fn fixture_registry() -> SchemaRegistry {
	fixture_builder().build().expect("fixture registry builds")
}

/// Builder behind [`fixture_registry`], for tests that extend it.
pub fn fixture_builder() -> RegistryBuilder {
	RegistryBuilder::new()
		.schema(
			FieldType::Color,
			vec![
				field("red", FieldType::Float),
				field("green", FieldType::Float),
				field("blue", FieldType::Float),
				field("alpha", FieldType::Float),
			],
		)
		.schema(
			FieldType::ClassEntity,
			vec![
				field("uid", FieldType::Dword),
				field("tint", FieldType::Color),
				field("owner", FieldType::EntityPointer),
			],
		)
		.schema(FieldType::ClassMovable, vec![field("speed", FieldType::Float)])
		.schema(
			FieldType::ClassMonster,
			vec![field("health", FieldType::UnsignedByte), FieldDescriptor::skip(3)],
		)
		.base(FieldType::ClassMovable, FieldType::ClassEntity)
		.base(FieldType::ClassMonster, FieldType::ClassMovable)
		.rule("MONS_.*", FieldType::ClassMonster)
}

fn field(name: &str, field_type: FieldType) -> FieldDescriptor {
	FieldDescriptor::new(name, field_type).expect("fixture fields are not padding")
}

/// Little-endian byte image assembled at absolute addresses.
#[derive(Debug, Clone)]
pub struct ImageBuilder {
	base: u64,
	bytes: Vec<u8>,
}

impl ImageBuilder {
	/// Zero-filled image of `len` bytes mapped at `base`.
	pub fn new(base: u64, len: usize) -> Self {
		Self { base, bytes: vec![0; len] }
	}

	/// Copy raw bytes to `address`.
	pub fn bytes(mut self, address: u64, value: &[u8]) -> Self {
		let start = usize::try_from(address - self.base).expect("address fits usize");
		self.bytes[start..start + value.len()].copy_from_slice(value);
		self
	}

	/// Write a byte.
	pub fn u8(self, address: u64, value: u8) -> Self {
		self.bytes(address, &[value])
	}

	/// Write a little-endian `i32`.
	pub fn i32(self, address: u64, value: i32) -> Self {
		self.bytes(address, &value.to_le_bytes())
	}

	/// Write a little-endian `u32`.
	pub fn u32(self, address: u64, value: u32) -> Self {
		self.bytes(address, &value.to_le_bytes())
	}

	/// Write a little-endian `f32`.
	pub fn f32(self, address: u64, value: f32) -> Self {
		self.bytes(address, &value.to_le_bytes())
	}

	/// Write a little-endian 8-byte pointer.
	pub fn ptr(self, address: u64, value: u64) -> Self {
		self.bytes(address, &value.to_le_bytes())
	}

	/// Write a NUL-terminated string.
	pub fn c_str(self, address: u64, value: &str) -> Self {
		let mut raw = value.as_bytes().to_vec();
		raw.push(0);
		self.bytes(address, &raw)
	}

	/// Raw image bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}

	/// Finish as an in-memory image.
	pub fn build(self) -> MemoryImage {
		MemoryImage::new(self.base, self.bytes)
	}

	/// Write the raw bytes as a dump file and return its path.
	pub fn write_dump(self, name: &str) -> PathBuf {
		let path = scratch_path(name);
		fs::write(&path, &self.bytes).expect("dump file is writable");
		path
	}
}
