use std::fs;
use std::io::Read;
use std::path::Path;

use crate::layout::resolve::advance;
use crate::layout::{LayoutError, MemorySource, Result};

/// Largest dump accepted after unpacking.
const MAX_DUMP_BYTES: u64 = 512 * 1024 * 1024;
/// Leading bytes of a zstd-packed dump.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// How a dump file was stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpEncoding {
	/// Memory bytes as captured.
	Raw,
	/// Memory bytes packed into a zstd frame.
	Zstd,
}

impl DumpEncoding {
	/// Label shown by the CLI.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Raw => "raw",
			Self::Zstd => "zstd",
		}
	}
}

/// Contiguous memory snapshot mapped at a base address.
#[derive(Debug, Clone)]
pub struct MemoryImage {
	base: u64,
	bytes: Vec<u8>,
	encoding: DumpEncoding,
}

impl MemoryImage {
	/// Map in-memory bytes at `base`.
	pub fn new(base: u64, bytes: Vec<u8>) -> Self {
		Self {
			base,
			bytes,
			encoding: DumpEncoding::Raw,
		}
	}

	/// Read a dump file, raw or zstd-packed, and map it at `base`.
	pub fn open(path: impl AsRef<Path>, base: u64) -> Result<Self> {
		let raw = fs::read(path)?;
		let (encoding, bytes) = unpack_dump(raw)?;
		Ok(Self { base, bytes, encoding })
	}

	/// First mapped address.
	pub fn base(&self) -> u64 {
		self.base
	}

	/// One past the last mapped address.
	pub fn end(&self) -> u64 {
		self.base.saturating_add(self.bytes.len() as u64)
	}

	/// Mapped byte count.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Whether nothing is mapped.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// How the dump was stored on disk.
	pub fn encoding(&self) -> DumpEncoding {
		self.encoding
	}

	/// Whether `[address, address + len)` lies inside the image.
	pub fn contains(&self, address: u64, len: u64) -> bool {
		self.slice(address, len).is_some()
	}

	fn slice(&self, address: u64, len: u64) -> Option<&[u8]> {
		let start = usize::try_from(address.checked_sub(self.base)?).ok()?;
		let end = start.checked_add(usize::try_from(len).ok()?)?;
		self.bytes.get(start..end)
	}
}

impl MemorySource for MemoryImage {
	fn read_bytes(&self, address: u64, len: u64) -> Result<Vec<u8>> {
		if let Some(bytes) = self.slice(address, len) {
			return Ok(bytes.to_vec());
		}

		let reason = match advance(address, len) {
			Ok(_) => format!("outside image 0x{:016x}..0x{:016x}", self.base, self.end()),
			Err(_) => "range wraps the address space".to_owned(),
		};
		Err(LayoutError::ReadFailure { address, len, reason })
	}
}

/// Unpack a dump read from disk. Dumps starting with [`ZSTD_MAGIC`] are
/// inflated; anything else is taken as captured memory.
pub fn unpack_dump(raw: Vec<u8>) -> Result<(DumpEncoding, Vec<u8>)> {
	if !raw.starts_with(&ZSTD_MAGIC) {
		return Ok((DumpEncoding::Raw, raw));
	}

	let decoder = zstd::stream::read::Decoder::new(raw.as_slice())?;
	let mut bytes = Vec::new();
	decoder.take(MAX_DUMP_BYTES + 1).read_to_end(&mut bytes)?;
	if bytes.len() as u64 > MAX_DUMP_BYTES {
		return Err(LayoutError::DumpTooLarge {
			limit: MAX_DUMP_BYTES as usize,
		});
	}
	Ok((DumpEncoding::Zstd, bytes))
}
