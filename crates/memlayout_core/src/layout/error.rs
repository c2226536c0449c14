use thiserror::Error;

use crate::layout::FieldType;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors produced while building schemas, resolving layouts, and decoding values.
#[derive(Debug, Error)]
pub enum LayoutError {
	/// Type has no registered schema.
	#[error("unknown type: {field_type:?} ({})", field_type.display_name())]
	UnknownType {
		/// Requested type.
		field_type: FieldType,
	},
	/// Offset arithmetic left the addressable range.
	#[error("offset overflow: 0x{base:016x} + 0x{add:x}")]
	OffsetOverflow {
		/// Address before the addition.
		base: u64,
		/// Bytes being added.
		add: u64,
	},
	/// Decoder was handed a buffer of the wrong length.
	#[error("buffer size mismatch: expected {expected} bytes, got {got}")]
	BufferSizeMismatch {
		/// Declared field size.
		expected: u64,
		/// Provided buffer length.
		got: usize,
	},
	/// Memory source could not satisfy a read.
	#[error("read failure at 0x{address:016x} ({len} bytes): {reason}")]
	ReadFailure {
		/// Start address of the failed read.
		address: u64,
		/// Requested length.
		len: u64,
		/// Source-specific reason.
		reason: String,
	},
	/// Value decoding requested for a type that has no scalar representation.
	#[error("type {field_type:?} is not decodable as a value")]
	NotDecodable {
		/// Offending type.
		field_type: FieldType,
	},
	/// Class hierarchy loops back on itself.
	#[error("class hierarchy cycle through {field_type:?}")]
	HierarchyCycle {
		/// Type where the cycle was detected.
		field_type: FieldType,
	},
	/// Inline composites contain each other.
	#[error("schema containment cycle through {field_type:?}")]
	SchemaCycle {
		/// Type where the cycle was detected.
		field_type: FieldType,
	},
	/// Schema or hierarchy entry registered for a type that cannot own fields.
	#[error("type {field_type:?} cannot own a schema")]
	SchemaNotComposite {
		/// Offending type.
		field_type: FieldType,
	},
	/// Hierarchy entry, rule target or fallback is not a class kind.
	#[error("type {field_type:?} is not a class")]
	NotAClass {
		/// Offending type.
		field_type: FieldType,
	},
	/// Padding entry declared without a byte count.
	#[error("padding entry {field:?} has no skip count")]
	MissingSkipCount {
		/// Entry name as given.
		field: String,
	},
	/// Skip count attached to a field that is not padding.
	#[error("field {field:?} of type {field_type:?} cannot carry a skip count")]
	UnexpectedSkipCount {
		/// Field name.
		field: String,
		/// Declared type.
		field_type: FieldType,
	},
	/// Default-class rule pattern failed to compile.
	#[error("invalid class rule pattern {pattern:?}: {source}")]
	InvalidRulePattern {
		/// Pattern text as authored.
		pattern: String,
		/// Regex compiler error.
		#[source]
		source: regex::Error,
	},
	/// Type identifier not recognized.
	#[error("unknown type name: {name}")]
	UnknownTypeName {
		/// Identifier as given.
		name: String,
	},
	/// Catalog, name table, or report JSON failed to parse or render.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Unpacked dump is larger than the image size cap.
	#[error("dump unpacks to more than {limit} bytes")]
	DumpTooLarge {
		/// Byte cap.
		limit: usize,
	},
	/// Address literal is neither decimal nor `0x` hex.
	#[error("invalid address literal: {value}")]
	InvalidAddressLiteral {
		/// User-provided text.
		value: String,
	},
	/// Hex byte string is malformed.
	#[error("invalid hex bytes: {value}")]
	InvalidHex {
		/// User-provided text.
		value: String,
	},
	/// Field path expression syntax is invalid.
	#[error("invalid field path: {path}")]
	InvalidFieldPath {
		/// Path text as given.
		path: String,
	},
	/// Field path names a field the current type does not have.
	#[error("no field {field} on {field_type:?}")]
	PathFieldNotFound {
		/// Type being searched.
		field_type: FieldType,
		/// Missing field name.
		field: String,
	},
	/// Field path continues through a field that cannot be expanded.
	#[error("field {field} of type {field_type:?} cannot be expanded")]
	PathNotExpandable {
		/// Field name.
		field: String,
		/// Field type.
		field_type: FieldType,
	},
	/// Pointer followed by a path was null.
	#[error("null pointer in field {field}")]
	NullPointer {
		/// Field holding the null pointer.
		field: String,
	},
}
