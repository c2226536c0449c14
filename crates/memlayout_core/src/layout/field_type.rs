use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::{LayoutError, Result};

/// Width of every pointer kind in the inspected process.
pub const POINTER_SIZE: u64 = 8;

/// Closed set of memory field kinds understood by the schema registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldType {
	/// Pointer into executable code.
	CodePointer,
	/// Untyped pointer to data.
	DataPointer,
	/// Signed 8-bit integer.
	Byte,
	/// Unsigned 8-bit integer.
	UnsignedByte,
	/// Signed 16-bit integer.
	Word,
	/// Unsigned 16-bit integer.
	UnsignedWord,
	/// Signed 32-bit integer.
	Dword,
	/// Unsigned 32-bit integer.
	UnsignedDword,
	/// Signed 64-bit integer.
	Qword,
	/// Unsigned 64-bit integer.
	UnsignedQword,
	/// IEEE-754 single precision float.
	Float,
	/// One-byte boolean.
	Bool,
	/// 32-bit flag set, displayed 1-indexed.
	Flags32,
	/// Unlabelled filler; byte count lives in the descriptor.
	Skip,
	/// Collision rectangle record.
	Rect,
	/// Illumination record referenced from the game state.
	StateIllumination,
	/// Pointer to a [`FieldType::StateIllumination`] record.
	StateIlluminationPointer,
	/// Saturation and vignette record.
	StateSaturationVignette,
	/// Player items record referenced from the game state.
	StateItems,
	/// Pointer to a [`FieldType::StateItems`] record.
	StateItemsPointer,
	/// Entity layer record.
	Layer,
	/// Pointer to a [`FieldType::Layer`] record.
	LayerPointer,
	/// Pointer to an entity instance; subclass picked by classification.
	EntityPointer,
	/// Pointer to an [`FieldType::EntityDb`] record.
	EntityDbPointer,
	/// Entity database type identifier.
	EntityDbId,
	/// Dynamic array header.
	Vector,
	/// RGBA float color.
	Color,
	/// Pointer to a [`FieldType::Texture`] record.
	TexturePointer,
	/// Pointer to a pointer to a NUL-terminated string.
	ConstCharPointerPointer,
	/// Ordered map header.
	Map,
	/// Texture descriptor record.
	Texture,
	/// Entity database record.
	EntityDb,
	/// Global game state record.
	State,
	/// Root entity class.
	ClassEntity,
	/// Movable entity class.
	ClassMovable,
	/// Monster entity class.
	ClassMonster,
}

/// Coarse layout category of a [`FieldType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	/// Pointer-width address, possibly typed.
	Pointer,
	/// Fixed-width scalar decoded in place.
	Scalar,
	/// Byte-count padding.
	Padding,
	/// Inline record with its own schema.
	Composite,
	/// Polymorphic class with a base hierarchy.
	Class,
}

impl FieldKind {
	/// Render the category as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pointer => "pointer",
			Self::Scalar => "scalar",
			Self::Padding => "padding",
			Self::Composite => "composite",
			Self::Class => "class",
		}
	}
}

/// What a pointer field refers to once followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum PointerTarget {
	/// A record whose layout is registered under this type.
	Record(FieldType),
	/// An entity instance; its class is chosen by classification.
	Entity,
	/// A `const char*` slot holding a NUL-terminated string address.
	CString,
}

impl FieldType {
	/// Every field type in declaration order.
	pub const ALL: [FieldType; 36] = [
		Self::CodePointer,
		Self::DataPointer,
		Self::Byte,
		Self::UnsignedByte,
		Self::Word,
		Self::UnsignedWord,
		Self::Dword,
		Self::UnsignedDword,
		Self::Qword,
		Self::UnsignedQword,
		Self::Float,
		Self::Bool,
		Self::Flags32,
		Self::Skip,
		Self::Rect,
		Self::StateIllumination,
		Self::StateIlluminationPointer,
		Self::StateSaturationVignette,
		Self::StateItems,
		Self::StateItemsPointer,
		Self::Layer,
		Self::LayerPointer,
		Self::EntityPointer,
		Self::EntityDbPointer,
		Self::EntityDbId,
		Self::Vector,
		Self::Color,
		Self::TexturePointer,
		Self::ConstCharPointerPointer,
		Self::Map,
		Self::Texture,
		Self::EntityDb,
		Self::State,
		Self::ClassEntity,
		Self::ClassMovable,
		Self::ClassMonster,
	];

	/// Human readable label shown in the type column.
	pub fn display_name(self) -> &'static str {
		match self {
			Self::CodePointer => "Code pointer",
			Self::DataPointer => "Data pointer",
			Self::Byte => "8-bit",
			Self::UnsignedByte => "8-bit unsigned",
			Self::Word => "16-bit",
			Self::UnsignedWord => "16-bit unsigned",
			Self::Dword => "32-bit",
			Self::UnsignedDword => "32-bit unsigned",
			Self::Qword => "64-bit",
			Self::UnsignedQword => "64-bit unsigned",
			Self::Float => "Float",
			Self::Bool => "Bool",
			Self::Flags32 => "32-bit flags",
			Self::Skip => "Skip",
			Self::Rect => "Rectangle",
			Self::StateIllumination => "Illumination",
			Self::StateIlluminationPointer => "Illumination pointer",
			Self::StateSaturationVignette => "Saturation/Vignette",
			Self::StateItems => "Items",
			Self::StateItemsPointer => "Items pointer",
			Self::Layer => "Layer",
			Self::LayerPointer => "Layer pointer",
			Self::EntityPointer => "Entity pointer",
			Self::EntityDbPointer => "EntityDB pointer",
			Self::EntityDbId => "EntityDB ID",
			Self::Vector => "Vector",
			Self::Color => "Color",
			Self::TexturePointer => "Texture pointer",
			Self::ConstCharPointerPointer => "Const char**",
			Self::Map => "std::map<>",
			Self::Texture => "Texture",
			Self::EntityDb => "EntityDB",
			Self::State => "State",
			Self::ClassEntity => "Entity",
			Self::ClassMovable => "Movable",
			Self::ClassMonster => "Monster",
		}
	}

	/// Stable identifier used by catalog files and the command line.
	pub fn ident(self) -> &'static str {
		match self {
			Self::CodePointer => "CodePointer",
			Self::DataPointer => "DataPointer",
			Self::Byte => "Byte",
			Self::UnsignedByte => "UnsignedByte",
			Self::Word => "Word",
			Self::UnsignedWord => "UnsignedWord",
			Self::Dword => "Dword",
			Self::UnsignedDword => "UnsignedDword",
			Self::Qword => "Qword",
			Self::UnsignedQword => "UnsignedQword",
			Self::Float => "Float",
			Self::Bool => "Bool",
			Self::Flags32 => "Flags32",
			Self::Skip => "Skip",
			Self::Rect => "Rect",
			Self::StateIllumination => "StateIllumination",
			Self::StateIlluminationPointer => "StateIlluminationPointer",
			Self::StateSaturationVignette => "StateSaturationVignette",
			Self::StateItems => "StateItems",
			Self::StateItemsPointer => "StateItemsPointer",
			Self::Layer => "Layer",
			Self::LayerPointer => "LayerPointer",
			Self::EntityPointer => "EntityPointer",
			Self::EntityDbPointer => "EntityDbPointer",
			Self::EntityDbId => "EntityDbId",
			Self::Vector => "Vector",
			Self::Color => "Color",
			Self::TexturePointer => "TexturePointer",
			Self::ConstCharPointerPointer => "ConstCharPointerPointer",
			Self::Map => "Map",
			Self::Texture => "Texture",
			Self::EntityDb => "EntityDb",
			Self::State => "State",
			Self::ClassEntity => "ClassEntity",
			Self::ClassMovable => "ClassMovable",
			Self::ClassMonster => "ClassMonster",
		}
	}

	/// Layout category of this type.
	pub fn kind(self) -> FieldKind {
		match self {
			Self::CodePointer
			| Self::DataPointer
			| Self::StateIlluminationPointer
			| Self::StateItemsPointer
			| Self::LayerPointer
			| Self::EntityPointer
			| Self::EntityDbPointer
			| Self::TexturePointer
			| Self::ConstCharPointerPointer => FieldKind::Pointer,
			Self::Byte
			| Self::UnsignedByte
			| Self::Word
			| Self::UnsignedWord
			| Self::Dword
			| Self::UnsignedDword
			| Self::Qword
			| Self::UnsignedQword
			| Self::Float
			| Self::Bool
			| Self::Flags32
			| Self::EntityDbId => FieldKind::Scalar,
			Self::Skip => FieldKind::Padding,
			Self::Rect
			| Self::StateIllumination
			| Self::StateSaturationVignette
			| Self::StateItems
			| Self::Layer
			| Self::Vector
			| Self::Color
			| Self::Map
			| Self::Texture
			| Self::EntityDb
			| Self::State => FieldKind::Composite,
			Self::ClassEntity | Self::ClassMovable | Self::ClassMonster => FieldKind::Class,
		}
	}

	/// Byte width for pointer and scalar kinds; `None` when the size comes from a schema or descriptor.
	pub fn fixed_size(self) -> Option<u64> {
		match self {
			Self::Byte | Self::UnsignedByte | Self::Bool => Some(1),
			Self::Word | Self::UnsignedWord => Some(2),
			Self::Dword | Self::UnsignedDword | Self::Float | Self::Flags32 | Self::EntityDbId => Some(4),
			Self::Qword | Self::UnsignedQword => Some(8),
			_ if self.is_pointer() => Some(POINTER_SIZE),
			_ => None,
		}
	}

	/// Whether values of this type live behind an address.
	pub fn is_pointer(self) -> bool {
		self.kind() == FieldKind::Pointer
	}

	/// Whether this type owns a schema (inline record or class).
	pub fn has_schema(self) -> bool {
		matches!(self.kind(), FieldKind::Composite | FieldKind::Class)
	}

	/// Target of a typed pointer; `None` for untyped pointers and non-pointers.
	pub fn pointer_target(self) -> Option<PointerTarget> {
		match self {
			Self::StateIlluminationPointer => Some(PointerTarget::Record(Self::StateIllumination)),
			Self::StateItemsPointer => Some(PointerTarget::Record(Self::StateItems)),
			Self::LayerPointer => Some(PointerTarget::Record(Self::Layer)),
			Self::EntityDbPointer => Some(PointerTarget::Record(Self::EntityDb)),
			Self::TexturePointer => Some(PointerTarget::Record(Self::Texture)),
			Self::EntityPointer => Some(PointerTarget::Entity),
			Self::ConstCharPointerPointer => Some(PointerTarget::CString),
			_ => None,
		}
	}

	/// Look up a type by identifier, ignoring ASCII case.
	pub fn from_ident(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|item| item.ident().eq_ignore_ascii_case(name))
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.display_name())
	}
}

impl FromStr for FieldType {
	type Err = LayoutError;

	fn from_str(s: &str) -> Result<Self> {
		Self::from_ident(s).ok_or_else(|| LayoutError::UnknownTypeName { name: s.to_owned() })
	}
}
