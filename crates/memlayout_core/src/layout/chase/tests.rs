use super::{Expansion, chase, expansion};
use crate::layout::{FieldPath, FieldType, LayoutError, MemoryImage, NameTable, NoNames, SchemaRegistry, resolve};

const ENTITY: u64 = 0x1000;
const ENTITY_DB: u64 = 0x2000;
const OTHER: u64 = 0x3000;

fn builtin() -> SchemaRegistry {
	SchemaRegistry::builtin().expect("builtin catalog builds")
}

fn put(bytes: &mut [u8], address: u64, value: &[u8]) {
	let start = (address - ENTITY) as usize;
	bytes[start..start + value.len()].copy_from_slice(value);
}

fn image(overlay: u64) -> MemoryImage {
	let mut bytes = vec![0_u8; 0x3000];
	put(&mut bytes, ENTITY + 0x08, &ENTITY_DB.to_le_bytes());
	put(&mut bytes, ENTITY + 0x10, &overlay.to_le_bytes());
	put(&mut bytes, ENTITY_DB + 0x30, &2.5_f32.to_le_bytes());
	MemoryImage::new(ENTITY, bytes)
}

fn path(text: &str) -> FieldPath {
	FieldPath::parse(text).expect("path parses")
}

#[test]
fn walks_through_typed_pointer_and_inline_record() {
	let registry = builtin();
	let result = chase(&registry, &image(0), &NoNames, FieldType::ClassEntity, ENTITY, &path("type.rect_collision.side")).expect("chase succeeds");

	assert_eq!(result.field.field_type, FieldType::Float);
	assert_eq!(result.field.offset, ENTITY_DB + 0x30);
	assert_eq!(result.owner, FieldType::Rect);
	assert_eq!(result.hops.len(), 2);
	assert!(result.hops[0].via_pointer);
	assert_eq!(result.hops[0].next_type, FieldType::EntityDb);
	assert_eq!(result.hops[0].next_base, ENTITY_DB);
	assert!(!result.hops[1].via_pointer);
	assert_eq!(result.hops[1].next_base, ENTITY_DB + 0x28);
}

#[test]
fn null_pointer_stops_the_walk() {
	let registry = builtin();
	let err = chase(&registry, &image(0), &NoNames, FieldType::ClassEntity, ENTITY, &path("overlay.x")).expect_err("null overlay");
	assert!(matches!(err, LayoutError::NullPointer { ref field } if field == "overlay"));
}

#[test]
fn entity_pointer_targets_are_classified_by_name() {
	let registry = builtin();
	let mut names = NameTable::new();
	names.insert(OTHER, "CHAR_ANA_SPELUNKY");

	let result = chase(&registry, &image(OTHER), &names, FieldType::ClassEntity, ENTITY, &path("overlay.inside")).expect("monster field");
	assert_eq!(result.owner, FieldType::ClassMonster);
	assert_eq!(result.field.offset, OTHER + 0x128);

	let err = chase(&registry, &image(OTHER), &NoNames, FieldType::ClassEntity, ENTITY, &path("overlay.inside")).expect_err("plain entity");
	assert!(matches!(err, LayoutError::PathFieldNotFound { field_type: FieldType::ClassEntity, .. }));
}

#[test]
fn scalars_and_unknown_names_are_rejected() {
	let registry = builtin();
	let source = image(0);

	let err = chase(&registry, &source, &NoNames, FieldType::ClassEntity, ENTITY, &path("flags.bit")).expect_err("scalar mid-path");
	assert!(matches!(err, LayoutError::PathNotExpandable { field_type: FieldType::Flags32, .. }));

	let err = chase(&registry, &source, &NoNames, FieldType::ClassEntity, ENTITY, &path("nope")).expect_err("missing field");
	assert!(matches!(err, LayoutError::PathFieldNotFound { ref field, .. } if field == "nope"));
}

#[test]
fn expansion_reports_what_a_field_holds() {
	let registry = builtin();
	let source = image(0);
	let fields = resolve(&registry, FieldType::ClassEntity, ENTITY).expect("resolves");
	let by_name = |name: &str| fields.iter().find(|field| field.name.as_ref() == name).expect("field exists");

	assert_eq!(
		expansion(&registry, &source, &NoNames, by_name("items")).expect("inline"),
		Expansion::Inline {
			field_type: FieldType::Vector,
			base: ENTITY + 0x18,
		}
	);
	assert_eq!(
		expansion(&registry, &source, &NoNames, by_name("type")).expect("pointer"),
		Expansion::Pointer {
			field_type: FieldType::EntityDb,
			address: ENTITY_DB,
		}
	);
	assert_eq!(expansion(&registry, &source, &NoNames, by_name("overlay")).expect("null"), Expansion::NullPointer);
	assert_eq!(expansion(&registry, &source, &NoNames, by_name("uid")).expect("leaf"), Expansion::Leaf);
	assert_eq!(expansion(&registry, &source, &NoNames, by_name("p80")).expect("untyped"), Expansion::Leaf);
}
