#![allow(missing_docs)]

use memlayout::layout::{
	DumpEncoding, DecodedValue, FieldPath, FieldType, MemoryImage, NameTable, NoNames, RowValue, chase, classify_at, inspect,
};
use memlayout_testkit::{ImageBuilder, fixture_path, fixture_registry};

const CRATE: u64 = 0x10000;
const SNAKE: u64 = 0x10040;

fn builder() -> ImageBuilder {
	ImageBuilder::new(CRATE, 0x80)
		.i32(CRATE, 7)
		.f32(CRATE + 0x04, 1.0)
		.f32(CRATE + 0x10, 0.5)
		.ptr(CRATE + 0x14, SNAKE)
		.i32(SNAKE, 42)
		.f32(SNAKE + 0x1c, 3.25)
		.u8(SNAKE + 0x20, 4)
}

#[test]
fn inspect_decodes_rows_from_image() {
	let registry = fixture_registry();
	let rows = inspect(&registry, &builder().build(), FieldType::ClassEntity, CRATE).expect("inspects");

	let names: Vec<_> = rows.iter().map(|row| row.name.as_ref()).collect();
	assert_eq!(names, ["uid", "tint", "owner"]);
	assert_eq!(rows[0].value, RowValue::Value(DecodedValue::Signed(7)));
	assert_eq!(rows[1].value, RowValue::Composite);
	let RowValue::Value(DecodedValue::Pointer(owner)) = &rows[2].value else {
		panic!("owner should decode as a pointer");
	};
	assert_eq!(owner.address, SNAKE);
	assert_eq!(rows[2].value.to_string(), "0x0000000000010040");
}

#[test]
fn names_select_the_class_for_a_pointer_target() {
	let registry = fixture_registry();
	let names = NameTable::open(fixture_path("names.json")).expect("name table opens");
	let image = builder().build();

	assert_eq!(classify_at(&registry, &names, CRATE), FieldType::ClassEntity);
	assert_eq!(classify_at(&registry, &names, SNAKE), FieldType::ClassMonster);

	let path = FieldPath::parse("owner.health").expect("path parses");
	let result = chase(&registry, &image, &names, FieldType::ClassEntity, CRATE, &path).expect("chase succeeds");
	assert_eq!(result.owner, FieldType::ClassMonster);
	assert_eq!(result.field.offset, SNAKE + 0x20);

	let rows = inspect(&registry, &image, result.owner, SNAKE).expect("inspects");
	let health = rows.iter().find(|row| row.name.as_ref() == "health").expect("health row");
	assert_eq!(health.value, RowValue::Value(DecodedValue::Unsigned(4)));

	assert!(chase(&registry, &image, &NoNames, FieldType::ClassEntity, CRATE, &path).is_err());
}

#[test]
fn fields_past_the_image_are_unavailable() {
	let registry = fixture_registry();
	let image = ImageBuilder::new(CRATE, 0x10).i32(CRATE, 1).build();
	let rows = inspect(&registry, &image, FieldType::ClassMonster, CRATE).expect("inspects");

	assert_eq!(rows[0].value, RowValue::Value(DecodedValue::Signed(1)));
	for row in rows.iter().skip(1).filter(|row| row.field_type != FieldType::Color) {
		assert_eq!(row.value, RowValue::Unavailable, "{} should be unavailable", row.name);
	}
}

#[test]
fn dumps_open_raw_and_compressed() {
	let raw = builder().into_bytes();

	let plain = builder().write_dump("inspect_plain.bin");
	let image = MemoryImage::open(&plain, CRATE).expect("raw dump opens");
	assert_eq!(image.encoding(), DumpEncoding::Raw);
	assert_eq!(image.len(), raw.len());

	let packed_path = plain.with_file_name("inspect_packed.bin.zst");
	std::fs::write(&packed_path, zstd::encode_all(raw.as_slice(), 3).expect("zstd encodes")).expect("writes");
	let image = MemoryImage::open(&packed_path, CRATE).expect("zstd dump opens");
	assert_eq!(image.encoding(), DumpEncoding::Zstd);

	let rows = inspect(&fixture_registry(), &image, FieldType::ClassMonster, SNAKE).expect("inspects");
	let speed = rows.iter().find(|row| row.name.as_ref() == "speed").expect("speed row");
	assert_eq!(speed.value, RowValue::Value(DecodedValue::Float(3.25)));
}
