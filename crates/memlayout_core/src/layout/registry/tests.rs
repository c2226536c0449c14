use crate::layout::{FieldDescriptor, FieldType, LayoutError, RegistryBuilder};

fn leaf(name: &str, field_type: FieldType) -> FieldDescriptor {
	FieldDescriptor::new(name, field_type).expect("plain field")
}

fn three_level_builder() -> RegistryBuilder {
	RegistryBuilder::new()
		.schema(FieldType::ClassEntity, vec![leaf("vtable", FieldType::DataPointer), leaf("uid", FieldType::Dword)])
		.schema(
			FieldType::ClassMovable,
			vec![leaf("speed", FieldType::Float), FieldDescriptor::skip(4), leaf("health", FieldType::UnsignedByte)],
		)
		.schema(FieldType::ClassMonster, vec![leaf("aggro", FieldType::Bool)])
		.base(FieldType::ClassMovable, FieldType::ClassEntity)
		.base(FieldType::ClassMonster, FieldType::ClassMovable)
}

#[test]
fn sizes_include_base_chain_once() {
	let registry = three_level_builder().build().expect("registry builds");
	assert_eq!(registry.size_of(FieldType::ClassEntity).expect("size"), 12);
	assert_eq!(registry.size_of(FieldType::ClassMovable).expect("size"), 12 + 4 + 4 + 1);
	assert_eq!(registry.size_of(FieldType::ClassMonster).expect("size"), 22);
}

#[test]
fn flattened_lists_root_fields_first() {
	let registry = three_level_builder().build().expect("registry builds");
	let names: Vec<_> = registry
		.flattened(FieldType::ClassMonster)
		.expect("flattens")
		.iter()
		.map(|field| field.name().to_owned())
		.collect();
	assert_eq!(names, ["vtable", "uid", "speed", "-", "health", "aggro"]);
}

#[test]
fn skip_size_lives_on_the_descriptor() {
	let registry = three_level_builder().build().expect("registry builds");
	assert_eq!(registry.size_of(FieldType::Skip).expect("size"), 0);
	assert_eq!(registry.field_size(&FieldDescriptor::skip(0x40)).expect("size"), 0x40);
}

#[test]
fn unregistered_composite_is_unknown() {
	let registry = three_level_builder().build().expect("registry builds");
	assert!(matches!(
		registry.schema_for(FieldType::Texture),
		Err(LayoutError::UnknownType {
			field_type: FieldType::Texture
		})
	));
	assert!(matches!(registry.size_of(FieldType::Rect), Err(LayoutError::UnknownType { .. })));
	assert_eq!(registry.size_of(FieldType::UnsignedQword).expect("fixed"), 8);
}

#[test]
fn rules_are_tried_in_declaration_order() {
	let registry = three_level_builder()
		.rule("MONS_.*", FieldType::ClassMonster)
		.rule("MONS_CAVEMAN", FieldType::ClassMovable)
		.rule("ITEM_.*", FieldType::ClassMovable)
		.build()
		.expect("registry builds");

	assert_eq!(registry.classify("MONS_CAVEMAN"), FieldType::ClassMonster);
	assert_eq!(registry.classify("ITEM_ROCK"), FieldType::ClassMovable);
	assert_eq!(registry.classify("FLOOR_GENERIC"), FieldType::ClassEntity);
	assert_eq!(registry.rules().len(), 3);
}

#[test]
fn fallback_class_is_configurable() {
	let registry = three_level_builder().fallback_class(FieldType::ClassMovable).build().expect("registry builds");
	assert_eq!(registry.classify("ANYTHING"), FieldType::ClassMovable);
}

#[test]
fn hierarchy_cycle_is_rejected() {
	let err = three_level_builder()
		.base(FieldType::ClassEntity, FieldType::ClassMonster)
		.build()
		.expect_err("cycle must fail");
	assert!(matches!(err, LayoutError::HierarchyCycle { .. }));
}

#[test]
fn inline_containment_cycle_is_rejected() {
	let err = RegistryBuilder::new()
		.schema(FieldType::Rect, vec![leaf("color", FieldType::Color)])
		.schema(FieldType::Color, vec![leaf("rect", FieldType::Rect)])
		.build()
		.expect_err("containment cycle must fail");
	assert!(matches!(err, LayoutError::SchemaCycle { .. }));
}

#[test]
fn pointer_to_self_is_not_a_cycle() {
	let registry = RegistryBuilder::new()
		.schema(FieldType::ClassEntity, vec![leaf("overlay", FieldType::EntityPointer)])
		.build()
		.expect("pointers do not nest layouts");
	assert_eq!(registry.size_of(FieldType::ClassEntity).expect("size"), 8);
}

#[test]
fn scalar_cannot_own_schema() {
	let err = RegistryBuilder::new()
		.schema(FieldType::Dword, vec![leaf("x", FieldType::Byte)])
		.build()
		.expect_err("scalar schema must fail");
	assert!(matches!(err, LayoutError::SchemaNotComposite { field_type: FieldType::Dword }));
}

#[test]
fn base_must_be_registered() {
	let err = RegistryBuilder::new()
		.schema(FieldType::ClassMovable, Vec::new())
		.base(FieldType::ClassMovable, FieldType::ClassEntity)
		.build()
		.expect_err("missing base must fail");
	assert!(matches!(
		err,
		LayoutError::UnknownType {
			field_type: FieldType::ClassEntity
		}
	));
}

#[test]
fn nested_composite_must_be_registered() {
	let err = RegistryBuilder::new()
		.schema(FieldType::ClassEntity, vec![leaf("color", FieldType::Color)])
		.build()
		.expect_err("missing nested schema must fail");
	assert!(matches!(err, LayoutError::UnknownType { field_type: FieldType::Color }));
}

#[test]
fn bad_rule_pattern_fails_build() {
	let err = three_level_builder().rule("[", FieldType::ClassMonster).build().expect_err("bad regex");
	assert!(matches!(err, LayoutError::InvalidRulePattern { .. }));
}

#[test]
fn oversized_padding_overflows() {
	let err = RegistryBuilder::new()
		.schema(FieldType::Rect, vec![FieldDescriptor::skip(u64::MAX), leaf("masks", FieldType::UnsignedDword)])
		.build()
		.expect_err("overflow must fail");
	assert!(matches!(err, LayoutError::OffsetOverflow { .. }));
}

#[test]
fn fallback_must_be_a_registered_class() {
	let err = three_level_builder().fallback_class(FieldType::Float).build().expect_err("scalar fallback");
	assert!(matches!(err, LayoutError::NotAClass { field_type: FieldType::Float }));

	let err = RegistryBuilder::new()
		.schema(FieldType::Color, vec![leaf("red", FieldType::Float)])
		.build()
		.expect_err("default fallback has no schema");
	assert!(matches!(
		err,
		LayoutError::UnknownType {
			field_type: FieldType::ClassEntity
		}
	));
}

#[test]
fn rule_targets_must_be_registered_classes() {
	let err = three_level_builder()
		.schema(FieldType::Color, vec![leaf("red", FieldType::Float)])
		.rule("CHAR_.*", FieldType::Color)
		.build()
		.expect_err("record target");
	assert!(matches!(err, LayoutError::NotAClass { field_type: FieldType::Color }));

	let err = RegistryBuilder::new()
		.schema(FieldType::ClassEntity, Vec::new())
		.rule("CHAR_.*", FieldType::ClassMonster)
		.build()
		.expect_err("unregistered class target");
	assert!(matches!(
		err,
		LayoutError::UnknownType {
			field_type: FieldType::ClassMonster
		}
	));
}
