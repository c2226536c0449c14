use super::CatalogFile;
use crate::layout::{ExtraInfo, FieldType, LayoutError};

const SMALL: &str = r#"{
	"schemas": {
		"Color": [
			{"name": "red", "type": "Float"},
			{"name": "-", "type": "Skip", "skip": 8},
			{"name": "alpha", "type": "float"}
		],
		"ClassEntity": [{"name": "uid", "type": "Dword"}],
		"ClassMonster": [{"name": "tint", "type": "Color"}]
	},
	"hierarchy": {"ClassMonster": "ClassEntity"},
	"rules": [
		{"pattern": "CHAR_.*", "type": "ClassMonster"},
		{"pattern": "CHAR_PILOT", "type": "ClassEntity"}
	]
}"#;

#[test]
fn catalog_builds_registry() {
	let registry = CatalogFile::from_json_str(SMALL).expect("parses").build().expect("builds");

	assert_eq!(registry.size_of(FieldType::Color).expect("sized"), 16);
	assert_eq!(registry.size_of(FieldType::ClassMonster).expect("sized"), 20);
	assert_eq!(registry.base_of(FieldType::ClassMonster), Some(FieldType::ClassEntity));

	let color = registry.schema_for(FieldType::Color).expect("registered");
	assert_eq!(color[1].extra(), ExtraInfo::Skip(8));
	assert_eq!(color[2].field_type(), FieldType::Float);
}

#[test]
fn rules_keep_file_order() {
	let registry = CatalogFile::from_json_str(SMALL).expect("parses").build().expect("builds");
	assert_eq!(registry.classify("CHAR_PILOT"), FieldType::ClassMonster);
	assert_eq!(registry.classify("ITEM_ROPE"), FieldType::ClassEntity);
}

#[test]
fn fallback_class_is_configurable() {
	let input = r#"{
		"schemas": {"ClassEntity": [], "ClassMovable": [{"name": "speed", "type": "Float"}]},
		"hierarchy": {"ClassMovable": "ClassEntity"},
		"fallback": "ClassMovable"
	}"#;
	let registry = CatalogFile::from_json_str(input).expect("parses").build().expect("builds");
	assert_eq!(registry.classify("ANYTHING"), FieldType::ClassMovable);
}

#[test]
fn unknown_type_names_are_rejected() {
	let input = r#"{"schemas": {"Color": [{"name": "red", "type": "Double"}]}}"#;
	let err = CatalogFile::from_json_str(input).expect("parses").build().expect_err("unknown type");
	assert!(matches!(err, LayoutError::UnknownTypeName { ref name } if name == "Double"));
}

#[test]
fn hierarchy_cycles_are_rejected() {
	let input = r#"{
		"schemas": {"ClassEntity": [], "ClassMovable": []},
		"hierarchy": {"ClassMovable": "ClassEntity", "ClassEntity": "ClassMovable"}
	}"#;
	let err = CatalogFile::from_json_str(input).expect("parses").build().expect_err("cycle");
	assert!(matches!(err, LayoutError::HierarchyCycle { .. }));
}

#[test]
fn malformed_json_is_a_json_error() {
	assert!(matches!(CatalogFile::from_json_str("{\"schemas\": 3}"), Err(LayoutError::Json(_))));
	assert!(matches!(CatalogFile::from_json_str("{\"extra\": {}}"), Err(LayoutError::Json(_))));
}

#[test]
fn padding_needs_a_skip_count() {
	let input = r#"{"schemas": {
		"Color": [{"name": "-", "type": "Skip"}, {"name": "red", "type": "Float"}],
		"ClassEntity": []
	}}"#;
	let err = CatalogFile::from_json_str(input).expect("parses").build().expect_err("bare padding");
	assert!(matches!(err, LayoutError::MissingSkipCount { ref field } if field == "-"));
}

#[test]
fn skip_count_only_on_padding() {
	let input = r#"{"schemas": {
		"Color": [{"name": "red", "type": "Float", "skip": 12}],
		"ClassEntity": []
	}}"#;
	let err = CatalogFile::from_json_str(input).expect("parses").build().expect_err("stray skip count");
	assert!(matches!(
		err,
		LayoutError::UnexpectedSkipCount {
			ref field,
			field_type: FieldType::Float,
		} if field == "red"
	));
}

#[test]
fn fallback_must_name_a_class() {
	let input = r#"{"schemas": {"ClassEntity": []}, "fallback": "Float"}"#;
	let err = CatalogFile::from_json_str(input).expect("parses").build().expect_err("scalar fallback");
	assert!(matches!(err, LayoutError::NotAClass { field_type: FieldType::Float }));
}
