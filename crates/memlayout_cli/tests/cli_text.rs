#![allow(missing_docs)]

use std::process::{Command, Output};

use memlayout_testkit::ImageBuilder;

#[test]
fn classify_reports_matching_rule() {
	let stdout = run_ok(&["classify", "CHAR_ANA_SPELUNKY"]);
	assert!(stdout.contains("class: ClassMonster"));
	assert!(stdout.contains("rule: CHAR_.*"));

	let stdout = run_ok(&["classify", "ITEM_ROPE"]);
	assert!(stdout.contains("class: ClassEntity"));
	assert!(stdout.contains("rule: fallback"));
}

#[test]
fn schema_text_shows_padding() {
	let stdout = run_ok(&["schema", "State"]);
	assert!(stdout.contains("size: 0x12d0"));
	assert!(stdout.contains("skip 0x970"));
}

#[test]
fn inspect_text_follows_texture_name() {
	let entity = 0x20000_u64;
	let texture = 0x20100_u64;
	let dump = ImageBuilder::new(entity, 0x200)
		.ptr(entity + 0x88, texture)
		.ptr(texture + 0x08, texture + 0x80)
		.ptr(texture + 0x80, texture + 0x90)
		.c_str(texture + 0x90, "char_yellow")
		.write_dump("cli_texture.bin");
	let dump = dump.display().to_string();

	let stdout = run_ok(&["inspect", &dump, "--image-base", "0x20000", "--at", "0x20000", "--type", "ClassEntity", "--path", "texture"]);
	assert!(stdout.contains("layout: Texture @ 0x0000000000020100"));
	assert!(stdout.contains("-> \"char_yellow\""));
}

#[test]
fn errors_go_to_stderr_with_failure_status() {
	let output = run(&["decode", "Rect", "00"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: "));

	let output = run(&["schema", "NotAType"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("unknown type name: NotAType"));

	let output = run(&["decode", "Dword", "0x0001"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("buffer size mismatch"));
}

#[test]
fn null_pointer_paths_fail() {
	let dump = ImageBuilder::new(0x1000, 0x200).write_dump("cli_null.bin");
	let dump = dump.display().to_string();

	let output = run(&["inspect", &dump, "--image-base", "0x1000", "--at", "0x1000", "--type", "ClassEntity", "--path", "type.width"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("null pointer in field type"));
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_memlayout")).args(args).output().expect("command executes")
}

fn run_ok(args: &[&str]) -> String {
	let output = run(args);
	assert!(
		output.status.success(),
		"memlayout failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8(output.stdout).expect("stdout is utf8")
}
