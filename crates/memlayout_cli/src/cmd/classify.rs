use memlayout::layout::{Result, SchemaRegistry};

/// Print the class schema chosen for an entity name and the rule that chose it.
pub fn run(registry: &SchemaRegistry, name: &str) -> Result<()> {
	let class = registry.classify(name);
	let rule = registry.rules().iter().find(|rule| rule.matches(name));

	println!("name: {name}");
	println!("class: {}", class.ident());
	match rule {
		Some(rule) => println!("rule: {}", rule.pattern()),
		None => println!("rule: fallback"),
	}
	Ok(())
}
