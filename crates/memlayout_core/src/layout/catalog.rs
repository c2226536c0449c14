//! Built-in field catalog for the game's native structures.

use crate::layout::FieldType::*;
use crate::layout::descriptor::FieldDef;
use crate::layout::{FieldType, RegistryBuilder, Result, SchemaRegistry};

const fn f(name: &'static str, field_type: FieldType) -> FieldDef {
	FieldDef::new(name, field_type)
}

const fn skip(bytes: u64) -> FieldDef {
	FieldDef::skip(bytes)
}

const ENTITY_DB: &[FieldDef] = &[
	f("create_func", CodePointer),
	f("destroy_func", CodePointer),
	f("field_10", UnsignedDword),
	f("id", EntityDbId),
	f("search_flags", Flags32),
	f("width", Float),
	f("height", Float),
	f("draw_depth", UnsignedByte),
	f("default_b3f", UnsignedByte),
	f("field_26", Word),
	f("rect_collision", Rect),
	f("field_3C", Dword),
	f("field_40", Dword),
	f("field_44", Dword),
	f("default_flags", Flags32),
	f("default_more_flags", Flags32),
	f("properties_flags", Flags32),
	f("friction", Float),
	f("elasticity", Float),
	f("weight", Float),
	f("field_60", UnsignedByte),
	f("field_61", UnsignedByte),
	f("field_62", UnsignedByte),
	f("field_63", UnsignedByte),
	f("acceleration", Float),
	f("max_speed", Float),
	f("sprint_factor", Float),
	f("jump", Float),
	f("_a", Float),
	f("_b", Float),
	f("_c", Float),
	f("_d", Float),
	f("texture", Dword),
	f("technique", Dword),
	f("tile_x", Dword),
	f("tile_y", Dword),
	f("damage", UnsignedByte),
	f("life", UnsignedByte),
	f("field_96", UnsignedByte),
	f("field_97", UnsignedByte),
	f("field_98", UnsignedByte),
	f("field_99", UnsignedByte),
	f("field_9A", UnsignedByte),
	f("field_9B", UnsignedByte),
	f("description", Dword),
	f("field_a0", Dword),
	f("field_a4", Dword),
	f("field_a8", Float),
	f("field_AC", Dword),
	skip(0x40),
	f("attachOffsetX", Float),
	f("attachOffsetY", Float),
	f("init", UnsignedByte),
	f("field_19", UnsignedByte),
	f("field_1a", UnsignedByte),
	f("field_1b", UnsignedByte),
	f("field_1c", Dword),
];

const RECT: &[FieldDef] = &[
	f("masks", UnsignedDword),
	f("up_minus_down", Float),
	f("side", Float),
	f("up_plus_down", Float),
	f("field_10", UnsignedByte),
	f("field_11", UnsignedByte),
	f("field_12", UnsignedWord),
];

const STATE: &[FieldDef] = &[
	f("p00", DataPointer),
	f("screen_last", UnsignedDword),
	f("screen", UnsignedDword),
	f("screen_next", UnsignedDword),
	f("loading", UnsignedDword),
	f("illumination", StateIlluminationPointer),
	f("i20", Dword),
	f("fadeout", UnsignedDword),
	f("fadein", UnsignedDword),
	f("i2c", Dword),
	f("ingame", Bool),
	f("playing", Bool),
	f("pause", Bool),
	f("b33", UnsignedByte),
	f("i34", Dword),
	f("quest_flags", Flags32),
	f("i3c", Dword),
	f("i40", Dword),
	f("i44", Dword),
	f("w", UnsignedDword),
	f("h", UnsignedDword),
	f("kali_favor", Byte),
	f("kali_status", Byte),
	f("kali_altars_destroyed", Byte),
	f("b4f", UnsignedByte),
	f("i50", Dword),
	f("i54", Dword),
	f("world_start", UnsignedByte),
	f("level_start", UnsignedByte),
	f("theme_start", UnsignedByte),
	f("b5f", UnsignedByte),
	f("seed", UnsignedDword),
	f("time_total", UnsignedDword),
	f("world", UnsignedByte),
	f("world_next", UnsignedByte),
	f("level", UnsignedByte),
	f("level_next", UnsignedByte),
	f("i6c", Dword),
	f("i70", Dword),
	f("theme", UnsignedByte),
	f("theme_next", UnsignedByte),
	f("win_state", UnsignedByte),
	f("b73", UnsignedByte),
	f("i74", Dword),
	f("shoppie_aggro", UnsignedByte),
	f("shoppie_aggro_levels", UnsignedByte),
	f("merchant_aggro", UnsignedByte),
	f("merchant_pad", UnsignedByte),
	f("b7c", UnsignedByte),
	f("b7d", UnsignedByte),
	f("kills_npc", UnsignedByte),
	f("level_count", UnsignedByte),
	skip(0x970),
	f("journal_flags", Flags32),
	f("i9f0", Dword),
	f("i9f4", Dword),
	f("time_last_level", UnsignedDword),
	f("time_level", UnsignedDword),
	f("ia00", Dword),
	f("money_last_levels", UnsignedDword),
	f("hud_flags", Flags32),
	skip(0x12b0 - 0xa14),
	f("items", StateItemsPointer),
	skip(8),
	f("layer0", LayerPointer),
	f("layer1", LayerPointer),
];

const STATE_ILLUMINATION: &[FieldDef] = &[
	f("saturation_vignette_0", StateSaturationVignette),
	f("saturation_vignette_1", StateSaturationVignette),
	f("saturation_vignette_2", StateSaturationVignette),
	f("saturation_vignette_3", StateSaturationVignette),
	f("brightness1", Float),
	f("brightness2", Float),
	f("something_min", Float),
	f("something_max", Float),
	f("unknown_empty", UnsignedQword),
	f("unknown_float", Float),
	f("unknown_nan", Float),
	f("unknown_timer", UnsignedDword),
	f("frontlayer_global_illumination", UnsignedByte),
	f("unknown_illumination1", UnsignedByte),
	f("backlayer_global_illumination", UnsignedByte),
	f("unknown_illumination2", UnsignedByte),
	f("unknown_int1", UnsignedDword),
	f("unknown_int2", UnsignedDword),
];

const STATE_SATURATION_VIGNETTE: &[FieldDef] = &[
	f("red", Float),
	f("green", Float),
	f("blue", Float),
	f("vignette_aperture", Float),
];

const STATE_ITEMS: &[FieldDef] = &[
	f("__vftable", DataPointer),
	f("player1", EntityPointer),
	f("player2", EntityPointer),
	f("player3", EntityPointer),
	f("player4", EntityPointer),
];

const LAYER: &[FieldDef] = &[
	f("__vftable", DataPointer),
	f("first_entity*", DataPointer),
	f("b", DataPointer),
	f("capacity", Dword),
	f("size", Dword),
];

const ENTITY: &[FieldDef] = &[
	f("__vftable", DataPointer),
	f("type", EntityDbPointer),
	f("overlay", EntityPointer),
	f("items", Vector),
	f("flags", Flags32),
	f("more_flags", Flags32),
	f("uid", Dword),
	f("animation_frame", UnsignedByte),
	f("b3d", UnsignedByte),
	f("draw_depth", UnsignedByte),
	f("b3f", UnsignedByte),
	f("x", Float),
	f("y", Float),
	f("w", Float),
	f("h", Float),
	f("f50", Float),
	f("f54", Float),
	f("color", Color),
	f("offsetx", Float),
	f("offsety", Float),
	f("hitboxx", Float),
	f("hitboxy", Float),
	f("duckmask", UnsignedDword),
	f("angle", Float),
	f("p80", DataPointer),
	f("texture", TexturePointer),
	f("tilew", Float),
	f("tileh", Float),
	f("camera_layer", UnsignedByte),
	f("b99", UnsignedByte),
	f("b9a", UnsignedByte),
	f("b9b", UnsignedByte),
	f("i9c", UnsignedDword),
];

const VECTOR: &[FieldDef] = &[
	f("heap", DataPointer),
	f("begin", DataPointer),
	f("size", UnsignedDword),
	f("count", UnsignedDword),
];

const COLOR: &[FieldDef] = &[f("red", Float), f("green", Float), f("blue", Float), f("alpha", Float)];

const TEXTURE: &[FieldDef] = &[
	f("id", UnsignedQword),
	f("name", ConstCharPointerPointer),
	f("width", UnsignedDword),
	f("height", UnsignedDword),
	f("num_tiles_width", UnsignedDword),
	f("num_tiles_height", UnsignedDword),
	f("offset_x_weird_math", Float),
	f("offset_y_weird_math", Float),
	f("tile_width_fraction", Float),
	f("tile_height_fraction", Float),
	f("tile_width_minus_one_fraction", Float),
	f("tile_height_minus_one_fraction", Float),
	f("one_over_width", Float),
	f("one_over_height", Float),
];

const MAP: &[FieldDef] = &[f("items", DataPointer), f("size", UnsignedQword)];

const MOVABLE: &[FieldDef] = &[
	f("pa0", Map),
	f("pb0", Map),
	f("anim_func", DataPointer),
	f("ic8", Dword),
	f("icc", Dword),
	f("movex", Float),
	f("movey", Float),
	f("buttons", UnsignedDword),
	f("stand_counter", UnsignedDword),
	f("fe0", Float),
	f("price", Dword),
	f("owner_uid", Dword),
	f("last_owner_uid", Dword),
	f("animation_func", DataPointer),
	f("idle_counter", UnsignedDword),
	f("standing_on_uid", Dword),
	f("velocityx", Float),
	f("velocityy", Float),
	f("holding_uid", Dword),
	f("state", UnsignedByte),
	f("last_state", UnsignedByte),
	f("move_state", UnsignedByte),
	f("health", UnsignedByte),
	f("stun_timer", UnsignedWord),
	f("stun_state", UnsignedWord),
	f("some_state", UnsignedDword),
	f("poison_tick_timer", Word),
	f("unknown_timer", Word),
	f("i11c", Dword),
	f("i120", Dword),
	f("b124", UnsignedByte),
	f("airtime", UnsignedByte),
	f("b126", UnsignedByte),
	f("b127", UnsignedByte),
];

const MONSTER: &[FieldDef] = &[f("inside", Map)];

const SCHEMAS: &[(FieldType, &[FieldDef])] = &[
	(EntityDb, ENTITY_DB),
	(Rect, RECT),
	(State, STATE),
	(StateIllumination, STATE_ILLUMINATION),
	(StateSaturationVignette, STATE_SATURATION_VIGNETTE),
	(StateItems, STATE_ITEMS),
	(Layer, LAYER),
	(Vector, VECTOR),
	(Color, COLOR),
	(Texture, TEXTURE),
	(Map, MAP),
	(ClassEntity, ENTITY),
	(ClassMovable, MOVABLE),
	(ClassMonster, MONSTER),
];

const HIERARCHY: &[(FieldType, FieldType)] = &[(ClassMovable, ClassEntity), (ClassMonster, ClassMovable)];

/// Evaluated top to bottom; the first matching pattern wins.
const DEFAULT_CLASS_RULES: &[(&str, FieldType)] = &[("CHAR_.*", ClassMonster)];

impl SchemaRegistry {
	/// Registry holding the built-in game catalog.
	pub fn builtin() -> Result<Self> {
		builtin_builder().build()
	}
}

/// Builder pre-loaded with the built-in catalog, for extension before building.
pub fn builtin_builder() -> RegistryBuilder {
	let mut builder = RegistryBuilder::new();
	for (field_type, fields) in SCHEMAS {
		builder = builder.schema(*field_type, fields.iter().map(|item| item.to_descriptor()).collect());
	}
	for (subclass, base) in HIERARCHY {
		builder = builder.base(*subclass, *base);
	}
	for (pattern, target) in DEFAULT_CLASS_RULES {
		builder = builder.rule(*pattern, *target);
	}
	builder
}
