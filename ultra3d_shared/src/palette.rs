//! Named colors shared by courses, the avatar sprite and the menus.

use crate::scene::Color;

pub const SKY_BLUE: Color = Color::rgb(100, 150, 255);
pub const SKY_TOP: Color = Color::rgb(135, 195, 255);
pub const SKY_BOTTOM: Color = Color::rgb(50, 100, 200);

pub const GRASS_GREEN: Color = Color::rgb(50, 160, 50);
pub const PATH_TAN: Color = Color::rgb(210, 180, 140);
pub const MOAT_BLUE: Color = Color::rgba(60, 120, 200, 200);
pub const CASTLE_WHITE: Color = Color::rgb(220, 220, 220);
pub const ROOF_RED: Color = Color::rgb(200, 50, 50);
pub const BRIDGE_BROWN: Color = Color::rgb(139, 69, 19);
pub const LAVA_RED: Color = Color::rgb(180, 40, 20);
pub const SAND_TAN: Color = Color::rgb(220, 180, 120);
pub const SNOW_WHITE: Color = Color::rgb(240, 248, 255);
pub const WATER_BLUE: Color = Color::rgba(50, 100, 200, 180);
pub const CAVE_GRAY: Color = Color::rgb(90, 90, 100);
pub const BOO_PURPLE: Color = Color::rgb(100, 60, 140);
pub const RAINBOW_PINK: Color = Color::rgb(255, 180, 200);
pub const WOOD_BROWN: Color = Color::rgb(139, 90, 43);

pub const AVATAR_RED: Color = Color::rgb(255, 0, 0);
pub const AVATAR_BLUE: Color = Color::rgb(0, 0, 255);
pub const BUTTON_YELLOW: Color = Color::rgb(255, 255, 0);
pub const SHADOW: Color = Color::rgba(0, 0, 0, 100);

pub const TITLE_GOLD: Color = Color::rgb(255, 220, 0);
pub const STAR_EDGE: Color = Color::rgb(200, 180, 0);
pub const TITLE_RED: Color = Color::rgb(200, 0, 0);
pub const TITLE_OUTLINE: Color = Color::rgb(80, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const YELLOW: Color = Color::rgb(255, 255, 0);
pub const PALE_BLUE: Color = Color::rgb(200, 200, 255);
pub const ROW_SELECTED: Color = Color::rgb(120, 200, 100);
