//! Course table.
//!
//! Each course is a row of data: a display name, a scene builder, the
//! avatar spawn point and the ground height. Index lookups clamp instead
//! of failing, so any requested index maps to a real course.

use crate::math::Vec3;
use crate::palette::*;
use crate::scene::{Color, Scene, SceneBuilder};

type BuildFn = fn() -> anyhow::Result<Scene>;

/// One entry of the course table.
#[derive(Debug, Clone, Copy)]
pub struct CourseDef {
    pub name: &'static str,
    pub build: BuildFn,
    pub spawn: Vec3,
    pub ground_y: f32,
}

impl CourseDef {
    const fn new(name: &'static str, build: BuildFn, spawn_y: f32, ground_y: f32) -> Self {
        Self {
            name,
            build,
            spawn: Vec3::new(0.0, spawn_y, 0.0),
            ground_y,
        }
    }
}

pub static COURSES: [CourseDef; 16] = [
    CourseDef::new("Castle Grounds", castle_grounds, 0.0, 0.0),
    CourseDef::new("Bob-omb Battlefield", bobomb_battlefield, 0.0, 0.0),
    CourseDef::new("Whomp's Fortress", whomps_fortress, 0.0, 0.0),
    CourseDef::new("Jolly Roger Bay", jolly_roger_bay, 20.0, 10.0),
    CourseDef::new("Cool Cool Mountain", cool_cool_mountain, 0.0, 0.0),
    CourseDef::new("Big Boo's Haunt", big_boos_haunt, 0.0, 0.0),
    CourseDef::new("Hazy Maze Cave", hazy_maze_cave, 0.0, 0.0),
    CourseDef::new("Lethal Lava Land", lethal_lava_land, 25.0, 15.0),
    CourseDef::new("Shifting Sand Land", shifting_sand_land, 0.0, 0.0),
    CourseDef::new("Dire Dire Docks", dire_dire_docks, 18.0, 8.0),
    CourseDef::new("Snowman's Land", snowmans_land, 0.0, 0.0),
    CourseDef::new("Wet-Dry World", wet_dry_world, 15.0, 5.0),
    CourseDef::new("Tall Tall Mountain", tall_tall_mountain, 0.0, 0.0),
    CourseDef::new("Tiny Huge Island", tiny_huge_island, 0.0, 0.0),
    CourseDef::new("Tick Tock Clock", tick_tock_clock, 0.0, 0.0),
    CourseDef::new("Rainbow Ride", rainbow_ride, 60.0, 50.0),
];

pub fn course_count() -> usize {
    COURSES.len()
}

/// Clamps a requested index into the table's range.
pub fn clamp_index(index: usize) -> usize {
    index.min(COURSES.len() - 1)
}

/// Looks up a course; out-of-range indices clamp to the last course.
pub fn course(index: usize) -> &'static CourseDef {
    &COURSES[clamp_index(index)]
}

/// Vertical wall in the plane `z = z`, spanning `x ∈ [-half, half]`,
/// `y ∈ [y0, y1]`.
fn wall(
    b: SceneBuilder,
    half: f32,
    y0: f32,
    y1: f32,
    z: f32,
    color: Color,
) -> anyhow::Result<SceneBuilder> {
    b.poly(&[(-half, y0, z), (half, y0, z), (half, y1, z), (-half, y1, z)], color)
}

/// Horizontal strip at height `y`, spanning `x ∈ [-half_x, half_x]`, `z ∈ [z0, z1]`.
fn strip(
    b: SceneBuilder,
    half_x: f32,
    z0: f32,
    z1: f32,
    y: f32,
    color: Color,
) -> anyhow::Result<SceneBuilder> {
    b.poly(&[(-half_x, y, z0), (half_x, y, z0), (half_x, y, z1), (-half_x, y, z1)], color)
}

/// Triangle with base `y = y0` over `x ∈ [-half, half]` and apex at `(0, y1)`.
fn gable(
    b: SceneBuilder,
    half: f32,
    y0: f32,
    y1: f32,
    z: f32,
    color: Color,
) -> anyhow::Result<SceneBuilder> {
    b.poly(&[(-half, y0, z), (half, y0, z), (0.0, y1, z)], color)
}

fn castle_grounds() -> anyhow::Result<Scene> {
    let (cw, ch, cd) = (300.0, 300.0, -600.0);
    let (tw, th) = (100.0, 450.0);
    let b = SceneBuilder::new().floor(1000.0, 0.0, GRASS_GREEN)?;
    let b = strip(b, 150.0, -600.0, 400.0, -1.0, PATH_TAN)?;
    let b = strip(b, 400.0, -500.0, -300.0, 10.0, MOAT_BLUE)?;
    let b = strip(b, 100.0, -500.0, -300.0, -2.0, BRIDGE_BROWN)?;
    let b = wall(b, cw, 0.0, -ch, cd, CASTLE_WHITE)?;
    let b = wall(b, tw, -ch, -th, cd, CASTLE_WHITE)?;
    let b = gable(b, tw + 20.0, -th, -th - 100.0, cd, ROOF_RED)?;
    Ok(b.build())
}

fn bobomb_battlefield() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(800.0, 0.0, GRASS_GREEN)?
        .floor(200.0, 0.0, PATH_TAN)?;
    let b = wall(b, 80.0, 0.0, 80.0, 100.0, CASTLE_WHITE)?;
    let b = gable(b, 80.0, 80.0, 120.0, 100.0, ROOF_RED)?;
    Ok(b.build())
}

fn whomps_fortress() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(600.0, 0.0, GRASS_GREEN)?
        .floor(250.0, 0.0, WOOD_BROWN)?;
    let b = wall(b, 200.0, 0.0, 200.0, 0.0, CASTLE_WHITE)?;
    let b = strip(b, 150.0, -50.0, 50.0, 200.0, PATH_TAN)?;
    Ok(b.build())
}

fn jolly_roger_bay() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(700.0, 0.0, Color::rgb(40, 80, 120))?
        .floor(300.0, 5.0, WATER_BLUE.opaque())?;
    let b = strip(b, 150.0, -100.0, 100.0, 10.0, SAND_TAN)?;
    let b = wall(b, 80.0, 10.0, 60.0, 0.0, CASTLE_WHITE)?;
    Ok(b.build())
}

fn cool_cool_mountain() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(800.0, 0.0, SNOW_WHITE)?
        .floor(200.0, 0.0, Color::rgb(200, 220, 240))?;
    let b = wall(b, 100.0, 0.0, 150.0, 150.0, CASTLE_WHITE)?;
    let b = gable(b, 100.0, 150.0, 200.0, 150.0, ROOF_RED)?;
    Ok(b.build())
}

fn big_boos_haunt() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(600.0, 0.0, CAVE_GRAY)?
        .floor(200.0, 0.0, BOO_PURPLE)?;
    let b = wall(b, 120.0, 0.0, 120.0, 0.0, Color::rgb(60, 40, 80))?;
    let b = strip(b, 80.0, -40.0, 40.0, 120.0, PATH_TAN)?;
    Ok(b.build())
}

fn hazy_maze_cave() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(700.0, 0.0, CAVE_GRAY)?
        .floor(300.0, 0.0, Color::rgb(70, 75, 85))?;
    let b = wall(b, 150.0, 0.0, 80.0, 100.0, WOOD_BROWN)?;
    let b = strip(b, 100.0, 80.0, 120.0, 80.0, PATH_TAN)?;
    Ok(b.build())
}

fn lethal_lava_land() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(700.0, 0.0, Color::rgb(50, 30, 30))?
        .floor(400.0, 15.0, LAVA_RED)?
        .floor(180.0, 15.0, WOOD_BROWN)?;
    let b = wall(b, 80.0, 15.0, 95.0, 0.0, CASTLE_WHITE)?;
    Ok(b.build())
}

fn shifting_sand_land() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(800.0, 0.0, SAND_TAN)?
        .floor(250.0, 0.0, Color::rgb(200, 160, 100))?;
    let b = wall(b, 100.0, 0.0, 100.0, 120.0, CASTLE_WHITE)?;
    let b = strip(b, 60.0, 100.0, 140.0, 100.0, PATH_TAN)?;
    Ok(b.build())
}

fn dire_dire_docks() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(700.0, 0.0, Color::rgb(30, 60, 120))?
        .floor(350.0, 8.0, Color::rgb(50, 100, 200))?
        .floor(120.0, 8.0, PATH_TAN)?;
    let b = wall(b, 60.0, 8.0, 68.0, 0.0, CASTLE_WHITE)?;
    Ok(b.build())
}

fn snowmans_land() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(800.0, 0.0, SNOW_WHITE)?
        .floor(220.0, 0.0, Color::rgb(220, 240, 255))?;
    let b = wall(b, 100.0, 0.0, 100.0, 150.0, CASTLE_WHITE)?;
    let b = strip(b, 80.0, 130.0, 170.0, 100.0, PATH_TAN)?;
    Ok(b.build())
}

fn wet_dry_world() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(700.0, 0.0, Color::rgb(100, 120, 80))?
        .floor(300.0, 5.0, Color::rgb(60, 100, 180))?
        .floor(150.0, 5.0, SAND_TAN)?;
    let b = wall(b, 70.0, 5.0, 75.0, 0.0, CASTLE_WHITE)?;
    Ok(b.build())
}

fn tall_tall_mountain() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(800.0, 0.0, GRASS_GREEN)?
        .floor(300.0, 0.0, Color::rgb(80, 140, 80))?;
    let b = wall(b, 120.0, 0.0, 250.0, 200.0, CASTLE_WHITE)?;
    let b = strip(b, 100.0, 180.0, 220.0, 250.0, PATH_TAN)?;
    let b = gable(b, 80.0, 250.0, 300.0, 200.0, ROOF_RED)?;
    Ok(b.build())
}

fn tiny_huge_island() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(600.0, 0.0, GRASS_GREEN)?
        .floor(200.0, 0.0, Color::rgb(60, 130, 60))?;
    let b = wall(b, 100.0, 0.0, 120.0, 100.0, CASTLE_WHITE)?;
    let b = strip(b, 80.0, 80.0, 120.0, 120.0, PATH_TAN)?;
    Ok(b.build())
}

fn tick_tock_clock() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(500.0, 0.0, CAVE_GRAY)?
        .floor(200.0, 0.0, Color::rgb(100, 100, 110))?;
    let b = wall(b, 80.0, 0.0, 100.0, 0.0, WOOD_BROWN)?;
    let b = strip(b, 60.0, -20.0, 20.0, 100.0, PATH_TAN)?;
    Ok(b.build())
}

fn rainbow_ride() -> anyhow::Result<Scene> {
    let b = SceneBuilder::new()
        .floor(700.0, 0.0, SKY_BLUE)?
        .floor(300.0, 50.0, RAINBOW_PINK)?;
    let b = wall(b, 100.0, 50.0, 150.0, 0.0, Color::rgb(255, 200, 220))?;
    let b = strip(b, 80.0, -30.0, 30.0, 150.0, PATH_TAN)?;
    Ok(b.build())
}
