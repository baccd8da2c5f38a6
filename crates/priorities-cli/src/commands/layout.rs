use priorities_core::config::AppConfig;
use priorities_core::layout::seeded::fnv1a32;
use priorities_core::layout::{
    decoration_anchor, decoration_seed, CardTransform, Ellipse, StickyStack,
};
use priorities_core::UserId;

use crate::error::CliError;

pub fn run_angle(user_id: u64, row: usize, width: f32, height: f32, config: &AppConfig) {
    let seed = decoration_seed(UserId::new(user_id), row);
    let anchor = decoration_anchor(&seed, &Ellipse::inscribed(width, height), &config.angle);

    println!("seed   {seed}");
    println!("hash   {:#010x}", fnv1a32(&seed));
    println!("angle  {:.2}°", anchor.angle_deg);
    println!("point  ({:.1}, {:.1})", anchor.x, anchor.y);
}

pub fn run_sticky(
    cards: usize,
    scroll: f32,
    as_json: bool,
    config: &AppConfig,
) -> Result<(), CliError> {
    let stack = StickyStack::new(cards, config.sticky);
    let transforms = stack.transforms(scroll);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&transforms)?);
    } else {
        println!(
            "release offset {:.1}px, scroll {scroll:.1}px",
            stack.release_offset()
        );
        for line in format_sticky_lines(&transforms) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn format_sticky_lines(transforms: &[CardTransform]) -> Vec<String> {
    transforms
        .iter()
        .enumerate()
        .map(|(index, transform)| {
            format!(
                "card {index}  translate {:>8.1}  scale {:.3}  top {:>7.1}",
                transform.translate_y, transform.scale, transform.screen_y
            )
        })
        .collect()
}
