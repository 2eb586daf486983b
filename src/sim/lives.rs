//! Life indicator: a row of icons in the top-left corner

use glam::Vec2;

use super::bounds::Aabb;
use crate::consts::{LIFE_ICON_GAP, LIFE_ICON_MARGIN, LIFE_ICON_SIZE};
use crate::platform::{Sprite, Surface};

/// Stateless presenter for the remaining lives
#[derive(Debug, Clone, Copy, Default)]
pub struct LifeIndicator;

impl LifeIndicator {
    /// Icon rectangles for `lives` remaining, left to right
    pub fn icon_bounds(lives: u8) -> impl Iterator<Item = Aabb> {
        (0..lives).map(|i| {
            let x = LIFE_ICON_MARGIN + i as f32 * (LIFE_ICON_SIZE + LIFE_ICON_GAP);
            Aabb::from_pos_size(Vec2::new(x, LIFE_ICON_MARGIN), Vec2::splat(LIFE_ICON_SIZE))
        })
    }

    pub fn draw(&self, surface: &mut dyn Surface, lives: u8) {
        for bounds in Self::icon_bounds(lives) {
            surface.draw_sprite(Sprite::Life, bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessSurface;

    #[test]
    fn test_one_icon_per_life() {
        let mut surface = HeadlessSurface::new();
        LifeIndicator.draw(&mut surface, 3);
        assert_eq!(surface.count(|s| *s == Sprite::Life), 3);

        surface.sprites.clear();
        LifeIndicator.draw(&mut surface, 0);
        assert!(surface.sprites.is_empty());
    }

    #[test]
    fn test_icons_do_not_overlap() {
        let icons: Vec<_> = LifeIndicator::icon_bounds(4).collect();
        for pair in icons.windows(2) {
            assert!(pair[0].max.x < pair[1].min.x);
        }
    }
}
