//! Scroll-synchronized sticky card stack.
//!
//! Cards are laid out with a fixed spacing. Once the scroll offset passes a
//! card's trigger, the card is translated down so it rests at its sticky
//! position. When the last card sticks, every translation freezes and the
//! whole stack scrolls away together.

use serde::{Deserialize, Serialize};

use crate::util::clamp_unit;

/// Layout constants for the film stack, in px
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StickyConfig {
    /// Natural top of the first card
    pub top_inset: f32,
    /// Distance between natural card tops
    pub card_spacing: f32,
    /// Resting screen top of the first stuck card
    pub sticky_top: f32,
    /// Extra resting offset per card; must be smaller than `card_spacing`
    pub sticky_step: f32,
    /// Translation at which a card reaches `min_scale`
    pub scale_distance: f32,
    pub min_scale: f32,
}

impl Default for StickyConfig {
    fn default() -> Self {
        Self {
            top_inset: 120.0,
            card_spacing: 240.0,
            sticky_top: 96.0,
            sticky_step: 16.0,
            scale_distance: 320.0,
            min_scale: 0.95,
        }
    }
}

/// Per-frame style of one card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardTransform {
    pub translate_y: f32,
    pub scale: f32,
    /// Resulting top of the card on screen
    pub screen_y: f32,
}

/// Geometry of a stack of `count` cards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyStack {
    count: usize,
    config: StickyConfig,
}

impl StickyStack {
    pub const fn new(count: usize, config: StickyConfig) -> Self {
        Self { count, config }
    }

    pub const fn len(&self) -> usize {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub const fn config(&self) -> &StickyConfig {
        &self.config
    }

    /// Untransformed top of card `index` within the scroll content
    pub fn natural_top(&self, index: usize) -> f32 {
        (index as f32).mul_add(self.config.card_spacing, self.config.top_inset)
    }

    /// Screen top the card holds while stuck
    pub fn sticky_top(&self, index: usize) -> f32 {
        (index as f32).mul_add(self.config.sticky_step, self.config.sticky_top)
    }

    /// Scroll offset at which card `index` reaches its sticky position
    pub fn trigger(&self, index: usize) -> f32 {
        self.natural_top(index) - self.sticky_top(index)
    }

    /// Scroll offset after which the whole stack scrolls away together
    pub fn release_offset(&self) -> f32 {
        self.trigger(self.count.saturating_sub(1))
    }

    pub fn translate_y(&self, index: usize, scroll_offset: f32) -> f32 {
        let trigger = self.trigger(index);
        let release = self.release_offset().max(trigger);
        scroll_offset.clamp(trigger, release) - trigger
    }

    pub fn scale(&self, index: usize, scroll_offset: f32) -> f32 {
        let progress = if self.config.scale_distance > 0.0 {
            clamp_unit(self.translate_y(index, scroll_offset) / self.config.scale_distance)
        } else {
            0.0
        };
        (self.config.min_scale - 1.0).mul_add(progress, 1.0)
    }

    pub fn transform(&self, index: usize, scroll_offset: f32) -> CardTransform {
        let translate_y = self.translate_y(index, scroll_offset);
        CardTransform {
            translate_y,
            scale: self.scale(index, scroll_offset),
            screen_y: self.natural_top(index) - scroll_offset + translate_y,
        }
    }

    pub fn transforms(&self, scroll_offset: f32) -> Vec<CardTransform> {
        (0..self.count)
            .map(|index| self.transform(index, scroll_offset))
            .collect()
    }

    /// Scrollable content height for cards `card_height` px tall
    pub fn content_height(&self, card_height: f32) -> f32 {
        if self.count == 0 {
            return self.config.top_inset;
        }
        self.natural_top(self.count - 1) + card_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn config() -> StickyConfig {
        StickyConfig {
            top_inset: 120.0,
            card_spacing: 240.0,
            sticky_top: 96.0,
            sticky_step: 16.0,
            scale_distance: 320.0,
            min_scale: 0.95,
        }
    }

    fn assert_capped_together(count: usize) {
        let stack = StickyStack::new(count, config());
        let release = stack.release_offset();

        let before = stack.transforms(release + 10.0);
        let after = stack.transforms(release + 500.0);
        for (a, b) in before.iter().zip(&after) {
            assert!((b.translate_y - a.translate_y).abs() < EPS);
            assert!(((b.screen_y - a.screen_y) - -490.0).abs() < EPS);
        }
    }

    #[test]
    fn card_tops_inside_the_stack_start_at_zero() {
        let stack = StickyStack::new(3, config());
        assert_eq!(stack.config(), &config());
        for index in 0..3 {
            let top = stack.natural_top(index) - stack.config().top_inset;
            assert!((top - index as f32 * 240.0).abs() < EPS);
        }
        // A card's transform is a pure function of the offset it reads.
        assert_eq!(stack.transform(1, 410.0), stack.transform(1, 410.0));
    }

    #[test]
    fn triggers_follow_layout_constants() {
        let stack = StickyStack::new(3, config());
        assert!((stack.trigger(0) - 24.0).abs() < EPS);
        assert!((stack.trigger(1) - 248.0).abs() < EPS);
        assert!((stack.trigger(2) - 472.0).abs() < EPS);
        assert!((stack.release_offset() - 472.0).abs() < EPS);
    }

    #[test]
    fn card_rests_at_sticky_position_between_trigger_and_release() {
        let stack = StickyStack::new(3, config());
        let card = stack.transform(0, 300.0);
        assert!((card.translate_y - 276.0).abs() < EPS);
        assert!((card.screen_y - 96.0).abs() < EPS);

        let second = stack.transform(1, 300.0);
        assert!((second.screen_y - 112.0).abs() < EPS);

        let third = stack.transform(2, 300.0);
        assert!(third.translate_y.abs() < EPS);
        assert!((third.screen_y - 300.0).abs() < EPS);
    }

    #[test]
    fn no_translation_before_trigger_or_on_overscroll() {
        let stack = StickyStack::new(3, config());
        assert!(stack.translate_y(0, 10.0).abs() < EPS);
        assert!(stack.translate_y(1, -80.0).abs() < EPS);
        assert!((stack.scale(1, 0.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn stack_scrolls_away_together_for_three_cards() {
        assert_capped_together(3);
    }

    #[test]
    fn stack_scrolls_away_together_for_five_cards() {
        assert_capped_together(5);
        let stack = StickyStack::new(5, config());
        let frozen = stack.transforms(2_000.0);
        let expected = [896.0, 672.0, 448.0, 224.0, 0.0];
        for (card, want) in frozen.iter().zip(expected) {
            assert!((card.translate_y - want).abs() < EPS);
        }
    }

    #[test]
    fn scale_shrinks_to_minimum_and_stops() {
        let stack = StickyStack::new(3, config());
        assert!((stack.scale(0, 24.0 + 160.0) - 0.975).abs() < EPS);
        assert!((stack.scale(0, 2_000.0) - 0.95).abs() < EPS);
    }

    #[test]
    fn empty_stack_is_inert() {
        let stack = StickyStack::new(0, config());
        assert!(stack.transforms(100.0).is_empty());
        assert!((stack.content_height(300.0) - 120.0).abs() < EPS);
    }
}
