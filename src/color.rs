//! Button colours in the panel host's packed `0xRRGGBB` integer form.

/// Packed RGB colour.
pub type Rgb = u32;

/// Pack three channels into one integer.
pub const fn combine_rgb(r: u8, g: u8, b: u8) -> Rgb {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split a packed colour into its channels.
pub const fn split_rgb(color: Rgb) -> (u8, u8, u8) {
    (((color >> 16) & 0xff) as u8, ((color >> 8) & 0xff) as u8, (color & 0xff) as u8)
}

/// Cue type background colours.
pub mod palette {
    #![allow(missing_docs)]

    use super::{combine_rgb, Rgb};

    pub const BLACK: Rgb = combine_rgb(0, 0, 0);
    pub const WHITE: Rgb = combine_rgb(255, 255, 255);
    pub const RED: Rgb = combine_rgb(255, 0, 0);
    pub const DARK_RED: Rgb = combine_rgb(132, 0, 0);
    pub const ORANGE: Rgb = combine_rgb(232, 114, 0);
    pub const ORANGE_2: Rgb = combine_rgb(204, 85, 0);
    pub const SALMON: Rgb = combine_rgb(250, 128, 114);
    pub const BLUE: Rgb = combine_rgb(0, 92, 184);
    pub const BLUE_2: Rgb = combine_rgb(30, 60, 150);
    pub const BLUE_3: Rgb = combine_rgb(0, 120, 150);
    pub const BLUE_4: Rgb = combine_rgb(40, 90, 120);
    pub const PURPLE: Rgb = combine_rgb(120, 40, 170);
    pub const PURPLE_2: Rgb = combine_rgb(100, 50, 140);
    pub const PURPLE_3: Rgb = combine_rgb(140, 60, 160);
    pub const PURPLE_4: Rgb = combine_rgb(160, 40, 120);
    pub const PURPLE_5: Rgb = combine_rgb(90, 30, 110);
    pub const GREEN: Rgb = combine_rgb(0, 140, 60);
    pub const GREEN_2: Rgb = combine_rgb(40, 120, 40);
    pub const GREEN_3: Rgb = combine_rgb(20, 100, 80);
    pub const YELLOW: Rgb = combine_rgb(190, 160, 0);
    pub const BROWN: Rgb = combine_rgb(120, 72, 30);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_and_splits_channels() {
        assert_eq!(combine_rgb(255, 0, 0), 0xff_00_00);
        assert_eq!(split_rgb(palette::DARK_RED), (132, 0, 0));
    }
}
