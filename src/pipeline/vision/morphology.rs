use image::{GrayImage, Luma};
use imageproc::morphology::{grayscale_open, Mask};

use crate::pipeline::config::MAX_KERNEL_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Morphological opening of a binary image with a 1-pixel-thick line kernel
/// of `length` pixels. For a flat line kernel the opening keeps exactly the
/// foreground runs along that orientation that are at least `length` long.
/// Pixels beyond the border count as foreground, so a run touching the edge
/// is measured as if it continued past it.
///
/// `length` is clamped to the largest kernel a mask can hold.
pub fn open_with_line(binary: &GrayImage, orientation: Orientation, length: u32) -> GrayImage {
    let length = length.clamp(1, MAX_KERNEL_LENGTH - 1);
    let center = (length / 2) as u8;
    let mask = match orientation {
        Orientation::Horizontal => {
            Mask::from_image(&GrayImage::from_pixel(length, 1, Luma([255])), center, 0)
        }
        Orientation::Vertical => {
            Mask::from_image(&GrayImage::from_pixel(1, length, Luma([255])), 0, center)
        }
    };
    grayscale_open(binary, &mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_long_runs_and_drops_short_ones() {
        let mut img = GrayImage::new(100, 10);
        for x in 0..60 {
            img.put_pixel(x, 2, Luma([255]));
        }
        for x in 40..60 {
            img.put_pixel(x, 6, Luma([255]));
        }
        let opened = open_with_line(&img, Orientation::Horizontal, 40);
        assert_eq!(opened.get_pixel(30, 2)[0], 255);
        assert_eq!(opened.get_pixel(50, 6)[0], 0);
    }

    #[test]
    fn run_of_exactly_kernel_length_survives() {
        let mut img = GrayImage::new(100, 5);
        for x in 30..70 {
            img.put_pixel(x, 2, Luma([255]));
        }
        let opened = open_with_line(&img, Orientation::Horizontal, 40);
        assert!((30..70).all(|x| opened.get_pixel(x, 2)[0] == 255));
        assert_eq!(opened.get_pixel(29, 2)[0], 0);
        assert_eq!(opened.get_pixel(70, 2)[0], 0);
    }

    #[test]
    fn vertical_opening_ignores_horizontal_runs() {
        let mut img = GrayImage::new(100, 100);
        for x in 0..100 {
            img.put_pixel(x, 50, Luma([255]));
        }
        for y in 0..80 {
            img.put_pixel(20, y, Luma([255]));
        }
        let opened = open_with_line(&img, Orientation::Vertical, 40);
        assert_eq!(opened.get_pixel(70, 50)[0], 0);
        assert_eq!(opened.get_pixel(20, 10)[0], 255);
    }
}
