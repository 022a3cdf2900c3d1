mod tests {
    use image::{DynamicImage, Rgb as ImageRgb, RgbImage, Rgba, RgbaImage};
    use myrtio_frame_composer::sprite::{decode, decode_image, sprite_mode, sprite_script};
    use myrtio_frame_composer::{BLINKT_LED_COUNT, DecodeError, Rgb, SpriteMode};

    const N: usize = BLINKT_LED_COUNT;

    #[allow(clippy::cast_possible_truncation)]
    fn gradient_row(width: u32) -> RgbImage {
        RgbImage::from_fn(width, 1, |x, _| ImageRgb([(x + 1) as u8 * 10, 0, 0]))
    }

    #[test]
    fn test_scroll_mode_slides_window() {
        let frames = decode::<N>(&gradient_row(12), None).unwrap();

        assert_eq!(frames.len(), 5);
        for (offset, frame) in frames.iter().enumerate() {
            for (index, pixel) in frame.iter().enumerate() {
                let x = u8::try_from(offset + index).unwrap();
                assert_eq!(*pixel, Rgb::new((x + 1) * 10, 0, 0));
            }
        }
    }

    #[test]
    fn test_single_row_of_strip_width_is_one_frame() {
        let frames = decode::<N>(&gradient_row(8), None).unwrap();
        assert_eq!(frames.len(), 1);
    }

    #[test]
    #[allow(clippy::cast_possible_truncation)]
    fn test_grid_mode_reads_rows_top_to_bottom() {
        let image = RgbImage::from_fn(8, 3, |x, y| ImageRgb([x as u8, y as u8, 7]));
        let frames = decode::<N>(&image, None).unwrap();

        assert_eq!(frames.len(), 3);
        for (y, frame) in frames.iter().enumerate() {
            for (x, pixel) in frame.iter().enumerate() {
                assert_eq!(*pixel, Rgb::new(x as u8, y as u8, 7));
            }
        }
    }

    #[test]
    fn test_width_mismatch_is_rejected() {
        assert_eq!(
            decode::<N>(&RgbImage::new(7, 3), None),
            Err(DecodeError::WidthMismatch {
                width: 7,
                height: 3,
                expected: N,
            })
        );
        assert_eq!(
            decode::<N>(&RgbImage::new(6, 1), None),
            Err(DecodeError::WidthMismatch {
                width: 6,
                height: 1,
                expected: N,
            })
        );
        assert_eq!(
            decode::<N>(&RgbImage::new(0, 0), None),
            Err(DecodeError::EmptyImage)
        );
    }

    #[test]
    fn test_sprite_mode_detection() {
        assert_eq!(sprite_mode::<N>(8, 4), Ok(SpriteMode::Grid));
        assert_eq!(sprite_mode::<N>(20, 1), Ok(SpriteMode::Scroll));
        assert_eq!(sprite_mode::<N>(8, 1), Ok(SpriteMode::Scroll));
        assert!(sprite_mode::<N>(20, 2).is_err());
    }

    #[test]
    fn test_gamma_is_applied_before_slicing() {
        let image = gradient_row(12);
        let plain = decode::<N>(&image, None).unwrap();
        let corrected = decode::<N>(&image, Some(2.6)).unwrap();

        assert_eq!(corrected.len(), plain.len());
        for (plain, corrected) in plain.iter().zip(&corrected) {
            for (before, after) in plain.iter().zip(corrected) {
                assert!(after.r <= before.r);
            }
        }
        // Windows still overlap pixel for pixel
        for pair in corrected.windows(2) {
            assert_eq!(pair[0][1..], pair[1][..N - 1]);
        }
    }

    #[test]
    fn test_alpha_is_dropped() {
        let image = RgbaImage::from_pixel(8, 2, Rgba([10, 20, 30, 0]));
        let frames = decode_image::<N>(&DynamicImage::ImageRgba8(image), None).unwrap();

        assert_eq!(frames, vec![[Rgb::new(10, 20, 30); N]; 2]);
    }

    #[test]
    fn test_sprite_script_is_static() {
        let image = DynamicImage::ImageRgb8(gradient_row(10));
        let script = sprite_script::<N>(&image, None).unwrap();

        assert!(!script.is_dynamic());
        assert_eq!(script.len(), 3);
    }
}
