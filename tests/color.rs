mod tests {
    use myrtio_frame_composer::GammaLut;
    use myrtio_frame_composer::color::{
        HsvChannel, OFF, Rgb, mirror_frame, rgb2hsv, shift_hsv,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_mirror_frame() {
        let mut leds = [RED, BLUE, WHITE, OFF];
        mirror_frame(&mut leds);
        assert_eq!(leds, [OFF, WHITE, BLUE, RED]);

        mirror_frame(&mut leds);
        assert_eq!(leds, [RED, BLUE, WHITE, OFF]);
    }

    #[test]
    fn test_rgb2hsv_primaries() {
        assert_eq!(rgb2hsv(RED).hue, 0);
        assert_eq!(rgb2hsv(BLUE).hue, 170);
        assert_eq!(rgb2hsv(WHITE).sat, 0);
        assert_eq!(rgb2hsv(OFF).val, 0);
    }

    #[test]
    fn test_zero_shift_keeps_primaries() {
        let green = Rgb { r: 0, g: 255, b: 0 };
        for color in [RED, green, BLUE, WHITE] {
            assert_eq!(shift_hsv(color, HsvChannel::Hue, 0), color);
            assert_eq!(shift_hsv(color, HsvChannel::Saturation, 0), color);
        }
    }

    #[test]
    fn test_shift_value_keeps_blue_hue() {
        let dim = Rgb { r: 0, g: 0, b: 40 };
        assert_eq!(
            shift_hsv(dim, HsvChannel::Value, 40),
            Rgb { r: 0, g: 0, b: 80 }
        );
    }

    #[test]
    fn test_shift_value_saturates() {
        assert_eq!(shift_hsv(RED, HsvChannel::Value, -255), OFF);
        assert_eq!(rgb2hsv(shift_hsv(RED, HsvChannel::Value, 100)).val, 255);
    }

    #[test]
    fn test_gamma_lut() {
        let identity = GammaLut::new(1.0);
        for value in 0..=255u8 {
            assert_eq!(identity.apply(value), value);
        }

        let lut = GammaLut::default();
        assert_eq!(lut.apply(0), 0);
        assert_eq!(lut.apply(255), 255);
        assert!(lut.apply(128) < 64);
        assert_eq!(lut.apply_rgb(WHITE), WHITE);
    }
}
