mod tests {
    use std::collections::HashSet;

    use myrtio_frame_composer::{
        Action, BLINKT_LED_COUNT, Frame, FramePlayer, FrameScript, OFF, PlaybackMode,
        PlayerError, Rgb, Rng,
    };

    const N: usize = BLINKT_LED_COUNT;
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    fn dot(index: usize, color: Rgb) -> Frame<N> {
        let mut frame = [OFF; N];
        frame[index] = color;
        frame
    }

    fn reversed(frame: &Frame<N>) -> Frame<N> {
        let mut frame = *frame;
        frame.reverse();
        frame
    }

    #[test]
    fn test_looping_playback_does_not_drift() {
        let frames = [dot(0, GREEN), dot(1, GREEN), dot(2, GREEN)];
        let mut player =
            FramePlayer::looping(FrameScript::from_frames(frames), false, Rng::with_seed(1))
                .unwrap();

        assert!(!player.is_dynamic());
        for i in 0..3_000 {
            assert_eq!(player.next_frame(), Ok(frames[i % 3]));
        }
        assert_eq!(player.cursor(), 0);
    }

    #[test]
    fn test_once_playback_empties() {
        let frames = [dot(0, WHITE), dot(4, WHITE), dot(7, WHITE)];
        let mut player =
            FramePlayer::once(FrameScript::from_frames(frames), false, Rng::with_seed(1)).unwrap();

        for frame in frames {
            assert!(!player.is_empty());
            assert_eq!(player.next_frame(), Ok(frame));
        }
        assert!(player.is_empty());
        assert_eq!(player.next_frame(), Err(PlayerError::Exhausted));
    }

    #[test]
    fn test_empty_player_reports_exhausted() {
        let mut looping = FramePlayer::<N>::empty(PlaybackMode::Loop);
        let mut once = FramePlayer::<N>::empty(PlaybackMode::Once);

        assert!(looping.is_empty());
        assert_eq!(looping.next_frame(), Err(PlayerError::Exhausted));
        assert_eq!(once.next_frame(), Err(PlayerError::Exhausted));
    }

    #[test]
    fn test_mirrored_player_reverses_frames() {
        let frames = [dot(0, GREEN), dot(2, WHITE)];
        let player =
            FramePlayer::looping(FrameScript::from_frames(frames), true, Rng::with_seed(1))
                .unwrap();

        assert!(player.is_mirrored());
        let played: Vec<Frame<N>> = player.frames().copied().collect();
        assert_eq!(played, vec![dot(N - 1, GREEN), dot(N - 3, WHITE)]);
    }

    #[test]
    fn test_mirroring_twice_restores_order() {
        let script: FrameScript<N> = FrameScript::new(vec![
            [GREEN, WHITE, OFF, OFF, GREEN, OFF, WHITE, OFF].into(),
            Action::variable_delay(1, 1).into(),
            dot(5, GREEN).into(),
        ])
        .unwrap();
        let mut player = FramePlayer::looping(script.clone(), false, Rng::with_seed(9)).unwrap();
        let original: Vec<Frame<N>> = player.frames().copied().collect();

        player.mirror();
        let mirrored: Vec<Frame<N>> = player.frames().copied().collect();
        assert_eq!(mirrored, original.iter().map(reversed).collect::<Vec<_>>());

        player.mirror();
        let restored: Vec<Frame<N>> = player.frames().copied().collect();
        assert_eq!(restored, original);
        assert_eq!(player.script(), &script);
    }

    #[test]
    fn test_mirrored_dynamic_player_recompiles_mirrored() {
        let b0 = dot(0, GREEN);
        let b1 = dot(1, GREEN);
        let script = FrameScript::new(vec![
            b0.into(),
            Action::variable_delay(0, 2).into(),
            b1.into(),
        ])
        .unwrap();
        let mut player = FramePlayer::looping(script, true, Rng::with_seed(5)).unwrap();

        for _ in 0..100 {
            let frame = player.next_frame().unwrap();
            assert!(frame == reversed(&b0) || frame == reversed(&b1));
        }
    }

    #[test]
    fn test_dynamic_sequence_restarts_after_wrap() {
        let b0 = dot(0, WHITE);
        let b1 = dot(7, WHITE);
        let script = FrameScript::new(vec![
            b0.into(),
            Action::variable_delay(0, 3).into(),
            b1.into(),
        ])
        .unwrap();
        let mut player = FramePlayer::looping(script, false, Rng::with_seed(11)).unwrap();
        assert!(player.is_dynamic());

        let mut previous = player.next_frame().unwrap();
        assert_eq!(previous, b0);
        for _ in 0..500 {
            let frame = player.next_frame().unwrap();
            if previous == b1 {
                assert_eq!(frame, b0);
            }
            assert!(frame == b0 || frame == b1);
            previous = frame;
        }
    }

    #[test]
    fn test_dynamic_sequence_recompiles_on_wrap() {
        let b0 = dot(0, WHITE);
        let b1 = dot(7, WHITE);
        let script = FrameScript::new(vec![
            b0.into(),
            Action::variable_delay(0, 5).into(),
            b1.into(),
        ])
        .unwrap();
        let mut player = FramePlayer::looping(script, false, Rng::with_seed(23)).unwrap();
        let mut draws = Rng::with_seed(23);

        let mut runs = HashSet::new();
        for _ in 0..40 {
            let mut run = 0;
            while player.next_frame().unwrap() == b0 {
                run += 1;
            }
            assert_eq!(run, 1 + usize::from(draws.u16(0..=5)));
            runs.insert(run);
        }
        assert!(runs.len() > 1);
    }

    #[test]
    fn test_recompile_resets_cursor() {
        let script = FrameScript::new(vec![
            dot(0, GREEN).into(),
            Action::variable_delay(2, 2).into(),
            dot(1, GREEN).into(),
        ])
        .unwrap();
        let mut player = FramePlayer::looping(script, false, Rng::with_seed(2)).unwrap();

        player.next_frame().unwrap();
        player.next_frame().unwrap();
        assert_eq!(player.cursor(), 2);

        player.recompile().unwrap();
        assert_eq!(player.cursor(), 0);
        assert_eq!(player.len(), 4);
    }
}
