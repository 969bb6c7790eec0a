mod tests {
    use sternenhimmel::group::round1;
    use sternenhimmel::{GroupState, SkyConfig, SwitchAction, SwitchChannel, SwitchInterpreter};

    const ACTIONS: [SwitchAction; 5] = [
        SwitchAction::On,
        SwitchAction::Off,
        SwitchAction::MoveUp,
        SwitchAction::MoveDown,
        SwitchAction::Other,
    ];

    fn interpreter() -> SwitchInterpreter {
        SwitchInterpreter::new(&SkyConfig::default())
    }

    fn on_with(amplitude: Option<f64>, frequency: Option<f64>) -> GroupState {
        GroupState {
            on: Some(true),
            amplitude,
            frequency,
            ..GroupState::default()
        }
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(SwitchAction::parse_from_str("on"), SwitchAction::On);
        assert_eq!(SwitchAction::parse_from_str("off"), SwitchAction::Off);
        assert_eq!(
            SwitchAction::parse_from_str("brightness_move_up"),
            SwitchAction::MoveUp
        );
        assert_eq!(
            SwitchAction::parse_from_str("brightness_move_down"),
            SwitchAction::MoveDown
        );
        assert_eq!(
            SwitchAction::parse_from_str("brightness_stop"),
            SwitchAction::Other
        );
        assert_eq!(SwitchAction::from_payload(None), SwitchAction::Other);
        assert_eq!(SwitchAction::MoveUp.as_str(), Some("brightness_move_up"));
    }

    #[test]
    fn test_channel_from_segments() {
        assert_eq!(SwitchChannel::from_segments(&[]), SwitchChannel::Action);
        assert_eq!(
            SwitchChannel::from_segments(&["brightness"]),
            SwitchChannel::Brightness
        );
        assert_eq!(
            SwitchChannel::from_segments(&["frequency"]),
            SwitchChannel::Frequency
        );
        assert_eq!(
            SwitchChannel::from_segments(&["living", "frequency"]),
            SwitchChannel::Frequency
        );
    }

    #[test]
    fn test_toggle_on_off() {
        assert_eq!(
            SwitchInterpreter::toggle(SwitchAction::On),
            GroupState {
                on: Some(true),
                increase_brightness: Some(false),
                decrease_brightness: Some(false),
                ..GroupState::default()
            }
        );
        assert_eq!(SwitchInterpreter::toggle(SwitchAction::Off).on, Some(false));
    }

    #[test]
    fn test_toggle_records_long_press_flags() {
        let up = SwitchInterpreter::toggle(SwitchAction::MoveUp);
        assert_eq!(up.on, None);
        assert_eq!(up.increase_brightness, Some(true));
        assert_eq!(up.decrease_brightness, Some(false));

        let down = SwitchInterpreter::toggle(SwitchAction::MoveDown);
        assert_eq!(down.increase_brightness, Some(false));
        assert_eq!(down.decrease_brightness, Some(true));

        let other = SwitchInterpreter::toggle(SwitchAction::Other);
        assert_eq!(other.on, None);
        assert_eq!(other.increase_brightness, Some(false));
        assert_eq!(other.decrease_brightness, Some(false));
    }

    #[test]
    fn test_brightness_taps() {
        let interpreter = interpreter();
        let current = on_with(Some(0.4), None);

        let up = interpreter.brightness(&current, SwitchAction::On);
        assert_eq!(up.amplitude, Some(0.7));
        assert_eq!(up.on, Some(true));
        assert_eq!(up.frequency, None);

        let down = interpreter.brightness(&current, SwitchAction::Off);
        assert_eq!(down.amplitude, Some(0.1));
    }

    #[test]
    fn test_brightness_uses_default_amplitude() {
        let delta = interpreter().brightness(&GroupState::default(), SwitchAction::On);
        assert_eq!(delta.amplitude, Some(0.7));
    }

    #[test]
    fn test_brightness_turns_group_on() {
        let off = GroupState {
            on: Some(false),
            ..GroupState::default()
        };
        for action in ACTIONS {
            assert_eq!(interpreter().brightness(&off, action).on, Some(true));
        }
    }

    #[test]
    fn test_brightness_clamped() {
        let interpreter = interpreter();
        assert_eq!(
            interpreter
                .brightness(&on_with(Some(0.9), None), SwitchAction::On)
                .amplitude,
            Some(1.0)
        );
        assert_eq!(
            interpreter
                .brightness(&on_with(Some(0.1), None), SwitchAction::Off)
                .amplitude,
            Some(0.0)
        );
    }

    #[test]
    fn test_brightness_long_press_up() {
        for amplitude in [0.0, 0.4, 0.7, 1.0] {
            let delta =
                interpreter().brightness(&on_with(Some(amplitude), Some(1.3)), SwitchAction::MoveUp);
            assert_eq!(
                delta,
                GroupState {
                    on: Some(true),
                    amplitude: Some(1.0),
                    frequency: Some(0.0),
                    ..GroupState::default()
                }
            );
        }
    }

    #[test]
    fn test_brightness_long_press_down() {
        let interpreter = interpreter();

        let bright = interpreter.brightness(&on_with(Some(1.0), Some(0.0)), SwitchAction::MoveDown);
        assert_eq!(bright.amplitude, Some(0.4));
        assert_eq!(bright.frequency, Some(0.5));

        let dim = interpreter.brightness(&on_with(Some(0.1), Some(0.0)), SwitchAction::MoveDown);
        assert_eq!(dim.amplitude, Some(0.1));
    }

    #[test]
    fn test_brightness_stays_in_range_with_one_decimal() {
        let interpreter = interpreter();
        let mut state = on_with(Some(0.4), None);

        let sequence = [
            SwitchAction::On,
            SwitchAction::On,
            SwitchAction::On,
            SwitchAction::Off,
            SwitchAction::Off,
            SwitchAction::Off,
            SwitchAction::Off,
            SwitchAction::Off,
            SwitchAction::On,
            SwitchAction::MoveDown,
            SwitchAction::On,
            SwitchAction::MoveUp,
            SwitchAction::Off,
            SwitchAction::Other,
        ];
        for action in sequence {
            let delta = interpreter.brightness(&state, action);
            let amplitude = delta.amplitude.unwrap();
            assert!((0.0..=1.0).contains(&amplitude), "{action:?} gave {amplitude}");
            assert_eq!(round1(amplitude), amplitude);
            state.amplitude = delta.amplitude;
        }
    }

    #[test]
    fn test_frequency_suppressed_when_off() {
        let interpreter = interpreter();
        let off = GroupState {
            on: Some(false),
            frequency: Some(0.5),
            ..GroupState::default()
        };
        for action in ACTIONS {
            assert_eq!(interpreter.frequency(&off, action), None);
            assert_eq!(interpreter.frequency(&GroupState::default(), action), None);
        }
    }

    #[test]
    fn test_frequency_adjustments() {
        let interpreter = interpreter();
        let current = on_with(None, Some(0.5));

        let frequency = |action| {
            interpreter
                .frequency(&current, action)
                .and_then(|delta| delta.frequency)
        };
        assert_eq!(frequency(SwitchAction::On), Some(0.7));
        assert_eq!(frequency(SwitchAction::Off), Some(0.3));
        assert_eq!(frequency(SwitchAction::MoveUp), Some(2.4));
        assert_eq!(frequency(SwitchAction::MoveDown), Some(0.0));
        assert_eq!(frequency(SwitchAction::Other), Some(0.5));
    }

    #[test]
    fn test_frequency_delta_only_frequency() {
        let delta = interpreter()
            .frequency(&on_with(Some(0.7), Some(0.5)), SwitchAction::On)
            .unwrap();
        assert_eq!(
            delta,
            GroupState {
                frequency: Some(0.7),
                ..GroupState::default()
            }
        );
    }

    #[test]
    fn test_frequency_not_clamped() {
        let interpreter = interpreter();

        let negative = interpreter
            .frequency(&on_with(None, Some(0.0)), SwitchAction::Off)
            .unwrap();
        assert_eq!(negative.frequency, Some(-0.2));

        let fast = interpreter
            .frequency(&on_with(None, Some(2.4)), SwitchAction::On)
            .unwrap();
        assert_eq!(fast.frequency, Some(2.6));
    }

    #[test]
    fn test_interpret_routes_channels() {
        let interpreter = interpreter();
        let off = GroupState::default();

        assert_eq!(
            interpreter.interpret(SwitchChannel::Action, &off, SwitchAction::On),
            Some(SwitchInterpreter::toggle(SwitchAction::On))
        );
        assert_eq!(
            interpreter.interpret(SwitchChannel::Brightness, &off, SwitchAction::On),
            Some(interpreter.brightness(&off, SwitchAction::On))
        );
        assert_eq!(
            interpreter.interpret(SwitchChannel::Frequency, &off, SwitchAction::On),
            None
        );
    }
}
