use stepper_config::{ScriptDirection, ScriptEvent, load_toml};
use stepper_core::{Direction, Easing, Interaction, Preset, StepperCfg};

#[test]
fn empty_section_is_smooth_preset() {
    let cfg = load_toml("").unwrap();
    assert_eq!(StepperCfg::from(&cfg.stepper), StepperCfg::preset(Preset::Smooth));
}

#[test]
fn preset_then_field_overrides() {
    let cfg = load_toml(
        r#"
[stepper]
preset = "rapid"
max_value = 99.0
precision = 1
easing = "solved"
"#,
    )
    .unwrap();
    let core = StepperCfg::from(&cfg.stepper);
    assert_eq!(core.tick_ms, 81);
    assert_eq!(core.first_tick_ms, 81);
    assert_eq!(core.max_change, 30.0);
    assert_eq!(core.max_value, 99.0);
    assert_eq!(core.precision, 1);
    assert_eq!(core.easing, Easing::Solved);
}

#[test]
fn explicit_base_preset_wins_over_file_preset() {
    let cfg = load_toml("[stepper]\npreset = \"rapid\"\ntick_ms = 25\n").unwrap();
    let core = StepperCfg::with_overrides(Preset::Smooth, &cfg.stepper);
    assert_eq!(core.first_tick_ms, 190);
    assert_eq!(core.tick_ms, 25);
}

#[test]
fn script_events_convert() {
    let ev = ScriptEvent::Press {
        at_ms: 5,
        direction: ScriptDirection::Down,
    };
    assert_eq!(
        Interaction::from(&ev),
        Interaction::Press {
            at_ms: 5,
            direction: Direction::Down
        }
    );
    assert_eq!(
        Interaction::from(&ScriptEvent::Set {
            at_ms: 9,
            value: 1.5
        }),
        Interaction::Set {
            at_ms: 9,
            value: 1.5
        }
    );
}

#[test]
fn script_direction_tokens_reach_core_direction() {
    let events = stepper_config::parse_script("0 press inc\n1 release\n2 press -\n3 release\n").unwrap();
    let dirs: Vec<Direction> = events
        .iter()
        .filter_map(|e| match Interaction::from(e) {
            Interaction::Press { direction, .. } => Some(direction),
            _ => None,
        })
        .collect();
    assert_eq!(dirs, vec![Direction::Up, Direction::Down]);
}

#[test]
fn precision_cap_is_shared_with_the_config_file() {
    use stepper_core::config::MAX_PRECISION;

    let at_cap = load_toml(&format!("[stepper]\nprecision = {MAX_PRECISION}\n")).unwrap();
    at_cap.validate().unwrap();
    StepperCfg::from(&at_cap.stepper).validate().unwrap();

    let over = StepperCfg {
        precision: MAX_PRECISION + 1,
        ..StepperCfg::default()
    };
    assert!(over.validate().is_err());
    let over_file = load_toml(&format!("[stepper]\nprecision = {}\n", MAX_PRECISION + 1)).unwrap();
    assert!(over_file.validate().is_err());
}
