use rstest::rstest;
use stepper_config::{ScriptDirection, ScriptEvent, parse_script};

#[test]
fn parses_all_event_kinds() {
    let text = "\
0 press up
500 release
600 press down
600 release
1000 set -3.25
";
    let events = parse_script(text).unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(
        events[2],
        ScriptEvent::Press {
            at_ms: 600,
            direction: ScriptDirection::Down
        }
    );
    assert_eq!(
        events[4],
        ScriptEvent::Set {
            at_ms: 1000,
            value: -3.25
        }
    );
    assert_eq!(events[4].at_ms(), 1000);
}

#[test]
fn direction_aliases() {
    let events = parse_script("0 press +\n1 release\n2 press DEC\n3 release\n").unwrap();
    assert!(matches!(
        events[0],
        ScriptEvent::Press {
            direction: ScriptDirection::Up,
            ..
        }
    ));
    assert!(matches!(
        events[2],
        ScriptEvent::Press {
            direction: ScriptDirection::Down,
            ..
        }
    ));
}

#[rstest]
#[case("abc press up\n", "line 1: invalid timestamp")]
#[case("0 press\n", "line 1: press needs a direction")]
#[case("0 press sideways\n", "unknown direction")]
#[case("0 jump\n", "unknown event")]
#[case("0 set\n", "set needs a value")]
#[case("0 set twelve\n", "invalid number")]
#[case("0 set NaN\n", "must be a number")]
#[case("0 release now\n", "unexpected trailing token")]
#[case("100 press up\n50 release\n", "line 2: timestamp 50 goes backwards")]
#[case("7\n", "line 1: missing event")]
fn rejects_malformed_lines(#[case] text: &str, #[case] needle: &str) {
    let err = parse_script(text).expect_err("should reject");
    assert!(
        format!("{err}").contains(needle),
        "error {err} does not mention {needle:?}"
    );
}
