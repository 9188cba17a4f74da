#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(events) = stepper_config::parse_script(data) {
        // Accepted scripts are always time-ordered.
        assert!(events.windows(2).all(|w| w[0].at_ms() <= w[1].at_ms()));
    }
});
