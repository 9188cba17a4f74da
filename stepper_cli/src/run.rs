//! Command execution: config mapping, stepper assembly, and output.

use std::path::Path;

use serde_json::json;
use stepper_core::error::{Result as CoreResult, StepperError};
use stepper_core::runner::{self, ReplayReport};
use stepper_core::{Direction, Interaction, ManualTimer, Stepper, StepperCfg};
use stepper_traits::{Clock, ManualClock, MonotonicClock};

/// Gap between clicks issued by the `click` command.
const CLICK_GAP_MS: u64 = 250;

/// Build a stepper on `clock` with a shared `ManualTimer`.
fn assemble<C: Clock + Clone>(
    clock: C,
    cfg: StepperCfg,
    live: bool,
) -> CoreResult<(Stepper<C, ManualTimer<C>>, ManualTimer<C>)> {
    let timer = ManualTimer::new(clock.clone());
    let mut builder = Stepper::builder()
        .with_config(cfg)
        .with_clock(clock)
        .with_timer(timer.clone());
    if live {
        builder = builder.on_value_changed(|v| println!("{v}"));
    }
    Ok((builder.build()?, timer))
}

pub fn hold(
    cfg: StepperCfg,
    start: f64,
    direction: Direction,
    hold_ms: u64,
    realtime: bool,
    json_out: bool,
) -> CoreResult<()> {
    tracing::info!(start, ?direction, hold_ms, realtime, "hold");
    let report = if realtime {
        let (mut stepper, timer) = assemble(MonotonicClock::new(), cfg, !json_out)?;
        runner::hold_for(&mut stepper, &timer, start, direction, hold_ms)?
    } else {
        let (mut stepper, timer) = assemble(ManualClock::new(), cfg, false)?;
        runner::hold_for(&mut stepper, &timer, start, direction, hold_ms)?
    };
    print_report(&report, json_out, !realtime);
    Ok(())
}

pub fn click(
    cfg: StepperCfg,
    start: f64,
    direction: Direction,
    count: usize,
    json_out: bool,
) -> CoreResult<()> {
    tracing::info!(start, ?direction, count, "click");
    let (mut stepper, timer) = assemble(ManualClock::new(), cfg, false)?;
    let report = runner::clicks(&mut stepper, &timer, start, direction, count, CLICK_GAP_MS)?;
    print_report(&report, json_out, true);
    Ok(())
}

pub fn set(cfg: StepperCfg, value: f64, json_out: bool) -> CoreResult<()> {
    let (mut stepper, _timer) = assemble(ManualClock::new(), cfg, false)?;
    let normalized = stepper.set_direct(value);
    if json_out {
        println!("{}", json!({ "raw": value, "value": normalized }));
    } else {
        match normalized {
            Some(v) => println!("value: {v}"),
            None => println!("value: unchanged (not a number)"),
        }
    }
    Ok(())
}

pub fn replay_script(cfg: StepperCfg, script: &Path, start: f64, json_out: bool) -> CoreResult<()> {
    let text = std::fs::read_to_string(script).map_err(|e| {
        eyre::Report::new(StepperError::Io(format!("read script {script:?}: {e}")))
    })?;
    let events: Vec<Interaction> = stepper_config::parse_script(&text)
        .map_err(|e| eyre::Report::new(StepperError::Script(e.to_string())))?
        .iter()
        .map(Interaction::from)
        .collect();
    tracing::info!(script = %script.display(), events = events.len(), "replay");

    let (mut stepper, timer) = assemble(ManualClock::new(), cfg, false)?;
    let report = stepper_core::replay(&mut stepper, &timer, start, &events)?;
    print_report(&report, json_out, true);
    Ok(())
}

pub fn curve(cfg: &StepperCfg, samples: u32, json_out: bool) -> CoreResult<()> {
    cfg.validate().map_err(eyre::Report::new)?;
    let table = runner::ramp_table(cfg, samples);
    if json_out {
        let rows: Vec<_> = table
            .iter()
            .map(|(ms, d)| json!({ "elapsed_ms": ms, "delta": d }))
            .collect();
        println!("{}", serde_json::Value::Array(rows));
    } else {
        println!("{:>10}  {:>10}", "elapsed_ms", "delta");
        for (ms, d) in table {
            println!("{ms:>10}  {d:>10.4}");
        }
    }
    Ok(())
}

fn print_report(report: &ReplayReport, json_out: bool, with_changes: bool) {
    if json_out {
        let changes: Vec<_> = report
            .changes
            .iter()
            .map(|c| json!({ "at_ms": c.at_ms, "value": c.value, "cause": c.cause.name() }))
            .collect();
        let obj = json!({
            "final_value": report.final_value,
            "ticks": report.ticks,
            "clicks": report.clicks,
            "stale_ticks": report.stale_ticks,
            "elapsed_ms": report.elapsed_ms,
            "changes": changes,
        });
        println!("{obj}");
        return;
    }

    if with_changes {
        for c in &report.changes {
            println!("{:>8} ms  {:<6}  {}", c.at_ms, c.cause.name(), c.value);
        }
    }
    println!(
        "ticks: {}  clicks: {}  elapsed: {} ms",
        report.ticks, report.clicks, report.elapsed_ms
    );
    println!("final: {}", report.final_value);
}
