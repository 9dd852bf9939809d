use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use monitor::{Mode, Monitor, Tick};

mod board;
mod sensor;
mod terminal;

use board::SitlBoard;
use sensor::Scenario;

/// Host run of the IMU attitude monitor against a simulated sensor
#[derive(Parser, Debug)]
#[command(name = "sitl")]
#[command(version)]
struct Args {
    /// How the simulated sensor behaves
    #[arg(long, value_enum, default_value = "healthy")]
    scenario: Scenario,

    /// Loop iterations after start-up
    #[arg(long, default_value_t = 500)]
    cycles: u32,

    /// Loop period in milliseconds
    #[arg(long, default_value_t = 10)]
    dt_ms: u64,

    /// Seed for sensor noise and dropouts
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Samples served before a `dead-after` sensor goes quiet
    #[arg(long, default_value_t = 200)]
    fail_after: u32,

    /// Sleep through every pause and loop period, redrawing the panel
    #[arg(long)]
    realtime: bool,
}

enum State {
    Starting,
    Running,
    Stopping,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    log::debug!("{:?}", args);

    let period = Duration::from_millis(args.dt_ms);
    let board = SitlBoard::new(
        args.scenario,
        args.seed,
        args.fail_after,
        period.as_secs_f32(),
        args.realtime,
    );
    let mut monitor = Monitor::new(board);

    let mut state = State::Starting;
    let mut cycle = 0;
    let mut fused = 0u32;
    let mut last_update_time = Instant::now();
    loop {
        match state {
            State::Starting => {
                let startup = monitor.start().context("monitor start-up failed")?;
                log::info!(
                    "Probe found sensor: {}, init: {:?}, calibration: {:?}",
                    startup.probe.found,
                    startup.init,
                    startup.calibration.map(|c| c.source)
                );
                last_update_time = Instant::now();
                state = State::Running;
            }
            State::Running => {
                if cycle >= args.cycles {
                    state = State::Stopping;
                    continue;
                }

                let dt = if args.realtime {
                    let elapsed = last_update_time.elapsed();
                    if elapsed < period {
                        thread::sleep(period - elapsed);
                    }
                    let now = Instant::now();
                    let dt = now.duration_since(last_update_time);
                    last_update_time = now;
                    dt.as_secs_f32()
                } else {
                    period.as_secs_f32()
                };

                match monitor.tick(dt) {
                    Tick::Live(outcome) => {
                        log::trace!("cycle {}: {:?}", cycle, outcome);
                        if matches!(outcome, driver::UpdateOutcome::Fused(_)) {
                            fused += 1;
                        }
                    }
                    Tick::Simulated(frame) => log::trace!("cycle {}: {:?}", cycle, frame),
                    Tick::NotStarted => {
                        anyhow::bail!("loop ran before start-up");
                    }
                }
                if args.realtime {
                    println!("\x1b[2J\x1b[H{}", monitor.display().frame());
                }
                cycle += 1;
            }
            State::Stopping => {
                let link = monitor.driver().link();
                let attitude = monitor.handle().attitude;
                println!("{}", monitor.display().frame());
                match monitor.mode() {
                    Mode::Live => println!(
                        "{} cycles, {} fused; link ok: {}, errors: {}, simulated: {}; attitude pitch {:.1} roll {:.1} yaw {:.1}",
                        cycle,
                        fused,
                        link.communication_ok(),
                        link.error_count(),
                        link.force_simulation(),
                        attitude.pitch,
                        attitude.roll,
                        attitude.yaw
                    ),
                    Mode::Simulation => println!("{} simulated frames", cycle),
                    Mode::Idle => {}
                }
                break;
            }
        }
    }
    Ok(())
}
