//! Swing a pendulum with a tabulated forcing signal and print the result.
//!
//! The forcing `F(t) = sin(t) + cos(2t)` is sampled on the output grid, stored
//! in a [`SignalTable`], and read back by the model at whatever times the
//! adaptive solver chooses.
//!
//! # Usage
//!
//! ```text
//! cargo run --example forced_pendulum
//! cargo run --example forced_pendulum -- 20
//! cargo run --example forced_pendulum -- 20 4000
//! ```
//!
//! The optional arguments are the end time in seconds (default 5) and the
//! number of output samples (default 1000). Output is CSV on stdout with
//! columns `time,force,angle,angular_velocity`.

use std::error::Error;

use swing_components::{
    pendulum::{ForcedPendulum, ModelParameters},
    signal::SignalTable,
};
use swing_solvers::transient::dopri5::{self, Config};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let end: f64 = args.next().as_deref().map(str::parse).transpose()?.unwrap_or(5.0);
    let samples: u32 = args.next().as_deref().map(str::parse).transpose()?.unwrap_or(1000);
    if samples < 2 || end <= 0.0 {
        eprintln!("Usage: forced_pendulum [end_time > 0] [samples >= 2]");
        std::process::exit(1);
    }

    let step = end / f64::from(samples - 1);
    let times: Vec<f64> = (0..samples).map(|i| f64::from(i) * step).collect();

    let table = SignalTable::sample(times.clone(), |t| t.sin() + (2.0 * t).cos())?;
    let parameters = ModelParameters::si(9.81, 1.0, 5.0)?;
    let pendulum = ForcedPendulum::new(parameters, &table);

    let trajectory = dopri5::solve_unobserved(&pendulum, [0.0, 0.0], &times, &Config::default())?;

    println!("time,force,angle,angular_velocity");
    for (time, [angle, velocity]) in trajectory.iter() {
        println!("{time},{},{angle},{velocity}", table.lookup(time));
    }

    let stats = trajectory.stats();
    eprintln!(
        "{} steps ({} rejected), {} evaluations",
        stats.accepted, stats.rejected, stats.evaluations
    );

    Ok(())
}
