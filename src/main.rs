use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use reentry_simulation::*;

#[derive(Parser)]
#[command(name = "reentry")]
#[command(about = "Vertical ballistic descent and time-of-flight inversion")]
struct Cli {
    /// TOML scenario file; built-in Earth defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate a descent to impact and to the atmosphere boundary
    Descend {
        /// Release altitude (m)
        #[arg(long, default_value_t = 2_155_000.0)]
        altitude: f64,

        /// Initial radial velocity (m/s, negative is down)
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        velocity: f64,

        #[arg(long, value_enum, default_value_t = ModelArg::Gravity)]
        model: ModelArg,

        /// Body mass (kg), used by drag models
        #[arg(long, default_value_t = 1_000.0)]
        mass: f64,

        /// Body reference radius (m), used by drag models
        #[arg(long, default_value_t = 0.5)]
        radius: f64,

        /// Ballistic coefficient (kg/m²), used by drag models
        #[arg(long, default_value_t = 2_000.0)]
        ballistic_coefficient: f64,

        /// Print sampled telemetry
        #[arg(long)]
        telemetry: bool,
    },

    /// Release altitude whose free fall lasts the given time
    Invert {
        /// Time of flight (s)
        #[arg(long, default_value_t = 15.0 * 60.0)]
        target_time: f64,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelArg {
    Gravity,
    Boundary,
    Drag,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };

    match cli.command {
        Commands::Descend {
            altitude,
            velocity,
            model,
            mass,
            radius,
            ballistic_coefficient,
            telemetry,
        } => {
            let model = match model {
                ModelArg::Gravity => AccelerationModel::GravityOnly,
                ModelArg::Boundary => AccelerationModel::BoundarySwitched(BallisticBody::new(
                    mass,
                    radius,
                    ballistic_coefficient,
                )?),
                ModelArg::Drag => AccelerationModel::GravityWithDrag(BallisticBody::new(
                    mass,
                    radius,
                    ballistic_coefficient,
                )?),
            };
            let simulator = config.simulator(model)?;

            println!(
                "Altitude: {} ({})",
                Telemetry::format_altitude(altitude),
                model.name()
            );

            let reentry = simulator.time_to_boundary(altitude, velocity)?;
            println!(
                "Reentry: {} at {:.2} m/s",
                Telemetry::format_time(reentry.elapsed_time),
                reentry.terminal_velocity
            );

            let impact = simulator.impact(altitude, velocity)?;
            println!(
                "Impact: {} at {:.2} m/s after {} steps (final altitude {:.3} m)",
                Telemetry::format_time(impact.elapsed_time),
                impact.terminal_velocity,
                impact.steps,
                impact.final_altitude
            );

            if telemetry {
                println!("\n{}", impact.telemetry.summary());
            }
        }

        Commands::Invert { target_time } => {
            let altitude = config.inversion()?.solve(target_time)?;
            println!(
                "Target Time: {} | Required altitude: {}",
                Telemetry::format_time(target_time),
                Telemetry::format_altitude(altitude)
            );
        }

        Commands::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
