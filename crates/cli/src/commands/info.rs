//! `info` command implementation.

use anyhow::{Context, Result};
use config_loader::keys;
use contracts::{Configuration, UnitConstants, IMU_SUBSYSTEM};
use serde::Serialize;
use time_sync::StepClock;
use tracing::info;

use super::{load_configuration, source_name};
use crate::cli::InfoArgs;

/// Resolved settings for JSON output
#[derive(Debug, Serialize)]
pub(crate) struct ConfigInfo {
    source: String,
    subsystems: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    imu: Option<ImuInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImuInfo {
    frequency_hz: f64,
    dt: f64,
    latitude_deg: f64,
    longitude_deg: f64,
    altitude_m: f64,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let source = source_name(args.config.as_deref());
    info!(config = %source, "Loading configuration info");

    let configuration = load_configuration(args.config.as_deref())?;
    let info = build_config_info(&configuration, source)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&info);
    }

    Ok(())
}

pub(crate) fn build_config_info(configuration: &Configuration, source: String) -> Result<ConfigInfo> {
    let subsystems = config_loader::subsystem_names(configuration)?
        .into_iter()
        .map(str::to_string)
        .collect();

    let imu = configuration.subsystem(IMU_SUBSYSTEM).map(|block| {
        let clock = StepClock::from_configuration(&block);
        let units = UnitConstants::default();
        let position = navigation::initial_position(&block, &units);
        ImuInfo {
            frequency_hz: clock.frequency_hz(),
            dt: clock.dt(),
            latitude_deg: units.to_degrees(position.latitude),
            longitude_deg: units.to_degrees(position.longitude),
            altitude_m: position.altitude,
        }
    });

    let settings = configuration.settings();
    Ok(ConfigInfo {
        source,
        subsystems,
        imu,
        input: settings.word(keys::SENSORS_IN).map(str::to_string),
        output: settings.word(keys::OUT).map(str::to_string),
    })
}

pub(crate) fn print_config_info(info: &ConfigInfo) {
    println!("\n=== Configuration: {} ===\n", info.source);
    println!("  Subsystems: {}", info.subsystems.join(", "));

    match &info.imu {
        Some(imu) => {
            println!("\n  Inertial subsystem");
            println!("    Frequency: {} Hz (dt = {} s)", imu.frequency_hz, imu.dt);
            println!(
                "    Initial position: lat {:.10} deg, lon {:.10} deg, alt {:.3} m",
                imu.latitude_deg, imu.longitude_deg, imu.altitude_m
            );
        }
        None => println!("\n  Inertial subsystem: not configured (every plugin is a no-op)"),
    }

    println!("\n  Input:  {}", info.input.as_deref().unwrap_or("<not set>"));
    println!("  Output: {}", info.output.as_deref().unwrap_or("<not set>"));
    println!();
}
