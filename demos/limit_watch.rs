use std::time::Duration;

use sensor_limit::prelude::*;
use sensor_limit::poll;
use sensor_limit::provider::sim::{SimHardware, SimProvider, SimSensor};

/// Print one status line per configured limit.
fn print_status(registry: &LimitRegistry) {
    for limit in registry.limits() {
        let state = match limit.is_signaled() {
            Ok(true) => "SIGNALED",
            Ok(false) => "clear",
            Err(_) => "disposed",
        };
        println!("  {:<32} {}", limit.event_name(), state);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .init();

    println!("Sensor Limit - Limit Watch (simulated sensor)");
    println!("Press Ctrl+C to exit");
    println!();

    let provider = SimProvider::new();
    let cpu = SimHardware::new("/cpu/0");
    let temp = SimSensor::with_value("/cpu/0/temperature/0", 65.0);
    cpu.add_sensor(temp.clone());
    provider.add_hardware(cpu);

    let session = HardwareSession::open(provider)?;
    let configs = vec![LimitConfig::new("/cpu/0/temperature/0", "CpuCool", Some(50.0))?];
    let registry = LimitRegistry::new(session.provider()?.as_ref(), configs)?;

    println!("Watching {} limit(s); other processes can open the event by name.", registry.len());
    println!();

    // Sweep the simulated temperature so the event keeps crossing the limit.
    let sweep = async {
        let mut tick: u64 = 0;
        loop {
            let value = 60.0 + 25.0 * (tick as f64 / 4.0).sin();
            temp.set_value(value);
            tick += 1;
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    };

    let status = async {
        loop {
            tokio::time::sleep(Duration::from_secs(2)).await;
            print_status(&registry);
            println!();
        }
    };

    tokio::select! {
        result = poll::run(&registry, Duration::from_millis(250)) => {
            result?;
        }
        _ = sweep => {}
        _ = status => {}
        _ = tokio::signal::ctrl_c() => {
            println!("Shutting down");
        }
    }

    Ok(())
}
