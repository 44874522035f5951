use std::sync::Arc;

use sensor_limit::prelude::*;

#[cfg(target_os = "linux")]
fn provider() -> Arc<dyn HardwareProvider> {
    Arc::new(sensor_limit::provider::hwmon::HwmonProvider::new())
}

#[cfg(not(target_os = "linux"))]
fn provider() -> Arc<dyn HardwareProvider> {
    use sensor_limit::provider::sim::{SimHardware, SimProvider, SimSensor};

    let provider = SimProvider::new();
    let cpu = SimHardware::new("/cpu/0");
    cpu.add_sensor(SimSensor::with_value("/cpu/0/temperature/0", 52.5));
    cpu.add_sensor(SimSensor::with_value("/cpu/0/load/0", 31.0));
    let board = SimHardware::new("/mainboard/0");
    let superio = SimHardware::new("/mainboard/0/superio/0");
    superio.add_sensor(SimSensor::with_value("/mainboard/0/superio/0/fan/0", 880.0));
    board.add_sub_hardware(superio);
    provider.add_hardware(cpu);
    provider.add_hardware(board);
    provider
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().compact().init();

    println!("Sensor Limit - Sensor Inventory");
    println!();

    let session = HardwareSession::open(provider())?;
    refresh_all(session.provider()?.as_ref());
    let index = SensorIndex::scan(session.provider()?.as_ref())?;

    println!("Hardware nodes hosting sensors:");
    for hardware in index.hardware() {
        println!("  {}", hardware.identifier());
    }
    println!();

    println!("Sensors ({}):", index.len());
    for entry in index.sensors() {
        match entry.sensor().value() {
            Some(value) => println!("  {:<48} {:>10.2}", entry.identifier(), value),
            None => println!("  {:<48} {:>10}", entry.identifier(), "n/a"),
        }
    }

    Ok(())
}
