use std::sync::Arc;

use sensor_limit::provider::sim::{SimHardware, SimProvider, SimSensor};
use sensor_limit::LimitConfig;

/// A small two-device tree with handles to everything a scenario may want
/// to script or assert on.
pub struct SimRig {
    pub provider: Arc<SimProvider>,
    pub cpu: Arc<SimHardware>,
    pub cpu_temp: Arc<SimSensor>,
    pub gpu: Arc<SimHardware>,
    pub gpu_temp: Arc<SimSensor>,
}

impl SimRig {
    pub fn new() -> Self {
        let provider = SimProvider::new();

        let cpu = SimHardware::new("/cpu/0");
        let cpu_temp = SimSensor::with_value("/cpu/0/temperature/0", 45.0);
        cpu.add_sensor(cpu_temp.clone());

        let gpu = SimHardware::new("/gpu/0");
        let gpu_temp = SimSensor::with_value("/gpu/0/temperature/0", 60.0);
        gpu.add_sensor(gpu_temp.clone());

        provider.add_hardware(cpu.clone());
        provider.add_hardware(gpu.clone());

        Self { provider, cpu, cpu_temp, gpu, gpu_temp }
    }
}

/// Event name fragments must not collide across concurrently running tests
/// or with leftovers of earlier crashed runs.
pub fn unique_fragment(tag: &str) -> String {
    format!("{}It{}", tag, std::process::id())
}

pub fn cpu_temp_config(fragment: &str, limit: Option<f64>) -> LimitConfig {
    LimitConfig::new("/cpu/0/temperature/0", fragment, limit).expect("valid test config")
}
