use std::error::Error;
use std::time::Duration;

use sensor_limit::event::ManualResetEvent;
use sensor_limit::LimitConfig;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().compact().init();

    let fragment = std::env::args().nth(1).unwrap_or_else(|| "CpuCool".to_string());
    let name = LimitConfig::full_event_name(&fragment);

    println!("Sensor Limit - Event Observer");
    println!("Watching '{}'; press Ctrl+C to exit", name);
    println!();

    let event = match ManualResetEvent::open(&name) {
        Ok(event) => event,
        Err(err) => {
            eprintln!("Could not open the event ({err}).");
            eprintln!("Start the limit_watch example first, or pass an event name fragment.");
            return Err(err.into());
        },
    };

    let mut last = event.is_set()?;
    println!("Initial state: {}", if last { "SIGNALED" } else { "clear" });

    loop {
        let state = event.wait_timeout(Duration::from_millis(500))?;
        if state != last {
            println!("{} -> {}", name, if state { "SIGNALED" } else { "clear" });
            last = state;
        }
    }
}
