#![cfg(feature = "sim")]

mod common;

use std::fs;

use common::{cpu_temp_config, unique_fragment, SimRig};
use sensor_limit::event::ManualResetEvent;
use sensor_limit::prelude::*;
use sensor_limit::provider::sim::SimSensor;

#[test]
fn test_threshold_crossing_cycle() {
    let rig = SimRig::new();
    let fragment = unique_fragment("Crossing");
    let registry =
        LimitRegistry::new(rig.provider.as_ref(), [cpu_temp_config(&fragment, Some(60.0))])
            .unwrap();
    let limit = registry.get(&fragment).unwrap();

    assert!(!limit.is_signaled().unwrap(), "fresh event must start unasserted");

    rig.cpu_temp.set_value(50.0);
    registry.update_all().unwrap();
    assert!(limit.is_signaled().unwrap(), "50 < 60 asserts");

    rig.cpu_temp.set_value(70.0);
    registry.update_all().unwrap();
    assert!(!limit.is_signaled().unwrap(), "70 >= 60 de-asserts");

    rig.cpu_temp.set_value(60.0);
    registry.update_all().unwrap();
    assert!(!limit.is_signaled().unwrap(), "equality counts as not below");
}

#[test]
fn test_null_limit_never_asserts() {
    let rig = SimRig::new();
    let fragment = unique_fragment("NullLimit");
    let registry =
        LimitRegistry::new(rig.provider.as_ref(), [cpu_temp_config(&fragment, None)]).unwrap();

    rig.cpu_temp.set_value(-40.0);
    registry.update_all().unwrap();
    assert!(!registry.get(&fragment).unwrap().is_signaled().unwrap());
}

#[cfg(unix)]
fn seed_leftover_state_file(fragment: &str) {
    let shm = std::path::Path::new("/dev/shm");
    let dir = if shm.is_dir() { shm.to_path_buf() } else { std::env::temp_dir() };
    fs::write(dir.join(format!("SensorLimit.{fragment}")), b"1").unwrap();
}

#[cfg(unix)]
#[test]
fn test_null_limit_stays_clear_over_leftover_state() {
    let rig = SimRig::new();
    let fragment = unique_fragment("Leftover");
    seed_leftover_state_file(&fragment);

    let registry =
        LimitRegistry::new(rig.provider.as_ref(), [cpu_temp_config(&fragment, None)]).unwrap();
    let limit = registry.get(&fragment).unwrap();
    assert!(!limit.is_signaled().unwrap(), "binding must not inherit leftover state");

    rig.cpu_temp.set_value(-10.0);
    registry.update_all().unwrap();
    registry.update_all().unwrap();
    assert!(!limit.is_signaled().unwrap());
}

#[cfg(unix)]
#[test]
fn test_leftover_state_not_visible_before_first_update() {
    let rig = SimRig::new();
    rig.cpu_temp.clear_value();
    let fragment = unique_fragment("LeftoverQuiet");
    seed_leftover_state_file(&fragment);

    let registry =
        LimitRegistry::new(rig.provider.as_ref(), [cpu_temp_config(&fragment, Some(60.0))])
            .unwrap();
    registry.update_all().unwrap();
    assert!(
        !registry.get(&fragment).unwrap().is_signaled().unwrap(),
        "a sensor with no reading leaves the fresh state in place"
    );
}

#[test]
fn test_absent_value_preserves_asserted_state() {
    let rig = SimRig::new();
    let fragment = unique_fragment("Quiet");
    let registry =
        LimitRegistry::new(rig.provider.as_ref(), [cpu_temp_config(&fragment, Some(60.0))])
            .unwrap();

    rig.cpu_temp.set_value(50.0);
    registry.update_all().unwrap();
    assert!(registry.get(&fragment).unwrap().is_signaled().unwrap());

    rig.cpu_temp.clear_value();
    registry.update_all().unwrap();
    assert!(
        registry.get(&fragment).unwrap().is_signaled().unwrap(),
        "a sensor with no reading leaves its event untouched"
    );
}

#[test]
fn test_duplicate_event_name_fails_without_leaking_events() {
    let rig = SimRig::new();
    let first = unique_fragment("DupFirst");
    let dup = unique_fragment("DupAgain");
    let configs = vec![
        cpu_temp_config(&first, Some(60.0)),
        LimitConfig::new("/gpu/0/temperature/0", &dup, Some(70.0)).unwrap(),
        LimitConfig::new("/gpu/0/temperature/0", &dup, Some(75.0)).unwrap(),
    ];

    let err = LimitRegistry::new(rig.provider.as_ref(), configs).unwrap_err();
    assert!(matches!(err, Error::DuplicateEventName(name) if name == dup));

    for fragment in [&first, &dup] {
        assert!(
            !ManualResetEvent::exists(&LimitConfig::full_event_name(fragment)),
            "no event may survive a failed construction: {fragment}"
        );
    }
}

#[test]
fn test_unknown_sensor_fails_without_leaking_events() {
    let rig = SimRig::new();
    let good = unique_fragment("KnownSensor");
    let bad = unique_fragment("GhostSensor");
    let configs = vec![
        cpu_temp_config(&good, Some(60.0)),
        LimitConfig::new("/psu/3/voltage/7", &bad, Some(11.0)).unwrap(),
    ];

    let err = LimitRegistry::new(rig.provider.as_ref(), configs).unwrap_err();
    match err {
        Error::SensorNotFound { sensor, eventname } => {
            assert_eq!(sensor, "/psu/3/voltage/7");
            assert_eq!(eventname, bad);
        },
        other => panic!("expected SensorNotFound, got {other:?}"),
    }
    assert!(!ManualResetEvent::exists(&LimitConfig::full_event_name(&good)));
}

#[test]
fn test_update_cycle_refreshes_each_hardware_once() {
    let rig = SimRig::new();
    let cpu_load = SimSensor::with_value("/cpu/0/load/0", 25.0);
    rig.cpu.add_sensor(cpu_load);

    let configs = vec![
        cpu_temp_config(&unique_fragment("PhaseTemp"), Some(60.0)),
        LimitConfig::new("/cpu/0/load/0", unique_fragment("PhaseLoad"), Some(90.0)).unwrap(),
        LimitConfig::new("/gpu/0/temperature/0", unique_fragment("PhaseGpu"), Some(80.0)).unwrap(),
    ];
    let registry = LimitRegistry::new(rig.provider.as_ref(), configs).unwrap();
    assert_eq!(registry.hardware().len(), 2);

    registry.update_all().unwrap();
    assert_eq!(rig.cpu.refresh_count(), 1, "two limits on one node share a refresh");
    assert_eq!(rig.gpu.refresh_count(), 1);

    registry.update_all().unwrap();
    assert_eq!(rig.cpu.refresh_count(), 2);
    assert_eq!(rig.gpu.refresh_count(), 2);
}

#[test]
fn test_dispose_releases_every_event_and_blocks_updates() {
    let rig = SimRig::new();
    let cpu_fragment = unique_fragment("DisposeCpu");
    let gpu_fragment = unique_fragment("DisposeGpu");
    let configs = vec![
        cpu_temp_config(&cpu_fragment, Some(60.0)),
        LimitConfig::new("/gpu/0/temperature/0", &gpu_fragment, Some(80.0)).unwrap(),
    ];
    let mut registry = LimitRegistry::new(rig.provider.as_ref(), configs).unwrap();
    registry.update_all().unwrap();

    registry.dispose();
    assert!(registry.is_disposed());
    assert!(registry.is_empty());
    for fragment in [&cpu_fragment, &gpu_fragment] {
        assert!(!ManualResetEvent::exists(&LimitConfig::full_event_name(fragment)));
    }

    assert!(matches!(registry.update_all(), Err(Error::Disposed(_))));

    // A second dispose must change nothing.
    registry.dispose();
    assert!(matches!(registry.update_all(), Err(Error::Disposed(_))));
}

#[test]
fn test_empty_configuration_list() {
    let rig = SimRig::new();
    let registry = LimitRegistry::new(rig.provider.as_ref(), Vec::new()).unwrap();
    assert!(registry.is_empty());
    registry.update_all().unwrap();
    assert_eq!(rig.cpu.refresh_count(), 0, "no configured sensor, nothing to refresh");
}

#[test]
fn test_configuration_file_drives_registry() {
    let rig = SimRig::new();
    let cpu_fragment = unique_fragment("FileCpu");
    let gpu_fragment = unique_fragment("FileGpu");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("limits.json");
    fs::write(
        &path,
        format!(
            r#"[
                {{"sensor": "/cpu/0/temperature/0", "eventname": "{cpu_fragment}", "limit": 60}},
                {{"sensor": "/gpu/0/temperature/0", "eventname": "{gpu_fragment}", "limit": null}}
            ]"#
        ),
    )
    .unwrap();

    let configs = LimitConfig::load(&path).unwrap();
    let registry = LimitRegistry::new(rig.provider.as_ref(), configs).unwrap();

    rig.cpu_temp.set_value(50.0);
    rig.gpu_temp.set_value(10.0);
    registry.update_all().unwrap();

    assert!(registry.get(&cpu_fragment).unwrap().is_signaled().unwrap());
    assert!(
        !registry.get(&gpu_fragment).unwrap().is_signaled().unwrap(),
        "null limit never asserts, however low the value"
    );
}

#[test]
fn test_external_observer_follows_registry() {
    let rig = SimRig::new();
    let fragment = unique_fragment("External");
    let registry =
        LimitRegistry::new(rig.provider.as_ref(), [cpu_temp_config(&fragment, Some(60.0))])
            .unwrap();

    let observer = ManualResetEvent::open(&LimitConfig::full_event_name(&fragment)).unwrap();
    assert!(!observer.is_set().unwrap());

    rig.cpu_temp.set_value(50.0);
    registry.update_all().unwrap();
    assert!(observer.is_set().unwrap());

    rig.cpu_temp.set_value(65.0);
    registry.update_all().unwrap();
    assert!(!observer.is_set().unwrap());
}
