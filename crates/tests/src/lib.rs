//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - The sample pipeline over real files (time sync, ingest, output, progress)
//! - Lifecycle guarantees (one terminate invocation per plugin, stop at first request)
//! - Sensor freshness and unit conversion as seen by downstream plugins

#[cfg(test)]
mod fixtures {
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use contracts::{Bus, Configuration, FnPlugin, Mode};
    use tempfile::TempDir;

    pub struct Workspace {
        pub dir: TempDir,
    }

    impl Workspace {
        pub fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
            }
        }

        pub fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        /// Write a sensor file with a header line
        pub fn input(&self, records: &[&str]) -> PathBuf {
            let path = self.path("imu.txt");
            let mut file = fs::File::create(&path).unwrap();
            writeln!(file, "w_x w_y w_z f_x f_y f_z").unwrap();
            for record in records {
                writeln!(file, "{record}").unwrap();
            }
            path
        }

        /// Configuration naming the workspace input and output files
        pub fn configuration(&self, freq: u32) -> Configuration {
            Configuration::new(&format!(
                "{{imu: freq = {freq}}}, sensors_in = {} out = {}",
                display(&self.path("imu.txt")),
                display(&self.path("ins.nav"))
            ))
        }

        pub fn output_lines(&self) -> Vec<String> {
            fs::read_to_string(self.path("ins.nav"))
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn display(path: &Path) -> String {
        path.display().to_string()
    }

    /// What a probe saw during one Run invocation
    #[derive(Debug, Clone, PartialEq)]
    pub struct Observation {
        pub tick: u64,
        pub time: f64,
        pub angular_rate: Option<[f64; 3]>,
        pub specific_force: Option<[f64; 3]>,
    }

    pub type Observations = Arc<Mutex<Vec<Observation>>>;

    /// Plugin recording what the bus looks like at its position in the list
    pub fn probe(name: &str) -> (FnPlugin<impl FnMut(&mut Bus) + Send>, Observations) {
        let seen: Observations = Arc::default();
        let sink = Arc::clone(&seen);
        let plugin = contracts::plugin_fn(name, move |bus: &mut Bus| {
            if bus.mode() != Mode::Run {
                return;
            }
            let imu = bus.imu();
            sink.lock().unwrap().push(Observation {
                tick: bus.tick(),
                time: bus.time(),
                angular_rate: imu.and_then(|imu| imu.angular_rate()).map(|v| [v.x, v.y, v.z]),
                specific_force: imu
                    .and_then(|imu| imu.specific_force())
                    .map(|v| [v.x, v.y, v.z]),
            });
        });
        (plugin, seen)
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::f64::consts::PI;

    use contracts::Termination;
    use dispatcher::{parse_record, OutputWriter, ProgressReporter, HEADER};
    use executor::{Executor, StopCondition};
    use ingestion::SensorIngest;
    use navigation::InitialSolution;
    use time_sync::TimeSync;

    use crate::fixtures::{probe, Workspace};

    /// End-to-end: three records at 400 Hz
    #[test]
    fn test_sample_pipeline_three_records() {
        let ws = Workspace::new();
        ws.input(&[
            "0.1 0.2 0.3 0.01 0.02 9.81",
            "0.1 0.2 0.3 0.01 0.02 9.81",
            "0.1 0.2 0.3 0.01 0.02 9.81",
        ]);
        let (probe, seen) = probe("probe");

        let mut executor = Executor::new();
        assert!(executor.register(TimeSync::new()));
        assert!(executor.register(SensorIngest::new()));
        assert!(executor.register(InitialSolution::new()));
        assert!(executor.register(probe));
        assert!(executor.register(OutputWriter::new()));
        assert!(executor.register(ProgressReporter::with_writer(std::io::sink())));

        assert!(executor.initialize(ws.configuration(400)));
        let report = executor.run_to_completion();

        assert_eq!(report.ticks, 3);
        assert_eq!(
            report.termination,
            Some(Termination::end_of_input("sensor_ingest"))
        );
        assert!(report.is_success());

        let times: Vec<f64> = seen.lock().unwrap().iter().map(|o| o.time).collect();
        assert_eq!(times.len(), 3);
        for (time, expected) in times.iter().zip([0.0025, 0.005, 0.0075]) {
            assert!((time - expected).abs() < 1e-12, "{time} != {expected}");
        }

        let lines = ws.output_lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], HEADER);
        let written: Vec<f64> = lines[1..]
            .iter()
            .map(|line| parse_record(line).unwrap()[0])
            .collect();
        assert_eq!(written, vec![0.0025, 0.005, 0.0075]);
    }

    #[test]
    fn test_missing_input_terminates_every_plugin_once() {
        let ws = Workspace::new();
        let mut executor = Executor::new();
        executor.register(TimeSync::new());
        executor.register(SensorIngest::new());
        executor.register(OutputWriter::new());
        executor.register(ProgressReporter::with_writer(std::io::sink()));

        assert!(!executor.initialize(ws.configuration(400)));
        assert!(executor.is_finished());
        assert!(!executor.tick());

        let report = executor.report();
        assert!(!report.is_success());
        assert_eq!(report.termination.as_ref().unwrap().plugin(), "sensor_ingest");
        for plugin in &report.plugins {
            assert_eq!(plugin.terminate_calls, 1, "{}", plugin.name);
            assert_eq!(plugin.run_calls, 0, "{}", plugin.name);
        }
        // plugins after the failing one never saw Init
        assert_eq!(report.plugins[2].init_calls, 0);
        assert!(!ws.path("ins.nav").exists());
    }

    #[test]
    fn test_malformed_record_tolerated() {
        let ws = Workspace::new();
        ws.input(&["1 2 3 4 5 6", "1 2 3 oops", "1 2 3 4 5 6"]);
        let ingest = SensorIngest::new();
        let metrics = ingest.metrics();
        let (probe, seen) = probe("probe");

        let mut executor = Executor::new();
        executor.register(TimeSync::new());
        executor.register(ingest);
        executor.register(probe);
        executor.register(OutputWriter::new());

        assert!(executor.initialize(ws.configuration(100)));
        let report = executor.run_to_completion();

        assert_eq!(report.ticks, 3);
        assert!(report.is_success());
        let fresh: Vec<bool> = seen
            .lock()
            .unwrap()
            .iter()
            .map(|o| o.angular_rate.is_some() && o.specific_force.is_some())
            .collect();
        assert_eq!(fresh, vec![true, false, true]);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.records_valid, 2);
        assert_eq!(snapshot.records_malformed, 1);
        // one output line per tick, fresh data or not
        assert_eq!(ws.output_lines().len(), 4);
    }

    #[test]
    fn test_unit_conversion_and_freshness() {
        let ws = Workspace::new();
        ws.input(&["180 -90 45 0.5 -0.5 9.8"]);
        let (before, seen_before) = probe("before_ingest");
        let (after, seen_after) = probe("after_ingest");

        let mut executor = Executor::new();
        executor.register(TimeSync::new());
        executor.register(before);
        executor.register(SensorIngest::new());
        executor.register(after);
        executor.register(OutputWriter::new());

        assert!(executor.initialize(ws.configuration(400)));
        executor.run_to_completion();

        let before = seen_before.lock().unwrap();
        assert_eq!(before.len(), 2);
        assert!(before.iter().all(|o| o.angular_rate.is_none()));

        // the end-of-input tick stops before the second probe
        let after = seen_after.lock().unwrap();
        assert_eq!(after.len(), 1);
        let [wx, wy, wz] = after[0].angular_rate.unwrap();
        assert!((wx - PI).abs() < 1e-12);
        assert!((wy + PI / 2.0).abs() < 1e-12);
        assert!((wz - PI / 4.0).abs() < 1e-12);
        assert_eq!(after[0].specific_force, Some([0.5, -0.5, 9.8]));
    }

    #[test]
    fn test_without_imu_every_plugin_is_noop() {
        let ws = Workspace::new();
        let configuration = contracts::Configuration::new(&format!(
            "sensors_in = {} out = {}",
            ws.path("absent.txt").display(),
            ws.path("ins.nav").display()
        ));

        let mut executor = Executor::new();
        executor.register(StopCondition::new().with_max_ticks(3));
        executor.register(TimeSync::new());
        executor.register(SensorIngest::new());
        executor.register(InitialSolution::new());
        executor.register(OutputWriter::new());

        assert!(executor.initialize(configuration));
        let report = executor.run_to_completion();

        assert_eq!(report.ticks, 3);
        assert_eq!(report.final_time, 0.0);
        assert!(matches!(report.termination, Some(Termination::Stopped { .. })));
        assert!(executor.bus().imu().is_none());
        assert!(!ws.path("ins.nav").exists());
    }

    #[test]
    fn test_initial_solution_reaches_output() {
        let ws = Workspace::new();
        ws.input(&["0 0 0 0 0 9.8"]);
        let configuration = contracts::Configuration::new(&format!(
            "{{imu: lat = 55.5, lon = -37.25, alt = 200, freq = 400}} sensors_in = {} out = {}",
            ws.path("imu.txt").display(),
            ws.path("ins.nav").display()
        ));

        let mut executor = Executor::new();
        executor.register(TimeSync::new());
        executor.register(SensorIngest::new());
        executor.register(InitialSolution::new());
        executor.register(OutputWriter::new());
        assert!(executor.initialize(configuration));
        executor.run_to_completion();

        let lines = ws.output_lines();
        let values = parse_record(&lines[1]).unwrap();
        assert!((values[1] + 37.25).abs() < 1e-8);
        assert!((values[2] - 55.5).abs() < 1e-8);
        assert_eq!(values[3], 200.0);
    }
}
