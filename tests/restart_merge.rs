mod common;

use std::path::Path;

use tempfile::tempdir;

use cactus_scalars::{ScalarsConfig, ScalarsDir, SimDir, TimeSeries};
use common::{init_logging, rows, write_gz, write_plain, PER_VARIABLE_HEADER};

const RHO_0: &[(f64, f64)] = &[(0.0, 1.0), (0.5, 0.99), (1.0, 0.98), (1.5, 0.97)];
const RHO_1: &[(f64, f64)] = &[(1.0, -1.0), (1.5, -1.0), (2.0, 0.96), (2.5, 0.95)];

fn group_body(samples: &[(f64, f64)]) -> String {
    let mut body = String::from(
        "# column format: 1:iteration 2:time 3:data\n# data columns: 3:gxx 4:gyy\n",
    );
    for (iteration, (time, value)) in samples.iter().enumerate() {
        body.push_str(&format!("{iteration} {time} {value} {}\n", value * 2.0));
    }
    body
}

fn build_tov(root: &Path) -> SimDir {
    init_logging();
    let out0 = root.join("output-0000/static_tov");
    let out1 = root.join("output-0001/static_tov");

    write_plain(
        &out0.join("hydrobase-rho.average.asc"),
        &format!("{PER_VARIABLE_HEADER}# data columns: 3:rho\n{}", rows(RHO_0)),
    );
    write_gz(
        &out1.join("hydrobase-rho.average.asc.gz"),
        &format!("{PER_VARIABLE_HEADER}# data columns: 3:rho\n{}", rows(RHO_1)),
    );
    write_plain(&out0.join("admbase-metric.average.asc"), &group_body(RHO_0));
    write_plain(&out1.join("admbase-metric.average.asc"), &group_body(RHO_1));
    write_plain(
        &out0.join("vel[0].maximum.asc"),
        &format!("{PER_VARIABLE_HEADER}{}", rows(&[(0.0, 0.0), (0.5, 0.1)])),
    );
    write_plain(&out1.join("vel[0].maximum.asc"), "# data columns: nope:vel[0]\n0 1.0 0.2\n");
    write_plain(&out0.join("checkpoint.h5"), "binary");
    write_plain(&out0.join("rho.bubu.asc"), "");

    SimDir::from_restart_dirs(root, [root.join("output-0000"), root.join("output-0001")])
        .expect("simdir")
}

#[test]
fn overlapping_restarts_merge_into_ascending_series() {
    let dir = tempdir().expect("tempdir");
    let sim = build_tov(dir.path());
    let scalars = ScalarsDir::new(&sim).expect("scalars dir");
    let average = scalars.average();

    assert_eq!(
        average.keys().collect::<Vec<_>>(),
        vec!["gxx", "gyy", "rho"]
    );
    assert_eq!(average.files("rho").len(), 2);

    let rho = average.load("rho").expect("rho");
    assert!(rho.is_strictly_increasing());
    assert!(rho.len() < RHO_0.len() + RHO_1.len());
    assert_eq!(rho.times(), &[0.0, 0.5, 1.0, 1.5, 2.0, 2.5]);
    // The earlier restart wins on shared timestamps.
    assert_eq!(rho.values(), &[1.0, 0.99, 0.98, 0.97, 0.96, 0.95]);

    let outcome = average.merge("rho").expect("merge");
    assert_eq!(outcome.duplicates, 2);
    assert_eq!(outcome.series, rho);

    let gyy = average.load("gyy").expect("gyy");
    assert_eq!(gyy.len(), 6);
    assert_eq!(gyy.values()[0], 2.0);
}

#[test]
fn corrupt_restart_file_only_degrades_its_variable() {
    let dir = tempdir().expect("tempdir");
    let sim = build_tov(dir.path());
    let scalars = ScalarsDir::new(&sim).expect("scalars dir");

    // Both restarts are indexed; the bad header only drops restart 1.
    let maximum = scalars.maximum();
    assert!(maximum.contains("vel[0]"));
    assert_eq!(maximum.files("vel[0]").len(), 2);
    let vel = maximum.load("vel[0]").expect("vel[0]");
    assert_eq!(vel.times(), &[0.0, 0.5]);
    assert_eq!(vel.values(), &[0.0, 0.1]);

    assert!(scalars.average().load("rho").is_ok());
}

#[test]
fn lenient_and_strict_lookups() {
    let dir = tempdir().expect("tempdir");
    let sim = build_tov(dir.path());
    let scalars = ScalarsDir::new(&sim).expect("scalars dir");
    let average = scalars.average();

    let default = TimeSeries::new(vec![1.0], vec![1.0]).expect("series");
    assert_eq!(average.get_or("nonexistent", default.clone()).expect("get_or"), default);
    assert_eq!(average.get("nonexistent").expect("get"), None);
    assert!(average.load("nonexistent").unwrap_err().is_variable_not_found());

    assert_eq!(
        average.get("rho").expect("get").expect("present"),
        average.load("rho").expect("load")
    );
}

#[test]
fn uncached_reader_reloads_the_same_series() {
    let dir = tempdir().expect("tempdir");
    let sim = build_tov(dir.path());
    let config = ScalarsConfig {
        cache_merged: false,
        ..ScalarsConfig::default()
    };
    let scalars = ScalarsDir::with_config(&sim, config).expect("scalars dir");
    let first = scalars.average().load("rho").expect("first");
    let second = scalars.average().load("rho").expect("second");
    assert_eq!(first, second);
}

#[test]
fn summary_lists_every_reduction() {
    let dir = tempdir().expect("tempdir");
    let sim = build_tov(dir.path());
    let scalars = ScalarsDir::new(&sim).expect("scalars dir");

    let summary = scalars.to_string();
    assert!(summary.starts_with("Folder "), "{summary}");
    assert!(summary.contains("Available average timeseries:\n[\"gxx\", \"gyy\", \"rho\"]"));
    assert!(summary.contains("Available maximum timeseries:\n[\"vel[0]\"]"));
    assert!(summary.contains("Available norm_inf timeseries:\n[]"));
}
