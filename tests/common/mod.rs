#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;

pub const PER_VARIABLE_HEADER: &str = "# Scalar ASCII output created by CarpetIOScalar\n\
# column format: 1:iteration 2:time 3:data\n";

/// Rows `iteration time value` for each `(time, value)` pair.
pub fn rows(samples: &[(f64, f64)]) -> String {
    samples
        .iter()
        .enumerate()
        .map(|(iteration, (time, value))| format!("{iteration}\t{time}\t{value}\n"))
        .collect()
}

pub fn write_plain(path: &Path, body: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, body).expect("write plain");
    path.to_path_buf()
}

pub fn write_gz(path: &Path, body: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    let file = File::create(path).expect("create gz");
    let mut encoder = GzEncoder::new(file, flate2::Compression::default());
    encoder.write_all(body.as_bytes()).expect("write gz");
    encoder.finish().expect("finish gz");
    path.to_path_buf()
}

pub fn write_bz2(path: &Path, body: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    let file = File::create(path).expect("create bz2");
    let mut encoder = BzEncoder::new(file, bzip2::Compression::default());
    encoder.write_all(body.as_bytes()).expect("write bz2");
    encoder.finish().expect("finish bz2");
    path.to_path_buf()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
