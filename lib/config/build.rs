
use std::{env, fs, path::PathBuf};

use serde::Deserialize;

/// Longest decimal text of an `i32` (`-2147483648`).
const I32_DECIMAL_LEN: usize = 11;

#[derive(Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct DriverFlags {
    device_name: String,
    device_count: u32,
    max_msg_len: usize,
    log_level: String,
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let flags_str =
        fs::read_to_string(PathBuf::from(manifest_dir.clone()).join("../../flags.json")).unwrap();
    let flags: DriverFlags = serde_json::from_str(&flags_str).unwrap();
    check_flags(&flags);
    make_flags(&flags);
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../../flags.json");
}

fn check_flags(flags: &DriverFlags) {
    if flags.device_name.is_empty() {
        panic!("DEVICE_NAME must not be empty.");
    }
    if flags.device_count == 0 {
        panic!("DEVICE_COUNT must be at least 1.");
    }
    if flags.max_msg_len < I32_DECIMAL_LEN {
        panic!(
            "MAX_MSG_LEN must be at least {} bytes, got {}.",
            I32_DECIMAL_LEN, flags.max_msg_len
        );
    }
}

fn make_flags(flags: &DriverFlags) {
    let mut s: String = String::from("");
    s += "/// Name prefix for the number range, the class and every node.\n";
    s += format!("pub const DEVICE_NAME: &str = {:?};\n", flags.device_name).as_str();
    s += "/// Number of device instances registered at activation.\n";
    s += format!("pub const DEVICE_COUNT: u32 = {};\n", flags.device_count).as_str();
    s += "/// Size of the per-session message buffer.\n";
    s += format!("pub const MAX_MSG_LEN: usize = {};\n", flags.max_msg_len).as_str();
    s += "/// Default maximum log level.\n";
    s += format!("pub const LOG_LEVEL: &str = {:?};\n", flags.log_level).as_str();
    let out_dir = env::var("OUT_DIR").unwrap();
    let path = PathBuf::from(out_dir).join("build_flags.rs");
    fs::write(path, s).unwrap();
}
