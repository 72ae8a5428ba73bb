#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::Command;

const SAMPLE: [u8; 11] = [
    0x00, 0x00, 0x00, 0x01, 0xAA, 0xBB, 0x00, 0x00, 0x00, 0x01, 0xCC,
];

const EXTRADATA: [u8; 17] = [
    0x00, 0x00, 0x00, 0x01, 0x67, 0x64, 0x00, 0x1F, 0xAC, 0xD9, 0x00, 0x00, 0x00, 0x01, 0x68,
    0xEB, 0xE3,
];

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "nalframe-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn nalframe() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nalframe"));
    cmd.arg("--log-level").arg("error");
    cmd
}

#[test]
fn reframe_writes_length_prefixed_file() {
    let dir = unique_temp_dir("reframe");
    let input = dir.join("in.h264");
    let output = dir.join("out.bin");
    std::fs::write(&input, SAMPLE).expect("input should be writable");

    let result = nalframe()
        .arg("--format")
        .arg("json")
        .arg("reframe")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .expect("reframe should run");

    assert!(result.status.success());
    let written = std::fs::read(&output).expect("output should exist");
    assert_eq!(
        written,
        [0x00_u8, 0x00, 0x00, 0x02, 0xAA, 0xBB, 0x00, 0x00, 0x00, 0x01, 0xCC]
    );

    let report: serde_json::Value =
        serde_json::from_slice(&result.stdout).expect("reframe should emit json");
    assert_eq!(report.get("units").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(report.get("first_marker").and_then(|v| v.as_u64()), Some(0));
    assert_eq!(report.get("bytes_written").and_then(|v| v.as_u64()), Some(11));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn reframe_streams_trimmed_bytes_to_stdout() {
    let dir = unique_temp_dir("reframe-stdout");
    let input = dir.join("in.h264");
    let mut data = vec![0x7A, 0x7B];
    data.extend_from_slice(&SAMPLE);
    std::fs::write(&input, &data).expect("input should be writable");

    let result = nalframe()
        .arg("reframe")
        .arg(&input)
        .arg("--trim-leading")
        .output()
        .expect("reframe should run");

    assert!(result.status.success());
    assert_eq!(
        result.stdout,
        [0x00_u8, 0x00, 0x00, 0x02, 0xAA, 0xBB, 0x00, 0x00, 0x00, 0x01, 0xCC]
    );
    // The input file itself is never modified.
    assert_eq!(std::fs::read(&input).expect("input should exist"), data);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn reframe_rejects_region_past_end_with_usage_code() {
    let dir = unique_temp_dir("reframe-bounds");
    let input = dir.join("in.h264");
    let output = dir.join("out.bin");
    std::fs::write(&input, SAMPLE).expect("input should be writable");

    let result = nalframe()
        .arg("reframe")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--end")
        .arg("99")
        .output()
        .expect("reframe should run");

    assert_eq!(result.status.code(), Some(64));
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("past buffer length"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn inspect_lists_units() {
    let dir = unique_temp_dir("inspect");
    let input = dir.join("in.h264");
    std::fs::write(&input, SAMPLE).expect("input should be writable");

    let result = nalframe()
        .arg("--format")
        .arg("json")
        .arg("inspect")
        .arg(&input)
        .output()
        .expect("inspect should run");

    assert!(result.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&result.stdout).expect("inspect should emit json");
    let units = report
        .get("units")
        .and_then(|v| v.as_array())
        .expect("units should be an array");
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].get("len").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(units[0].get("first_byte").and_then(|v| v.as_u64()), Some(0xAA));
    assert_eq!(units[1].get("marker_offset").and_then(|v| v.as_u64()), Some(6));
    assert_eq!(units[1].get("len").and_then(|v| v.as_u64()), Some(1));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn avcc_builds_decoder_configuration_record() {
    let dir = unique_temp_dir("avcc");
    let input = dir.join("extradata.bin");
    let output = dir.join("avcc.bin");
    std::fs::write(&input, EXTRADATA).expect("input should be writable");

    let result = nalframe()
        .arg("--format")
        .arg("json")
        .arg("avcc")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .expect("avcc should run");

    assert!(result.status.success());
    let record = std::fs::read(&output).expect("record should exist");
    assert_eq!(
        record,
        [
            0x01_u8, 0x64, 0x00, 0x1F, 0xFF, 0xE1, 0x00, 0x06, 0x67, 0x64, 0x00, 0x1F, 0xAC, 0xD9,
            0x01, 0x00, 0x03, 0x68, 0xEB, 0xE3,
        ]
    );
    let report: serde_json::Value =
        serde_json::from_slice(&result.stdout).expect("avcc should emit json");
    assert_eq!(report.get("profile").and_then(|v| v.as_u64()), Some(0x64));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn avcc_rejects_extradata_without_pps() {
    let dir = unique_temp_dir("avcc-invalid");
    let input = dir.join("extradata.bin");
    std::fs::write(&input, &EXTRADATA[..10]).expect("input should be writable");

    let result = nalframe()
        .arg("avcc")
        .arg(&input)
        .output()
        .expect("avcc should run");

    assert_eq!(result.status.code(), Some(60));
    assert!(result.stdout.is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn mirror_packages_codec_and_video_packets() {
    let dir = unique_temp_dir("mirror");
    let extradata = dir.join("extradata.bin");
    let packet = dir.join("frame.h264");
    let output = dir.join("stream.bin");
    std::fs::write(&extradata, EXTRADATA).expect("extradata should be writable");
    std::fs::write(&packet, SAMPLE).expect("packet should be writable");

    let result = nalframe()
        .arg("--format")
        .arg("json")
        .arg("mirror")
        .arg("--extradata")
        .arg(&extradata)
        .arg("--packet")
        .arg(&packet)
        .arg("-o")
        .arg(&output)
        .output()
        .expect("mirror should run");

    assert!(result.status.success());
    let stream = std::fs::read(&output).expect("stream should exist");
    let record_len = 20;
    assert_eq!(stream.len(), 128 + (128 + record_len) + (128 + SAMPLE.len()));

    // Heartbeat, codec and video packet kinds in order.
    assert_eq!(&stream[4..6], &[0x02_u8, 0x00]);
    assert_eq!(&stream[128 + 4..128 + 6], &[0x01_u8, 0x00]);
    let video = 128 + 128 + record_len;
    assert_eq!(&stream[video + 4..video + 6], &[0x00_u8, 0x00]);
    assert_eq!(&stream[video + 128..video + 132], &[0x00_u8, 0x00, 0x00, 0x02]);

    let report: serde_json::Value =
        serde_json::from_slice(&result.stdout).expect("mirror should emit json");
    assert_eq!(report.get("packets").and_then(|v| v.as_u64()), Some(3));
    assert_eq!(
        report.get("bytes_written").and_then(|v| v.as_u64()),
        Some(stream.len() as u64)
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn version_reports_package_version() {
    let result = nalframe()
        .arg("version")
        .output()
        .expect("version should run");

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
