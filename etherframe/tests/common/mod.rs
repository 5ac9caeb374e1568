use std::fs;
use std::path::PathBuf;

/// Load a hex-encoded frame from `tests/packet_examples`.
pub fn file_to_packet(fname: &str) -> Vec<u8> {
    // The test is executed under the crate root directory.
    let mut program_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    program_path.push("tests");
    program_path.push("packet_examples");
    program_path.push(fname);

    let content = fs::read_to_string(program_path).unwrap();
    let content = content.trim();
    assert!(content.len() % 2 == 0, "odd number of hex digits in {}", fname);

    (0..content.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&content[i..i + 2], 16).unwrap())
        .collect()
}
