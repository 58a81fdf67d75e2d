//! FASTA fixtures and a runner for the methylref binary.
#![allow(dead_code)]

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Command, Output};

/// Writes a FASTA file with one unwrapped sequence line per record.
pub fn create_test_fasta(path: &Path, records: &[(&str, &str)]) {
    fs::write(path, fasta_text(records)).expect("Failed to write test FASTA");
}

/// Writes a gzip-compressed FASTA file.
pub fn create_gzipped_fasta(path: &Path, records: &[(&str, &str)]) {
    let file = File::create(path).expect("Failed to create gzipped FASTA");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(fasta_text(records).as_bytes()).expect("Failed to write gzipped FASTA");
    encoder.finish().expect("Failed to finish gzip stream");
}

/// Renders records as FASTA text.
pub fn fasta_text(records: &[(&str, &str)]) -> String {
    records.iter().map(|(definition, seq)| format!(">{definition}\n{seq}\n")).collect()
}

/// Parses FASTA text into `(definition, sequence)` pairs, joining wrapped lines.
pub fn parse_fasta(text: &str) -> Vec<(String, String)> {
    let mut records: Vec<(String, String)> = Vec::new();
    for line in text.lines() {
        if let Some(definition) = line.strip_prefix('>') {
            records.push((definition.to_string(), String::new()));
        } else if let Some((_, seq)) = records.last_mut() {
            seq.push_str(line);
        }
    }
    records
}

/// Reads and parses a FASTA file, decompressing it when it ends in `.gz`.
pub fn read_fasta(path: &Path) -> Vec<(String, String)> {
    let mut text = String::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        let file = File::open(path).expect("Failed to open gzipped output");
        MultiGzDecoder::new(file).read_to_string(&mut text).expect("Failed to decompress output");
    } else {
        text = fs::read_to_string(path).expect("Failed to read output");
    }
    parse_fasta(&text)
}

/// Runs methylref with the given arguments and captures its output.
pub fn run_methylref(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_methylref"))
        .args(args)
        .output()
        .expect("Failed to run methylref")
}

/// Runs methylref on a single-record FASTA and returns the methylated sequence from stdout.
pub fn methylate_sequence(dir: &Path, recognition: &str, seq: &str) -> String {
    let input = dir.join(format!("{recognition}.fa"));
    create_test_fasta(&input, &[("seq", seq)]);

    let output = run_methylref(&[input.to_str().unwrap(), "--recognition", recognition]);
    assert!(
        output.status.success(),
        "methylref failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let records = parse_fasta(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(records.len(), 1, "Expected a single output record");
    records[0].1.clone()
}
