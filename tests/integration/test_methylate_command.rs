//! End-to-end tests for methylating a reference FASTA.

use rstest::rstest;
use std::fs;
use tempfile::TempDir;

use crate::helpers::{
    create_gzipped_fasta, create_test_fasta, methylate_sequence, parse_fasta, read_fasta,
    run_methylref,
};

#[rstest]
#[case::cpg("cpg", "ACGT", "AMGT")]
#[case::cpg_overlapping_window("cpg", "CCGG", "CMGG")]
#[case::dam("dam", "TGATCA", "TGMTCA")]
#[case::dcm("dcm", "CCAGGCCTGG", "CMAGGCMTGG")]
#[case::sin395("sin395", "AGATCA", "AGATMA")]
#[case::pspjdri("pspjdri", "ACCGGT", "AMCGGT")]
#[case::uracil("uracil", "TTAT", "UUAU")]
#[case::no_sites("dam", "AAAAAAAA", "AAAAAAAA")]
#[case::motif_at_end("dam", "AAGATC", "AAGMTC")]
#[case::shorter_than_motif("dcm", "CCAG", "CCAG")]
#[case::lowercase_untouched("cpg", "acgt", "acgt")]
fn test_methylate_recognition_sets(
    #[case] recognition: &str,
    #[case] input: &str,
    #[case] expected: &str,
) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    assert_eq!(methylate_sequence(temp_dir.path(), recognition, input), expected);
}

/// Headers pass through unchanged and records keep their input order.
#[test]
fn test_methylate_preserves_headers_and_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("ref.fa");
    create_test_fasta(&input, &[
        ("chr2 second contig", "GATCGATC"),
        ("chr1", "ACGT"),
        ("chrM mito  extra   spaces", "TTTT"),
    ]);

    let output = run_methylref(&[input.to_str().unwrap(), "-r", "dam"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let records = parse_fasta(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(records, vec![
        ("chr2 second contig".to_string(), "GMTCGMTC".to_string()),
        ("chr1".to_string(), "ACGT".to_string()),
        ("chrM mito  extra   spaces".to_string(), "TTTT".to_string()),
    ]);
}

/// The definition line is written back byte for byte, including tab separators.
#[test]
fn test_methylate_keeps_tab_separated_header() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("ref.fa");
    fs::write(&input, ">chr1\tdesc here\nACGT\n").expect("Failed to write input");

    let output = run_methylref(&[input.to_str().unwrap(), "-r", "cpg"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), ">chr1\tdesc here\nAMGT\n");
}

/// A motif split across input lines is still found because lines are joined first.
#[test]
fn test_methylate_motif_spanning_input_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("wrapped.fa");
    fs::write(&input, ">chr1\nAAGA\nTCAA\n").expect("Failed to write input");

    let output = run_methylref(&[input.to_str().unwrap(), "-r", "dam"]);
    assert!(output.status.success());

    let records = parse_fasta(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(records[0].1, "AAGMTCAA");
}

#[test]
fn test_methylate_wraps_output_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("ref.fa");
    create_test_fasta(&input, &[("chr1", &"CG".repeat(5))]);

    let output = run_methylref(&[input.to_str().unwrap(), "-r", "cpg", "--line-width", "4"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), ">chr1\nMGMG\nMGMG\nMG\n");
}

#[test]
fn test_methylate_default_line_width_is_60() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("ref.fa");
    create_test_fasta(&input, &[("chr1", &"A".repeat(150))]);

    let output = run_methylref(&[input.to_str().unwrap(), "-r", "cpg"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line_lengths: Vec<usize> = stdout.lines().skip(1).map(str::len).collect();
    assert_eq!(line_lengths, vec![60, 60, 30]);
}

#[test]
fn test_methylate_to_output_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("ref.fa");
    let output_fa = temp_dir.path().join("out.fa");
    create_test_fasta(&input, &[("chr1", "CCAGGAAACCTGG")]);

    let output = run_methylref(&[
        input.to_str().unwrap(),
        "--recognition",
        "dcm",
        "--output",
        output_fa.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty(), "Nothing should be written to stdout with --output");

    assert_eq!(read_fasta(&output_fa), vec![("chr1".to_string(), "CMAGGAAACMTGG".to_string())]);
}

#[test]
fn test_methylate_gzip_input_and_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("ref.fa.gz");
    let output_fa = temp_dir.path().join("out.fa.gz");
    create_gzipped_fasta(&input, &[("chr1", "GATCGATC"), ("chr2", "AGATCT")]);

    let output = run_methylref(&[
        input.to_str().unwrap(),
        "-r",
        "sin395",
        "-o",
        output_fa.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let bytes = fs::read(&output_fa).expect("Failed to read output");
    assert_eq!(&bytes[..2], &[0x1f, 0x8b], "Output should be gzip-compressed");
    assert_eq!(read_fasta(&output_fa), vec![
        ("chr1".to_string(), "GATMGATM".to_string()),
        ("chr2".to_string(), "AGATMT".to_string()),
    ]);
}

#[test]
fn test_methylate_with_threads_matches_single_threaded() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("ref.fa");
    let definitions: Vec<String> = (0..200).map(|i| format!("contig{i} len={}", i * 3)).collect();
    let sequences: Vec<String> =
        (0..200).map(|i| format!("{}GATC{}CCGG", "ACG".repeat(i % 7), "T".repeat(i))).collect();
    let records: Vec<(&str, &str)> =
        definitions.iter().map(String::as_str).zip(sequences.iter().map(String::as_str)).collect();
    create_test_fasta(&input, &records);

    let single = run_methylref(&[input.to_str().unwrap(), "-r", "pspjdri"]);
    let threaded = run_methylref(&[input.to_str().unwrap(), "-r", "pspjdri", "--threads", "4"]);

    assert!(single.status.success());
    assert!(threaded.status.success(), "{}", String::from_utf8_lossy(&threaded.stderr));
    assert_eq!(single.stdout, threaded.stdout);
    assert_eq!(parse_fasta(&String::from_utf8_lossy(&threaded.stdout)).len(), 200);
}

#[test]
fn test_methylate_overlap_policies_agree_for_builtin_profile() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("ref.fa");
    create_test_fasta(&input, &[("chr1", "CGCGCCGGCG")]);

    let snapshot = run_methylref(&[input.to_str().unwrap(), "-r", "cpg", "--overlap", "snapshot"]);
    let in_place = run_methylref(&[input.to_str().unwrap(), "-r", "cpg", "--overlap", "in-place"]);

    assert!(snapshot.status.success());
    assert!(in_place.status.success());
    assert_eq!(snapshot.stdout, in_place.stdout);
}

#[test]
fn test_methylate_writes_metrics() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("ref.fa");
    let metrics = temp_dir.path().join("metrics.tsv");
    create_test_fasta(&input, &[("chr1 first", "ACGTCG"), ("chr2", "AAAA")]);

    let output = run_methylref(&[
        input.to_str().unwrap(),
        "-r",
        "cpg",
        "--metrics",
        metrics.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let contents = fs::read_to_string(&metrics).expect("Failed to read metrics");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, vec![
        "name\trecognition\tlength\tmethylated_sites",
        "chr1\tcpg\t6\t2",
        "chr2\tcpg\t4\t0",
    ]);
}

/// Log output goes to stderr so stdout stays a clean FASTA stream.
#[test]
fn test_methylate_logs_to_stderr() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("ref.fa");
    create_test_fasta(&input, &[("chr1", "ACGT")]);

    let output = run_methylref(&[input.to_str().unwrap(), "-r", "cpg"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Recognition: cpg"), "stderr was: {stderr}");
    assert_eq!(String::from_utf8_lossy(&output.stdout), ">chr1\nAMGT\n");
}

#[test]
fn test_methylate_empty_input_produces_empty_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("empty.fa");
    fs::write(&input, "").expect("Failed to write input");

    let output = run_methylref(&[input.to_str().unwrap(), "-r", "dam"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}
