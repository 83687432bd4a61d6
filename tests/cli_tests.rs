//! Command-line tests for the `igv-session` binary.
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SNP_MASTER: &str = "<Session>{add_resource}{add_panel}{add_vcf_track}</Session>\n";
const SV_MASTER: &str =
    "<Session>{add_resource}{add_panel}{add_sv_mut_track}{add_sv_gtf_track}</Session>\n";

fn sample_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path();
    fs::create_dir_all(root.join("sample/bams")).unwrap();
    fs::create_dir_all(root.join("sample/svs/igv")).unwrap();
    fs::create_dir_all(root.join("sample/variants")).unwrap();
    fs::write(root.join("sample/bams/sample-nodups.bam"), "bam").unwrap();
    fs::write(root.join("sample/svs/igv/sample-CFDNA-01_svcaller.mut"), "mut").unwrap();
    fs::write(root.join("sample/variants/sample.all.somatic.vep.vcf"), "vcf").unwrap();
    fs::write(root.join("snp.xml"), SNP_MASTER).unwrap();
    fs::write(root.join("sv.xml"), SV_MASTER).unwrap();
    dir
}

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("igv-session").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_links_and_sessions() {
    let dir = sample_dir();
    let root = dir.path();

    cmd()
        .arg("--outdir")
        .arg(root.join("sample"))
        .arg("--snp-master")
        .arg(root.join("snp.xml"))
        .arg("--sv-master")
        .arg(root.join("sv.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Links:    3 created"))
        .stdout(predicate::str::contains("igv_session_sv.xml (2 resources, 2 tracks)"))
        .stdout(predicate::str::contains("igv_session_snps.xml (1 resources, 1 tracks)"));

    let igvnav = root.join("sample/IGVnav");
    let sv = fs::read_to_string(igvnav.join("igv_session_sv.xml")).unwrap();
    assert_eq!(sv.matches("<Resource ").count(), 2);
    assert_eq!(sv.matches("<Panel ").count(), 1);
    assert_eq!(sv.matches("MutationTrack").count(), 1);

    let snp = fs::read_to_string(igvnav.join("igv_session_snps.xml")).unwrap();
    assert_eq!(snp.matches("<Resource ").count(), 1);
    assert_eq!(snp.matches("VariantTrack").count(), 1);
}

#[test]
fn test_missing_templates_exit_zero_by_default() {
    let dir = sample_dir();
    let root = dir.path();

    cmd()
        .arg("--outdir")
        .arg(root.join("sample"))
        .arg("--snp-master")
        .arg(root.join("missing.xml"))
        .arg("--sv-master")
        .arg(root.join("sv.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Error while creating session files"));

    // Links were still created, no session written
    assert!(root.join("sample/IGVnav/sample-nodups.bam").exists());
    assert!(!root.join("sample/IGVnav/igv_session_snps.xml").exists());
}

#[test]
fn test_strict_fails_on_error() {
    let dir = sample_dir();
    let root = dir.path();

    cmd()
        .arg("--outdir")
        .arg(root.join("sample"))
        .arg("--snp-master")
        .arg(root.join("missing.xml"))
        .arg("--sv-master")
        .arg(root.join("sv.xml"))
        .arg("--strict")
        .assert()
        .failure();
}

#[test]
fn test_json_summary() {
    let dir = sample_dir();
    let root = dir.path();

    let output = cmd()
        .arg("--outdir")
        .arg(root.join("sample"))
        .arg("--snp-master")
        .arg(root.join("snp.xml"))
        .arg("--sv-master")
        .arg(root.join("sv.xml"))
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["links"]["created"].as_array().unwrap().len(), 3);
    assert_eq!(json["sessions"]["sv"]["resources"], 2);
    assert_eq!(json["sessions"]["snp"]["kind"], "snp");
    assert!(json["errors"].as_array().unwrap().is_empty());
    assert!(json["generated_at"].is_string());
}

#[test]
fn test_config_file_supplies_templates() {
    let dir = sample_dir();
    let root = dir.path();
    let config = root.join("config.json");
    fs::write(
        &config,
        serde_json::json!({
            "outdir": root.join("sample"),
            "snp_master": root.join("snp.xml"),
            "sv_master": root.join("sv.xml"),
        })
        .to_string(),
    )
    .unwrap();

    cmd().arg("--config").arg(&config).assert().success();
    assert!(root.join("sample/IGVnav/igv_session_sv.xml").exists());
}

#[test]
fn test_skip_sessions() {
    let dir = sample_dir();
    let root = dir.path();

    cmd()
        .arg("--outdir")
        .arg(root.join("sample"))
        .arg("--skip-sessions")
        .arg("--strict")
        .assert()
        .success();

    assert!(root.join("sample/IGVnav/sample-nodups.bam").exists());
    assert!(!root.join("sample/IGVnav/igv_session_sv.xml").exists());
}

#[test]
fn test_missing_outdir_reports_error() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("--outdir")
        .arg(dir.path().join("nope"))
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error while creating IGVnav links"));
}

#[test]
fn test_malformed_config_falls_back_to_flags() {
    let dir = sample_dir();
    let root = dir.path();
    let config = root.join("config.json");
    fs::write(&config, "{ not json").unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .arg("--outdir")
        .arg(root.join("sample"))
        .arg("--snp-master")
        .arg(root.join("snp.xml"))
        .arg("--sv-master")
        .arg(root.join("sv.xml"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Error while reading config file"));

    assert!(root.join("sample/IGVnav/igv_session_sv.xml").exists());
}

#[test]
fn test_malformed_config_fails_when_strict() {
    let dir = sample_dir();
    let root = dir.path();
    let config = root.join("config.json");
    fs::write(&config, "{ not json").unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .arg("--outdir")
        .arg(root.join("sample"))
        .arg("--strict")
        .assert()
        .failure();

    assert!(!root.join("sample/IGVnav").exists());
}
