//! Integration tests for the aixverify binary.

use aixverify_verifier::test_support::{
    opaque_png, settings_missing_key_json, PackageBuilder,
};
use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

fn aixverify_cmd() -> Command {
    let mut cmd = Command::cargo_bin("aixverify").unwrap();
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_help_flag() {
    aixverify_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ready for publishing"));
}

#[test]
fn test_requires_files() {
    aixverify_cmd().assert().failure();
}

#[test]
fn test_valid_package() {
    let temp = TempDir::new().unwrap();
    let package = temp.child("valid.aix");
    PackageBuilder::valid().write_to(package.path());

    aixverify_cmd()
        .arg(package.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("* Testing "))
        .stdout(predicate::str::contains("  * main.wasm"))
        .stdout(predicate::str::contains(
            "Testing if source.json is valid against schema... ok",
        ))
        .stdout(predicate::str::contains("test failed").not());
}

#[test]
fn test_missing_payload_fails() {
    let temp = TempDir::new().unwrap();
    let package = temp.child("no-wasm.aix");
    PackageBuilder::valid()
        .without("Payload/main.wasm")
        .write_to(package.path());

    aixverify_cmd()
        .arg(package.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("test failed: did not find main.wasm"))
        .stderr(predicate::str::contains("one or more packages failed validation"));
}

#[test]
fn test_batch_continues_after_failures() {
    let temp = TempDir::new().unwrap();
    let broken = temp.child("broken.aix");
    broken.write_binary(b"not a zip").unwrap();
    let bad_settings = temp.child("bad-settings.aix");
    PackageBuilder::valid()
        .file("Payload/settings.json", &settings_missing_key_json())
        .write_to(bad_settings.path());
    let good = temp.child("good.aix");
    PackageBuilder::valid().write_to(good.path());

    aixverify_cmd()
        .arg(broken.path())
        .arg(bad_settings.path())
        .arg(good.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("is not a valid zip file"))
        .stdout(predicate::str::contains(
            "Testing if settings.json is valid against schema... error",
        ))
        .stdout(predicate::str::contains(format!(
            "* Testing {}",
            good.path().display()
        )));
}

#[test]
fn test_strict_icon_dimensions() {
    let temp = TempDir::new().unwrap();
    let package = temp.child("wide.aix");
    PackageBuilder::valid()
        .without("Payload/Icon.png")
        .file("Payload/Icon.png", &opaque_png(256, 128))
        .write_to(package.path());

    aixverify_cmd().arg(package.path()).assert().success();

    aixverify_cmd()
        .arg("--strict-icon-dimensions")
        .arg(package.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: expected 128x128, found 256x128"));
}

#[test]
fn test_zero_icon_size_rejected() {
    let temp = TempDir::new().unwrap();
    let package = temp.child("valid.aix");
    PackageBuilder::valid().write_to(package.path());

    aixverify_cmd()
        .args(["--icon-size", "0"])
        .arg(package.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("icon size must be greater than zero"));
}
