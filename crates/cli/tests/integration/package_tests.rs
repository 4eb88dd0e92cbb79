//! End-to-end packaging runs through the distpack binary.

use predicates::prelude::*;

use super::common::{TestEnv, read};

#[test]
fn packages_project_into_standalone_tree() {
  let env = TestEnv::project();

  env
    .package_cmd()
    .arg("--skip-fixheaders")
    .assert()
    .success()
    // Five listed files plus the manifest itself.
    .stdout(predicate::str::contains("Packaged 6 file(s)"));

  for file in [
    "src/src.pro",
    "src/mailaddress.h",
    "src/mailfolder.h",
    "src/mailaddress_p.h",
    "src/mailaddress.cpp",
    "src/mailfolder.cpp",
    "examples/reader/main.cpp",
    "examples/reader/reader.pro",
    "LICENSE.GPL",
    "README",
  ] {
    assert!(env.dest_file(file).is_file(), "missing {file}");
  }
  assert_eq!(read(&env.dest_file("README")), "Standalone mail library\n");
}

#[test]
fn writes_one_shim_per_exported_class() {
  let env = TestEnv::project();

  env.package_cmd().arg("--skip-fixheaders").assert().success();

  assert_eq!(read(&env.dest_file("src/MailAddress")), "#include \"mailaddress.h\"\n");
  assert_eq!(read(&env.dest_file("src/MailAddressList")), "#include \"mailaddress.h\"\n");
  assert_eq!(read(&env.dest_file("src/MailFolder")), "#include \"mailfolder.h\"\n");
  // Private headers are copied but never scanned.
  assert!(!env.dest_file("src/MailAddressPrivate").exists());
}

#[test]
fn verbose_lists_every_copied_file() {
  let env = TestEnv::project();

  env
    .package_cmd()
    .args(["--skip-fixheaders", "-v"])
    .assert()
    .success()
    .stdout(predicate::str::contains("src/mailfolder.cpp"))
    .stdout(predicate::str::contains("examples/reader/main.cpp"))
    .stdout(predicate::str::contains("LICENSE.GPL"))
    .stdout(predicate::str::contains("src/MailFolder (shim)"));
}

#[test]
fn json_report_describes_the_run() {
  let env = TestEnv::project();

  let output = env.package_cmd().args(["--skip-fixheaders", "--json"]).output().unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["manifest_entries"].as_array().unwrap().len(), 5);
  assert_eq!(report["sources"][0], "src/src.pro");
  let mut examples: Vec<&str> = report["examples"]
    .as_array()
    .unwrap()
    .iter()
    .map(|path| path.as_str().unwrap())
    .collect();
  examples.sort();
  assert_eq!(examples, ["examples/reader/main.cpp", "examples/reader/reader.pro"]);
  assert_eq!(report["shims"].as_array().unwrap().len(), 3);
  assert_eq!(report["fixheaders"]["status"], "skipped");
}

// =============================================================================
// Failure exit codes
// =============================================================================

#[test]
fn unreadable_manifest_exits_with_code_3() {
  let env = TestEnv::project();
  env.remove_file("src/src.pro");

  env
    .package_cmd()
    .assert()
    .code(3)
    .stdout(predicate::str::contains("cannot read manifest"));

  assert!(!env.dest_path().exists());
}

#[test]
fn manifest_without_files_exits_with_code_4_and_copies_nothing() {
  let env = TestEnv::project();
  env.write_file("src/src.pro", "TEMPLATE = subdirs\nSUBDIRS = mail\n");

  env
    .package_cmd()
    .assert()
    .code(4)
    .stdout(predicate::str::contains("no source files found"));

  assert!(!env.dest_path().exists());
}

#[test]
fn uncreatable_destination_exits_with_code_5() {
  let env = TestEnv::project();
  std::fs::write(env.temp.path().join("blocker"), "not a directory").unwrap();

  env
    .package_cmd_to(&env.temp.path().join("blocker/dist"))
    .arg("--skip-fixheaders")
    .assert()
    .code(5)
    .stdout(predicate::str::contains("failed to create directory"));
}

#[test]
fn missing_toplevel_file_exits_with_code_6_and_removes_tree() {
  let env = TestEnv::project();
  env.remove_file("LICENSE.GPL");

  env
    .package_cmd()
    .arg("--skip-fixheaders")
    .assert()
    .code(6)
    .stdout(predicate::str::contains("LICENSE.GPL"));

  assert!(!env.dest_path().exists());
}

#[test]
fn failure_into_existing_destination_warns_and_keeps_it() {
  let env = TestEnv::project();
  env.remove_file("LICENSE.GPL");
  std::fs::create_dir_all(env.dest_path()).unwrap();
  std::fs::write(env.dest_path().join("keep.txt"), "mine\n").unwrap();

  env
    .package_cmd()
    .arg("--skip-fixheaders")
    .assert()
    .code(6)
    .stdout(predicate::str::contains("existed before this run and was left in place"));

  assert_eq!(read(&env.dest_file("keep.txt")), "mine\n");
}

#[test]
fn json_failure_is_reported_as_json() {
  let env = TestEnv::project();
  env.write_file("src/src.pro", "TEMPLATE = subdirs\n");

  let output = env.package_cmd().arg("--json").output().unwrap();

  assert_eq!(output.status.code(), Some(4));
  let failure: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(failure["code"], 4);
  assert!(failure["error"].as_str().unwrap().contains("no source files found"));
}

#[test]
fn missing_examples_directory_exits_with_code_6() {
  let env = TestEnv::project();
  std::fs::remove_dir_all(env.source_path().join("examples")).unwrap();

  env.package_cmd().arg("--skip-fixheaders").assert().code(6);

  assert!(!env.dest_path().exists());
}

#[test]
fn invalid_pattern_is_a_usage_error() {
  let env = TestEnv::project();

  env
    .package_cmd()
    .args(["--export-pattern", "class ("])
    .assert()
    .code(2)
    .stdout(predicate::str::contains("invalid export pattern"));

  assert!(!env.dest_path().exists());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn config_in_source_dir_is_picked_up() {
  let env = TestEnv::empty();
  env.write_file(
    "distpack.toml",
    r#"
[package]
manifest = "lib/lib.pro"
toplevel_files = ["COPYING"]
examples_dir = "demos"
"#,
  );
  env.write_file("lib/lib.pro", "SOURCES += core.cpp\n");
  env.write_file("lib/core.cpp", "\n");
  env.write_file("demos/hello/hello.cpp", "\n");
  env.write_file("COPYING", "copying\n");

  env.package_cmd().arg("--skip-fixheaders").assert().success();

  assert!(env.dest_file("lib/lib.pro").is_file());
  assert!(env.dest_file("lib/core.cpp").is_file());
  assert!(env.dest_file("demos/hello/hello.cpp").is_file());
  assert!(env.dest_file("COPYING").is_file());
}

#[test]
fn pattern_flags_override_defaults() {
  let env = TestEnv::project();

  env
    .package_cmd()
    .args([
      "--skip-fixheaders",
      "--manifest-pattern",
      r"(mailfolder\.(?:h|cpp))",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Packaged 3 file(s)"));

  assert!(env.dest_file("src/mailfolder.cpp").is_file());
  assert!(!env.dest_file("src/mailaddress.cpp").exists());
  assert!(env.dest_file("src/MailFolder").is_file());
}

// =============================================================================
// fixheaders
// =============================================================================

#[cfg(unix)]
#[test]
fn fixheaders_runs_in_destination_with_its_flags() {
  let env = TestEnv::project();
  env.write_script("bin/fixheaders", "echo \"$@\" > fixheaders.log");

  env
    .package_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("fixheaders: ok"));

  assert_eq!(read(&env.dest_file("fixheaders.log")), "-all -quiet\n");
}

#[test]
fn missing_fixheaders_does_not_fail_the_run() {
  let env = TestEnv::project();
  env.write_file(
    "distpack.toml",
    "[package.fixheaders]\nprogram = \"bin/distpack-missing-fixheaders\"\n",
  );

  env
    .package_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("fixheaders not found"));

  assert!(env.dest_file("src/MailAddress").is_file());
}
