//! Golden rendering tests.
//!
//! Each `<name>.xml` under `tests/testdata` has a `<name>.golden` holding
//! the expected `Profile::write_to` rendering. On mismatch the actual
//! rendering is written to `<name>.current`; with `PROFILEGEN_UPDATE_GOLDEN`
//! set the golden file is rewritten instead.

use profilegen_codegen::{GenerationOptions, Generator, fingerprint_bytes};
use std::fs;
use std::path::{Path, PathBuf};

const UPDATE_ENV: &str = "PROFILEGEN_UPDATE_GOLDEN";

fn testdata(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

fn check_golden(name: &str) {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("profilegen_schema=debug,profilegen_codegen=debug")
        .try_init();

    let input_path = testdata(&format!("{name}.xml"));
    let golden_path = testdata(&format!("{name}.golden"));
    let current_path = testdata(&format!("{name}.current"));

    let input = fs::read(&input_path).expect("read input");
    let profile = Generator::new(input_path.display().to_string(), &input, GenerationOptions::new())
        .generate_profile()
        .expect("generate");

    let mut rendered = Vec::new();
    profile.write_to(&mut rendered).expect("render");
    assert_eq!(profile.fingerprint(), fingerprint_bytes(&rendered));

    if std::env::var_os(UPDATE_ENV).is_some() {
        fs::write(&golden_path, &rendered).expect("update golden");
        return;
    }

    let golden = fs::read(&golden_path).expect("read golden");
    if fingerprint_bytes(&golden) != profile.fingerprint() {
        fs::write(&current_path, &rendered).expect("write current");
        panic!(
            "{} does not match {}; actual rendering written to {}",
            input_path.display(),
            golden_path.display(),
            current_path.display()
        );
    }
    let _ = fs::remove_file(&current_path);
}

#[test]
fn test_golden_profile() {
    check_golden("profile");
}

#[test]
fn test_golden_rendering_is_stable() {
    let input = fs::read(testdata("profile.xml")).expect("read input");
    let first = Generator::new("profile.xml", &input, GenerationOptions::new())
        .generate_profile()
        .expect("first");
    let second = Generator::new("profile.xml", &input, GenerationOptions::new())
        .generate_profile()
        .expect("second");

    assert_eq!(first.render(), second.render());
    assert_eq!(first.orphans(), ["12"]);
}
