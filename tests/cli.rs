// tests/cli.rs - drive the built binary through a pty with rexpect
use rexpect::spawn;

const TIMEOUT_MS: u64 = 10000;
const BIN: &str = env!("CARGO_BIN_EXE_parcel-auditor");

#[test]
fn test_help_command() {
    let mut p = spawn(&format!("{} --help", BIN), Some(TIMEOUT_MS)).expect("Failed to spawn parcel-auditor");

    p.exp_string("Audit parcelamento PDF statements")
        .expect("Should show description");
    p.exp_string("audit").expect("Should show audit command");
    p.exp_string("doctor").expect("Should show doctor command");
    p.exp_eof().expect("Should complete");
}

#[test]
fn test_missing_file_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nao_existe.pdf");
    let mut p = spawn(
        &format!("{} audit {} --no-export", BIN, missing.display()),
        Some(TIMEOUT_MS),
    )
    .expect("Failed to spawn parcel-auditor");

    p.exp_string("Documents:     0").expect("Should print the summary");
    p.exp_string("Error processing").expect("Should name the failure");
    p.exp_string("nao_existe.pdf").expect("Should name the file");
    p.exp_eof().expect("Should complete");
}

#[test]
fn test_config_prints_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auditor.toml");
    std::fs::write(&path, "page_limit = 3\n").unwrap();

    let mut p = spawn(&format!("{} config --config {}", BIN, path.display()), Some(TIMEOUT_MS))
        .expect("Failed to spawn parcel-auditor");

    p.exp_string("page_limit = 3").expect("Should honour the config file");
    p.exp_string("ocr_threshold = 50").expect("Should fill in defaults");
    p.exp_eof().expect("Should complete");
}

#[test]
fn test_zero_page_limit_in_config_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auditor.toml");
    std::fs::write(&path, "page_limit = 0\n").unwrap();

    let mut p = spawn(&format!("{} config --config {}", BIN, path.display()), Some(TIMEOUT_MS))
        .expect("Failed to spawn parcel-auditor");

    p.exp_string("page_limit must be at least 1").expect("Should reject the value");
    p.exp_eof().expect("Should complete");
}
