use std::fs;
use std::path::Path;
use std::process::Command;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mystery-cards"))
}

fn output_dir() -> &'static Path {
    Path::new("tests/output")
}

fn setup() {
    fs::create_dir_all(output_dir()).expect("Failed to create output directory");
}

fn write_data(name: &str, contents: &str) -> String {
    setup();
    let path = output_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test data");
    path.to_string_lossy().into_owned()
}

fn cleanup_file(name: &str) {
    let path = output_dir().join(name);
    if path.exists() {
        fs::remove_file(&path).ok();
    }
}

fn sample_rumors(count: usize) -> String {
    let records: Vec<String> = (1..=count)
        .map(|i| {
            format!(
                r#"{{"id":{},"text":"Rumor number {} whispered over tea at the solstice gala","possession":"baker"}}"#,
                i, i
            )
        })
        .collect();
    format!(r#"{{"rumors":[{}]}}"#, records.join(","))
}

#[test]
fn test_cards_basic() {
    let data = write_data("rumors-basic.json", &sample_rumors(8));
    let output_file = "test-cards-basic.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "cards",
            "--data", &data,
            "--output", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small, likely empty or corrupt");
}

#[test]
fn test_single_record_single_page() {
    let data = write_data(
        "rumors-single.json",
        r#"{"rumors":[{"id":1,"text":"X","possession":"baker"}]}"#,
    );
    let output_file = "test-cards-single.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "cards",
            "--data", &data,
            "--output", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pages: 1"), "Expected one page: {}", stdout);

    assert!(output_dir().join(output_file).exists(), "PDF file was not created");
}

#[test]
fn test_seven_records_roll_to_second_page() {
    // 3x2 grid at defaults: 6 cards per page, so 7 records need 2 pages
    let data = write_data("rumors-seven.json", &sample_rumors(7));
    let output_file = "test-cards-seven.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "cards",
            "--data", &data,
            "--output", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pages: 2"), "Expected two pages: {}", stdout);
}

#[test]
fn test_empty_record_list_fails() {
    let data = write_data("rumors-empty.json", r#"{"rumors":[]}"#);
    let output_file = "test-cards-empty.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "cards",
            "--data", &data,
            "--output", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for empty record list");
    assert!(!output_dir().join(output_file).exists(), "No PDF should be written");
}

#[test]
fn test_missing_data_file_fails() {
    let output = cargo_bin()
        .args([
            "cards",
            "--data", "nonexistent.json",
            "--output", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for missing data file");
}

#[test]
fn test_missing_image_warns_but_succeeds() {
    let data = write_data(
        "rumors-missing-image.json",
        r#"{"rumors":[{"id":1,"text":"A fact with lost artwork","possession":"doctor","image":"no_such_dir/lost.png"}]}"#,
    );
    let output_file = "test-cards-missing-image.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "cards",
            "--data", &data,
            "--output", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "A missing image must not fail the run: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("⚠️"), "Expected a warning line: {}", stdout);
    assert!(output_dir().join(output_file).exists(), "PDF file was not created");
}

#[test]
fn test_oversized_card_fails() {
    let data = write_data("rumors-oversized.json", &sample_rumors(1));

    let output = cargo_bin()
        .args([
            "cards",
            "--data", &data,
            "--output", "tests/output/should-not-exist-oversized.pdf",
            "--card-width", "9.0",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for oversized card");
}

#[test]
fn test_facts_key_and_custom_title() {
    let data = write_data(
        "facts-keyed.json",
        r#"{"facts":[{"id":1,"text":"The clock stopped at nine","possession":"clockmaker"}]}"#,
    );
    let output_file = "test-cards-facts.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "cards",
            "--data", &data,
            "--key", "facts",
            "--title", "SECRET",
            "--output", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(output_dir().join(output_file).exists(), "PDF file was not created");
}

#[test]
fn test_character_cards_with_qr_dir() {
    setup();
    let qr_dir = "tests/output/qr-characters";
    let output_file = "test-cards-characters.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "qr",
            "--type", "custom",
            "--url", "https://example.com/character/baker.html",
            "--name", "character_baker",
            "--output", qr_dir,
        ])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "QR generation failed: {:?}", output);

    let data = write_data(
        "characters.json",
        r#"{"characters":[{"id":"baker","title":"The Baker"}]}"#,
    );

    let output = cargo_bin()
        .args([
            "cards",
            "--data", &data,
            "--key", "characters",
            "--title", "CHARACTER",
            "--qr-dir", qr_dir,
            "--output", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("⚠️  Warning"), "QR should have been found: {}", stdout);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");
    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small");
}

#[test]
fn test_unknown_key_fails() {
    let data = write_data("rumors-key-typo.json", &sample_rumors(2));

    let output = cargo_bin()
        .args([
            "cards",
            "--data", &data,
            "--key", "rumor",
            "--output", "tests/output/should-not-exist-typo.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for a mistyped key");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rumor"), "Error should name the bad key: {}", stderr);
}

#[test]
fn test_qr_custom_generates_png() {
    setup();
    let qr_dir = "tests/output/qr-custom";

    let output = cargo_bin()
        .args([
            "qr",
            "--type", "custom",
            "--url", "https://example.com/clue/documents/prenup_agreement.html",
            "--name", "document_prenup_agreement",
            "--output", qr_dir,
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let png = Path::new(qr_dir).join("document_prenup_agreement.png");
    assert!(png.exists(), "QR PNG was not created");
}

#[test]
fn test_qr_custom_requires_url_and_name() {
    let output = cargo_bin()
        .args(["qr", "--type", "custom", "--output", "tests/output/qr-invalid"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed without --url/--name");
}

#[test]
fn test_qr_sheet_from_generated_codes() {
    setup();
    let qr_dir = "tests/output/qr-sheet-input";
    let output_file = "test-qr-sheet.pdf";
    cleanup_file(output_file);

    for name in ["alpha", "beta", "gamma"] {
        let output = cargo_bin()
            .args([
                "qr",
                "--type", "custom",
                "--url", &format!("https://example.com/{}.html", name),
                "--name", name,
                "--output", qr_dir,
            ])
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success(), "QR generation failed: {:?}", output);
    }

    let output = cargo_bin()
        .args([
            "qr-sheet",
            "--dir", qr_dir,
            "--output", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small");
}

#[test]
fn test_qr_sheet_empty_directory_fails() {
    setup();
    let qr_dir = "tests/output/qr-sheet-empty";
    fs::create_dir_all(qr_dir).unwrap();

    let output = cargo_bin()
        .args([
            "qr-sheet",
            "--dir", qr_dir,
            "--output", "tests/output/should-not-exist-sheet.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for an empty directory");
}
