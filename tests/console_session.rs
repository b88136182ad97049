use assert_cmd::Command;

#[test]
fn full_session_through_the_console_client() {
    let temp_dir = tempfile::tempdir().unwrap();
    let data_file = temp_dir.path().join("music_data.json");

    let script = "\
/start
➕ Create Playlist
Chill
cb select_playlist:Chill
audio A x.mp3
cb view_playlist:Chill
quit
";

    let mut cmd = Command::cargo_bin("mixtape").unwrap();
    cmd.arg("--data-file")
        .arg(&data_file)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicates::str::contains("🎵 Welcome!"))
        .stdout(predicates::str::contains("Playlist Chill created!"))
        .stdout(predicates::str::contains("✅ Song x.mp3 added to Chill!"))
        .stdout(predicates::str::contains("Songs in Chill:"));

    // The document survived the session, in the flat wire shape.
    let content = std::fs::read_to_string(&data_file).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(doc.get("console").is_some());
    assert_eq!(doc["console"]["Chill"][0]["file_id"], "A");
}

#[test]
fn corrupt_data_file_still_starts() {
    let temp_dir = tempfile::tempdir().unwrap();
    let data_file = temp_dir.path().join("music_data.json");
    std::fs::write(&data_file, "{ definitely not json").unwrap();

    let mut cmd = Command::cargo_bin("mixtape").unwrap();
    cmd.arg("--data-file")
        .arg(&data_file)
        .write_stdin("/start\nquit\n")
        .assert()
        .success()
        .stdout(predicates::str::contains("🎵 Welcome!"));
}
