use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gcmcrypt(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gcmcrypt").unwrap();
    cmd.env("GCMCRYPT_CONFIG_DIR", config_dir)
        .env_remove("GCMCRYPT_PASSPHRASE")
        .env_remove("GCMCRYPT_LOG");
    cmd
}

fn write_input(dir: &TempDir, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join("plain.txt");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn keyfile_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, b"hello world");
    let key = dir.path().join("aes.key");
    let sealed = dir.path().join("plain.enc");
    let opened = dir.path().join("plain.out");

    gcmcrypt(dir.path())
        .args(["gen-key", "--bits", "256"])
        .arg(&key)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 256-bit key to:"));

    gcmcrypt(dir.path())
        .arg("encrypt")
        .arg(&input)
        .arg(&sealed)
        .arg("--keyfile")
        .arg(&key)
        .assert()
        .success();

    let payload = fs::read_to_string(&sealed).unwrap();
    assert_eq!(payload.trim().split(':').count(), 2);

    gcmcrypt(dir.path())
        .arg("decrypt")
        .arg(&sealed)
        .arg(&opened)
        .arg("--keyfile")
        .arg(&key)
        .assert()
        .success();

    assert_eq!(fs::read(&opened).unwrap(), b"hello world");
}

#[test]
fn new_key_mode_writes_key_and_payload() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, b"random key mode");
    let key = dir.path().join("fresh.key");
    let sealed = dir.path().join("plain.enc");
    let opened = dir.path().join("plain.out");

    gcmcrypt(dir.path())
        .arg("encrypt")
        .arg(&input)
        .arg(&sealed)
        .arg("--new-key")
        .arg(&key)
        .args(["--bits", "128"])
        .assert()
        .success();

    assert!(key.exists());

    gcmcrypt(dir.path())
        .arg("decrypt")
        .arg(&sealed)
        .arg(&opened)
        .arg("--keyfile")
        .arg(&key)
        .assert()
        .success();

    assert_eq!(fs::read(&opened).unwrap(), b"random key mode");
}

#[test]
fn passphrase_round_trip_and_wrong_passphrase() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, b"secret data");
    let sealed = dir.path().join("plain.enc");
    let opened = dir.path().join("plain.out");

    gcmcrypt(dir.path())
        .env("GCMCRYPT_PASSPHRASE", "correct horse")
        .arg("encrypt")
        .arg(&input)
        .arg(&sealed)
        .arg("--passphrase")
        .assert()
        .success();

    let payload = fs::read_to_string(&sealed).unwrap();
    assert_eq!(payload.trim().split(':').count(), 3);

    gcmcrypt(dir.path())
        .env("GCMCRYPT_PASSPHRASE", "correct horse")
        .arg("decrypt")
        .arg(&sealed)
        .arg(&opened)
        .arg("--passphrase")
        .assert()
        .success();

    assert_eq!(fs::read(&opened).unwrap(), b"secret data");

    gcmcrypt(dir.path())
        .env("GCMCRYPT_PASSPHRASE", "wrong horse")
        .arg("decrypt")
        .arg(&sealed)
        .arg(dir.path().join("never.out"))
        .arg("--passphrase")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Authentication failed"))
        .stderr(predicate::str::contains("horse").not());

    assert!(!dir.path().join("never.out").exists());
}

#[test]
fn tampered_payload_fails_authentication() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, b"do not touch");
    let key = dir.path().join("aes.key");
    let sealed = dir.path().join("plain.enc");

    gcmcrypt(dir.path())
        .arg("encrypt")
        .arg(&input)
        .arg(&sealed)
        .arg("--new-key")
        .arg(&key)
        .assert()
        .success();

    // Swap the first ciphertext character for a different base64 digit
    let payload = fs::read_to_string(&sealed).unwrap();
    let (nonce, ciphertext) = payload.trim().split_once(':').unwrap();
    let mut chars: Vec<char> = ciphertext.chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    let tampered = format!("{}:{}", nonce, chars.into_iter().collect::<String>());
    fs::write(&sealed, tampered).unwrap();

    gcmcrypt(dir.path())
        .arg("decrypt")
        .arg(&sealed)
        .arg(dir.path().join("out"))
        .arg("--keyfile")
        .arg(&key)
        .assert()
        .code(7);
}

#[test]
fn malformed_payload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("aes.key");
    let sealed = dir.path().join("bad.enc");
    fs::write(&sealed, "onlyonesegment").unwrap();

    gcmcrypt(dir.path()).arg("gen-key").arg(&key).assert().success();

    gcmcrypt(dir.path())
        .arg("decrypt")
        .arg(&sealed)
        .arg(dir.path().join("out"))
        .arg("--keyfile")
        .arg(&key)
        .assert()
        .code(6)
        .stderr(predicate::str::contains("Malformed payload"));
}

#[test]
fn non_utf8_payload_is_malformed() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("aes.key");
    let sealed = dir.path().join("bad.enc");
    fs::write(&sealed, [0xff, 0xfe, b':', b'A']).unwrap();

    gcmcrypt(dir.path()).arg("gen-key").arg(&key).assert().success();

    gcmcrypt(dir.path())
        .arg("decrypt")
        .arg(&sealed)
        .arg(dir.path().join("out"))
        .arg("--keyfile")
        .arg(&key)
        .assert()
        .code(6)
        .stderr(predicate::str::contains("Malformed payload"));
}

#[test]
fn short_nonce_is_rejected() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("aes.key");
    let sealed = dir.path().join("bad.enc");
    fs::write(&sealed, "AAAA:AAAAAAAAAAAAAAAAAAAAAA==\n").unwrap();

    gcmcrypt(dir.path()).arg("gen-key").arg(&key).assert().success();

    gcmcrypt(dir.path())
        .arg("decrypt")
        .arg(&sealed)
        .arg(dir.path().join("out"))
        .arg("--keyfile")
        .arg(&key)
        .assert()
        .code(5);
}

#[test]
fn unsupported_key_size_is_rejected() {
    let dir = TempDir::new().unwrap();

    gcmcrypt(dir.path())
        .args(["gen-key", "--bits", "192"])
        .arg(dir.path().join("aes.key"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("128 or 256"));

    assert!(!dir.path().join("aes.key").exists());
}

#[test]
fn wrong_length_key_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, b"data");
    let key = dir.path().join("short.key");
    // base64 of 10 bytes
    fs::write(&key, "AAAAAAAAAAAAAA==\n").unwrap();

    gcmcrypt(dir.path())
        .arg("encrypt")
        .arg(&input)
        .arg(dir.path().join("out.enc"))
        .arg("--keyfile")
        .arg(&key)
        .assert()
        .code(4);
}

#[test]
fn passphrase_payload_needs_passphrase() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, b"data");
    let key = dir.path().join("aes.key");
    let sealed = dir.path().join("plain.enc");

    gcmcrypt(dir.path()).arg("gen-key").arg(&key).assert().success();

    gcmcrypt(dir.path())
        .env("GCMCRYPT_PASSPHRASE", "correct horse")
        .args(["encrypt", "--bits", "128", "--passphrase"])
        .arg(&input)
        .arg(&sealed)
        .assert()
        .success();

    gcmcrypt(dir.path())
        .arg("decrypt")
        .arg(&sealed)
        .arg(dir.path().join("out"))
        .arg("--keyfile")
        .arg(&key)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("passphrase mode"));
}

#[test]
fn empty_passphrase_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, b"data");

    gcmcrypt(dir.path())
        .env("GCMCRYPT_PASSPHRASE", "")
        .arg("encrypt")
        .arg(&input)
        .arg(dir.path().join("out.enc"))
        .arg("--passphrase")
        .assert()
        .code(3);
}

#[test]
fn missing_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("aes.key");

    gcmcrypt(dir.path()).arg("gen-key").arg(&key).assert().success();

    gcmcrypt(dir.path())
        .arg("encrypt")
        .arg(dir.path().join("missing.txt"))
        .arg(dir.path().join("out.enc"))
        .arg("--keyfile")
        .arg(&key)
        .assert()
        .code(8);
}

#[test]
fn key_source_is_required() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, b"data");

    gcmcrypt(dir.path())
        .arg("encrypt")
        .arg(&input)
        .arg(dir.path().join("out.enc"))
        .assert()
        .code(2);
}

#[test]
fn default_key_size_comes_from_settings() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"default_key_bits": 128}"#,
    )
    .unwrap();

    gcmcrypt(dir.path())
        .arg("gen-key")
        .arg(dir.path().join("aes.key"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 128-bit key"));

    gcmcrypt(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema version:     1"))
        .stdout(predicate::str::contains("Default key size:   128 bits"))
        .stdout(predicate::str::contains("200000"));
}
