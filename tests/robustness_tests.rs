use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_malformed_commands_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "command, value, price").unwrap();
    writeln!(file, "start, 1, 100").unwrap();
    // Unknown command
    writeln!(file, "refund, 1").unwrap();
    // Not a coin of the table
    writeln!(file, "coin, 3").unwrap();
    // Coin without a value
    writeln!(file, "coin,").unwrap();
    writeln!(file, "coin, 100").unwrap();
    writeln!(file, "pay").unwrap();

    let mut cmd = Command::new(cargo_bin!("coin-terminal"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error processing command 2"))
        .stderr(predicate::str::contains("Unknown denomination"))
        .stderr(predicate::str::contains("Invalid command"))
        // No 100 seeded, one paid in
        .stdout(predicate::str::contains("\n100,1"));
}

#[test]
fn test_reused_ticket_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "command, value, price").unwrap();
    writeln!(file, "start, 1, 100").unwrap();
    writeln!(file, "coin, 100").unwrap();
    writeln!(file, "pay").unwrap();
    writeln!(file, "start, 1, 100").unwrap();

    let mut cmd = Command::new(cargo_bin!("coin-terminal"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Ticket #1 has already been processed"));
}

#[test]
fn test_missing_change_coin_keeps_payment_open() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "command, value, price").unwrap();
    writeln!(file, "start, 1, 450").unwrap();
    writeln!(file, "coin, 500").unwrap();
    writeln!(file, "pay").unwrap();

    let mut cmd = Command::new(cargo_bin!("coin-terminal"));
    cmd.arg(file.path()).arg("--initial-amount").arg("20000");

    // Only a 20000 coin in stock: no 50 to give back, so the payment is
    // cancelled at the end of input and the stock is untouched.
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Denomination exhausted"))
        .stderr(predicate::str::contains("cancelled at end of input"))
        .stdout(predicate::str::contains("20000,1"))
        .stdout(predicate::str::contains("\n500,0"));
}

#[test]
fn test_out_of_order_without_coins() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "command, value, price").unwrap();
    writeln!(file, "start, 1, 100").unwrap();
    writeln!(file, "coin, 100").unwrap();

    let mut cmd = Command::new(cargo_bin!("coin-terminal"));
    cmd.arg(file.path()).arg("--initial-amount").arg("0");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Machine out of order"))
        .stdout(predicate::str::contains("\n100,0"));
}

#[test]
fn test_exit_ignores_the_rest() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "command, value, price").unwrap();
    writeln!(file, "exit").unwrap();
    writeln!(file, "start, 1, 100").unwrap();
    writeln!(file, "coin, 100").unwrap();
    writeln!(file, "pay").unwrap();

    let mut cmd = Command::new(cargo_bin!("coin-terminal"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\n100,0"));
}
