mod common;

#[test]
fn test_generate_commands() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("generated.csv");
    common::generate_commands(&path, 5).expect("Failed to generate commands");

    let content = std::fs::read_to_string(&path).expect("Failed to read file");
    // Header + 5 tickets of start, three coins and pay
    assert_eq!(content.lines().count(), 1 + 5 * 5);
    assert!(content.lines().nth(1).unwrap().starts_with("start,1,450"));
}
