use std::fs;
use std::path::Path;

use focusguard_core::artifact;
use focusguard_trainer::{Trainer, TrainerConfig, load_dataset};

const LABELS: &[&str] = &["distracting", "neutral", "productive"];

/// Write a small but varied activity dataset in the trainer's CSV format.
fn write_dataset(path: &Path) {
    let distracting = [
        ("Google Chrome", "YouTube - Funny cat compilation"),
        ("Google Chrome", "Netflix - Stranger Things"),
        ("Firefox", "Reddit - r/gaming"),
        ("Google Chrome", "Twitter / X - Home"),
        ("Safari", "Instagram"),
        ("Steam", "Counter-Strike 2"),
        ("Google Chrome", "twitch.tv - Live stream"),
        ("Firefox", "YouTube - Music mix"),
    ];
    let productive = [
        ("Code", "main.rs - focusguard"),
        ("Code", "lib.rs - focusguard"),
        ("Terminal", "cargo test --workspace"),
        ("IntelliJ IDEA", "Service.java - backend"),
        ("Google Chrome", "docs.rs - serde_json"),
        ("Notion", "Sprint planning"),
        ("Terminal", "git rebase main"),
        ("Code", "README.md - focusguard"),
    ];
    let neutral = [
        ("Slack", "#general - Acme"),
        ("Spotify", "Discover Weekly"),
        ("Mail", "Inbox (3)"),
        ("Calendar", "Week view"),
        ("Slack", "#random - Acme"),
        ("Finder", "Downloads"),
        ("Spotify", "Liked Songs"),
        ("Mail", "Newsletter, weekly digest"),
    ];

    let mut csv = String::from("app_name,window_title,category\n");
    for round in 0..3 {
        for (rows, label) in [
            (&distracting, "distracting"),
            (&productive, "productive"),
            (&neutral, "neutral"),
        ] {
            for (app, title) in rows.iter() {
                let title = format!("{title} {round}").replace('"', "\"\"");
                csv.push_str(&format!("{app},\"{title}\",{label}\n"));
            }
        }
    }
    fs::write(path, csv).unwrap();
}

fn config_in(dir: &Path, output: &str) -> TrainerConfig {
    TrainerConfig {
        data_path: dir.join("usage.csv"),
        output_path: dir.join(output),
        ..TrainerConfig::default()
    }
}

#[test]
fn test_dataset_loads() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(&dir.path().join("usage.csv"));

    let records = load_dataset(dir.path().join("usage.csv")).unwrap();
    assert_eq!(records.len(), 72);
    assert!(records.iter().any(|r| r.window_title == "Newsletter, weekly digest 0"));
}

#[test]
fn test_training_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(&dir.path().join("usage.csv"));

    let first = Trainer::new(config_in(dir.path(), "a.json")).run().unwrap();
    let second = Trainer::new(config_in(dir.path(), "b.json")).run().unwrap();

    assert_eq!(first.accuracy, second.accuracy);
    assert_eq!(first.report, second.report);
    assert_eq!(
        fs::read_to_string(dir.path().join("a.json")).unwrap(),
        fs::read_to_string(dir.path().join("b.json")).unwrap()
    );
}

#[test]
fn test_split_sizes_and_report() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(&dir.path().join("usage.csv"));

    let summary = Trainer::new(config_in(dir.path(), "model.json")).run().unwrap();
    // ceil(0.2 * 72) = 15
    assert_eq!(summary.test_size, 15);
    assert_eq!(summary.train_size, 57);
    assert_eq!(summary.report.support, 15);
    assert!((0.0..=1.0).contains(&summary.accuracy));
    assert!(summary.accuracy > 0.5);
}

#[test]
fn test_saved_model_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(&dir.path().join("usage.csv"));
    let config = config_in(dir.path(), "model.json");

    let records = load_dataset(&config.data_path).unwrap();
    let trainer = Trainer::new(config.clone());
    let (pipeline, _) = trainer.fit(&records).unwrap();
    trainer.save_model(&pipeline, &config.output_path).unwrap();

    let loaded = artifact::load(&config.output_path).unwrap();
    for input in ["chrome youtube.com", "Code main.rs", "", "Slack #general"] {
        let before = pipeline.predict(input);
        assert_eq!(loaded.predict(input), before);
        assert!(LABELS.contains(&before));
    }
}

#[test]
fn test_run_overwrites_previous_artifact() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(&dir.path().join("usage.csv"));
    let config = config_in(dir.path(), "model.json");
    fs::write(&config.output_path, "old model").unwrap();

    Trainer::new(config.clone()).run().unwrap();
    assert!(artifact::load(&config.output_path).is_ok());
}

#[test]
fn test_missing_dataset_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = Trainer::new(config_in(dir.path(), "model.json"))
        .run()
        .unwrap_err();
    assert!(format!("{err:#}").contains("usage.csv"));
    assert!(!dir.path().join("model.json").exists());
}
