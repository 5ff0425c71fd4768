use std::fs;

use baloot_bench::config::BenchmarkConfig;
use baloot_bench::tournament::TournamentRunner;
use tempfile::tempdir;

fn load_config(output_dir: &std::path::Path) -> BenchmarkConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
rounds:
  seed: 4242
  per_matchup: 6
agents:
  - name: "baseline"
    personality: "Balanced"
    difficulty: "Medium"
  - name: "easy"
    personality: "Balanced"
    difficulty: "Easy"
  - name: "expert"
    personality: "Aggressive"
    difficulty: "Expert"
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
  plots_dir: "{plots}"
metrics:
  baseline: "baseline"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("rounds.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
        plots = output_dir.join("plots").display()
    );

    let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

#[test]
fn tournament_smoke_test_produces_a_full_output_bundle() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path());
    let outputs = config.resolved_outputs();

    let runner = TournamentRunner::new(config, outputs.clone());
    let summary = runner.run().expect("tournament completes");

    // 3 agents -> 3 unordered pairs, each agent gets one bid-rate sample.
    assert_eq!(summary.matchups.len(), 3);
    assert_eq!(summary.bid_rates.len(), 3);
    for m in &summary.matchups {
        assert_eq!(m.rounds, 6);
        assert!(m.wins_a <= m.rounds);
    }

    let jsonl = fs::read_to_string(&outputs.jsonl).expect("jsonl readable");
    assert_eq!(jsonl.lines().count(), 3);
    for line in jsonl.lines() {
        let value: serde_json::Value = serde_json::from_str(line).expect("row decodes to JSON");
        assert!(value.get("agent_a").is_some());
        assert!(value.get("win_rate_a").is_some());
    }

    assert!(outputs.summary_md.exists(), "summary markdown missing");
    let summary_text = fs::read_to_string(&outputs.summary_md).expect("summary readable");
    assert!(summary_text.contains("Matchup win rates"));
    assert!(summary_text.contains("Bid rate on borderline hands"));

    assert!(
        outputs.plots_dir.join("win_rates.png").exists(),
        "win-rate plot missing"
    );
}

#[test]
fn tournament_smoke_test_is_deterministic_given_the_same_config() {
    let dir = tempdir().expect("temp dir");
    let config_a = load_config(dir.path());
    let outputs_a = config_a.resolved_outputs();
    let summary_a = TournamentRunner::new(config_a, outputs_a)
        .run()
        .expect("first run completes");

    let dir2 = tempdir().expect("second temp dir");
    let config_b = load_config(dir2.path());
    let outputs_b = config_b.resolved_outputs();
    let summary_b = TournamentRunner::new(config_b, outputs_b)
        .run()
        .expect("second run completes");

    for (a, b) in summary_a.matchups.iter().zip(summary_b.matchups.iter()) {
        assert_eq!(a.wins_a, b.wins_a);
    }
    for (a, b) in summary_a.bid_rates.iter().zip(summary_b.bid_rates.iter()) {
        assert_eq!(a.bids, b.bids);
    }
}
