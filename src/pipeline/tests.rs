use super::*;
use crate::history::HistoryError;
use crate::oracle::MockOracle;
use crate::ranking::RankingError;
use crate::selector::SelectionError;
use crate::snapshot::read_snapshot;
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn animal_oracle() -> MockOracle {
    MockOracle::new()
        .with_similarity("chat", "chien", 0.9)
        .with_similarity("chat", "table", 0.1)
        .with_similarity("chat", "voiture", 0.05)
}

struct Fixture {
    dir: TempDir,
    config: PipelineConfig,
}

impl Fixture {
    fn new(words: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("words.txt"), words).unwrap();
        let config = PipelineConfig::new(
            dir.path().join("words.txt"),
            dir.path().join("history.json"),
            dir.path().join("daily.json"),
        );
        Self { dir, config }
    }

    fn animals() -> Self {
        Self::new("chat\nchien\ntable\nvoiture\n")
    }

    fn pipeline(&self, oracle: MockOracle) -> DailyPipeline {
        DailyPipeline::new(self.config.clone(), Arc::new(oracle)).expect("valid pipeline")
    }

    fn write_history(&self, json: &str) {
        std::fs::write(self.dir.path().join("history.json"), json).unwrap();
    }

    fn read_history(&self) -> serde_json::Value {
        serde_json::from_str(
            &std::fs::read_to_string(self.dir.path().join("history.json")).unwrap(),
        )
        .unwrap()
    }
}

#[test]
fn test_recorded_word_is_ranked_and_written() {
    let fixture = Fixture::animals();
    fixture.write_history(r#"{"2024-01-01": "chat"}"#);

    let generation = fixture
        .pipeline(animal_oracle())
        .run(date("2024-01-01"))
        .expect("pipeline should succeed");

    assert!(!generation.is_fresh());
    assert_eq!(generation.origin, SelectionOrigin::Existing);
    assert_eq!(generation.snapshot.word, "chat");
    assert_eq!(generation.stats.candidates, 3);

    let written = read_snapshot(&fixture.dir.path().join("daily.json")).unwrap();
    assert_eq!(written, generation.snapshot);
    assert_eq!(written.date, "2024-01-01");

    let top: Vec<(&str, f64, Option<u32>)> = written
        .similarities
        .iter()
        .map(|r| (r.word.as_str(), r.similarity, r.rank))
        .collect();
    assert_eq!(
        top,
        vec![
            ("chien", 90.0, Some(2)),
            ("table", 10.0, Some(1)),
            ("voiture", 5.0, Some(0)),
        ]
    );
}

#[test]
fn test_fresh_word_is_recorded_before_snapshot() {
    let fixture = Fixture::animals();

    let generation = fixture
        .pipeline(MockOracle::new().with_default_similarity(0.3))
        .run(date("2024-03-15"))
        .unwrap();

    assert!(generation.is_fresh());
    let history = fixture.read_history();
    assert_eq!(history["2024-03-15"], generation.snapshot.word.as_str());
    assert_eq!(generation.snapshot.len(), 3);
    assert!(
        generation
            .snapshot
            .similarities
            .iter()
            .all(|r| r.word != generation.snapshot.word)
    );
}

#[test]
fn test_second_run_reuses_word() {
    let fixture = Fixture::animals();
    let pipeline = fixture.pipeline(MockOracle::new().with_default_similarity(0.3));

    let first = pipeline.run(date("2024-03-15")).unwrap();
    let second = pipeline.run(date("2024-03-15")).unwrap();

    assert!(first.is_fresh());
    assert!(!second.is_fresh());
    assert_eq!(first.snapshot, second.snapshot);
    assert_eq!(fixture.read_history().as_object().unwrap().len(), 1);
}

#[test]
fn test_consecutive_dates_extend_history() {
    let fixture = Fixture::animals();
    let pipeline = fixture.pipeline(MockOracle::new().with_default_similarity(0.3));

    pipeline.run(date("2024-03-15")).unwrap();
    pipeline.run(date("2024-03-16")).unwrap();

    let history = fixture.read_history();
    assert_eq!(history.as_object().unwrap().len(), 2);

    let snapshot = read_snapshot(&fixture.dir.path().join("daily.json")).unwrap();
    assert_eq!(snapshot.date, "2024-03-16");
}

#[test]
fn test_missing_wordlist() {
    let fixture = Fixture::animals();
    std::fs::remove_file(fixture.dir.path().join("words.txt")).unwrap();

    let err = fixture
        .pipeline(animal_oracle())
        .run(date("2024-01-01"))
        .unwrap_err();

    assert!(matches!(err, PipelineError::Wordlist(_)));
    assert_eq!(err.kind(), "wordlist");
}

#[test]
fn test_empty_wordlist_writes_nothing() {
    let fixture = Fixture::new("\n   \n");

    let err = fixture
        .pipeline(animal_oracle())
        .run(date("2024-01-01"))
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Selection(SelectionError::EmptyWordlist { .. })
    ));
    assert!(!fixture.dir.path().join("history.json").exists());
    assert!(!fixture.dir.path().join("daily.json").exists());
}

#[test]
fn test_corrupt_history_is_fatal() {
    let fixture = Fixture::animals();
    fixture.write_history("{ not json");

    let err = fixture
        .pipeline(animal_oracle())
        .run(date("2024-01-01"))
        .unwrap_err();

    match err {
        PipelineError::History { date, source } => {
            assert_eq!(date, "2024-01-01");
            assert!(matches!(source, HistoryError::Corrupt { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!fixture.dir.path().join("daily.json").exists());
}

#[test]
fn test_missing_target_vector_keeps_history_entry() {
    let fixture = Fixture::animals();
    fixture.write_history(r#"{"2024-01-01": "chat"}"#);

    let err = fixture
        .pipeline(animal_oracle().without_vector("chat"))
        .run(date("2024-01-01"))
        .unwrap_err();

    match err {
        PipelineError::Ranking { date, word, source } => {
            assert_eq!(date, "2024-01-01");
            assert_eq!(word, "chat");
            assert!(matches!(source, RankingError::MissingTargetVector { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(fixture.read_history()["2024-01-01"], "chat");
    assert!(!fixture.dir.path().join("daily.json").exists());
}

#[test]
fn test_normalize_adds_scores() {
    let fixture = Fixture::animals();
    fixture.write_history(r#"{"2024-01-01": "chat"}"#);
    let config = fixture.config.clone().with_normalize(true);
    let pipeline = DailyPipeline::new(config, Arc::new(animal_oracle())).unwrap();

    let generation = pipeline.run(date("2024-01-01")).unwrap();

    let scores: Vec<Option<f64>> = generation
        .snapshot
        .similarities
        .iter()
        .map(|r| r.score)
        .collect();
    assert_eq!(scores.first().copied().flatten(), Some(100.0));
    assert_eq!(scores.last().copied().flatten(), Some(0.0));
}

#[test]
fn test_threshold_and_top_k_apply() {
    let fixture = Fixture::animals();
    fixture.write_history(r#"{"2024-01-01": "chat"}"#);
    let config = fixture
        .config
        .clone()
        .with_ranker(RankerConfig::new(0.08, 1));
    let pipeline = DailyPipeline::new(config, Arc::new(animal_oracle())).unwrap();

    let generation = pipeline.run(date("2024-01-01")).unwrap();

    assert_eq!(generation.stats.below_threshold, 1);
    assert_eq!(generation.stats.matched, 2);
    assert_eq!(generation.snapshot.len(), 1);
    assert_eq!(generation.snapshot.similarities[0].word, "chien");
    assert_eq!(generation.snapshot.similarities[0].rank, Some(1));
}

#[test]
fn test_invalid_ranker_config_is_rejected() {
    let fixture = Fixture::animals();
    let config = fixture
        .config
        .clone()
        .with_ranker(RankerConfig::new(f64::NAN, 10));

    let err = DailyPipeline::new(config, Arc::new(animal_oracle())).unwrap_err();
    assert!(matches!(err, RankingError::InvalidConfig { .. }));
}

#[test]
fn test_from_config() {
    let config = Config {
        data_dir: "/srv/data".into(),
        min_similarity: 0.2,
        top_k: 50,
        normalize: true,
        ..Default::default()
    };

    let pipeline_config = PipelineConfig::from(&config);
    assert_eq!(
        pipeline_config.history_path,
        PathBuf::from("/srv/data/history.json")
    );
    assert_eq!(pipeline_config.ranker.min_similarity, 0.2);
    assert_eq!(pipeline_config.ranker.top_k, 50);
    assert!(pipeline_config.normalize);
}
