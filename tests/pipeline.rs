//! End-to-end tests over the public API, with the remote call stubbed out.

use async_trait::async_trait;
use pdf2cards::pipeline::llm::ChatRequest;
use pdf2cards::{
    export_pdf, export_txt, generate, generate_from_text, CardStore, DeckSession, Flashcard,
    GenerationConfig, JsonFileStore, Pdf2CardsError, RemoteGenerator,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Remote double returning fixed content, counting calls.
struct StubGenerator {
    content: Result<String, u16>,
    calls: AtomicUsize,
}

impl StubGenerator {
    fn ok(content: &str) -> Arc<Self> {
        Arc::new(Self {
            content: Ok(content.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn http_error(status: u16) -> Arc<Self> {
        Arc::new(Self {
            content: Err(status),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl RemoteGenerator for StubGenerator {
    async fn complete(&self, _request: &ChatRequest) -> Result<String, Pdf2CardsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.content {
            Ok(content) => Ok(content.clone()),
            Err(status) => Err(Pdf2CardsError::Remote { status: *status }),
        }
    }
}

fn config_with(generator: Arc<dyn RemoteGenerator>) -> GenerationConfig {
    GenerationConfig::builder()
        .generator(generator)
        .build()
        .unwrap()
}

#[tokio::test]
async fn fenced_response_becomes_an_identified_deck() {
    let generator = StubGenerator::ok(
        "```json\n[{\"question\":\"Q1\",\"answer\":\"A1\"},{\"question\":\"Q2\",\"answer\":\"A2\"}]\n```",
    );
    let config = config_with(generator.clone());

    let output = generate_from_text("Photosynthesis converts light to energy.", &config)
        .await
        .unwrap();

    assert_eq!(output.cards.len(), 2);
    assert_eq!(output.cards[0].id, "flashcard-0");
    assert_eq!(output.cards[0].question, "Q1");
    assert_eq!(output.cards[1].id, "flashcard-1");
    assert!(output.warning.is_none());
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejection_sentinel_surfaces_the_model_reason() {
    let generator = StubGenerator::ok(
        r#"[{"name":"This content is not academic material","flashcardId":"invalid-input","cards":[]}]"#,
    );
    let config = config_with(generator);

    let err = generate_from_text("lol random text", &config).await.unwrap_err();
    match err {
        Pdf2CardsError::InvalidContent { reason } => {
            assert_eq!(reason, "This content is not academic material");
        }
        other => panic!("expected InvalidContent, got {other:?}"),
    }
}

#[tokio::test]
async fn http_500_reads_as_file_too_large() {
    let config = config_with(StubGenerator::http_error(500));

    let err = generate_from_text("some course text", &config).await.unwrap_err();
    assert!(matches!(err, Pdf2CardsError::Remote { status: 500 }));
    assert!(err.to_string().contains("too large"));
}

#[tokio::test]
async fn other_http_errors_keep_their_status_code() {
    let config = config_with(StubGenerator::http_error(429));

    let err = generate_from_text("some course text", &config).await.unwrap_err();
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn long_input_generates_with_a_truncation_warning() {
    let generator = StubGenerator::ok(r#"[{"question":"Q","answer":"A"}]"#);
    let config = config_with(generator);

    let text = "a".repeat(8000);
    let output = generate_from_text(&text, &config).await.unwrap();

    assert_eq!(output.cards.len(), 1);
    let warning = output.warning.expect("must warn about truncation");
    assert!(warning.contains("8000"));
    assert!(warning.contains("7000"));
    assert!(output.stats.truncated);
}

#[tokio::test]
async fn empty_input_produces_an_empty_deck_without_calling_out() {
    let generator = StubGenerator::ok("[]");
    let config = config_with(generator.clone());

    let output = generate_from_text("", &config).await.unwrap();

    assert!(output.cards.is_empty());
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_pdf_file_is_rejected_before_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.pdf");
    std::fs::write(&path, b"just a text file with a pdf extension").unwrap();

    let generator = StubGenerator::ok("[]");
    let config = config_with(generator.clone());

    let err = generate(&path, &config).await.unwrap_err();
    assert!(matches!(err, Pdf2CardsError::NotAPdf { .. }));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn deck_survives_a_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("flashcards.json"));

    let cards = vec![Flashcard {
        id: "flashcard-0".into(),
        question: "What is an enzyme?".into(),
        answer: "A biological catalyst.".into(),
    }];
    store.save(&cards);

    let reloaded = JsonFileStore::new(dir.path().join("flashcards.json"));
    assert_eq!(reloaded.load(), cards);
}

#[test]
fn exports_write_both_formats() {
    let dir = tempfile::tempdir().unwrap();
    let cards = vec![
        Flashcard {
            id: "flashcard-0".into(),
            question: "Q1".into(),
            answer: "A1".into(),
        },
        Flashcard {
            id: "flashcard-1".into(),
            question: "Q2".into(),
            answer: "A2".into(),
        },
    ];

    let txt_path = dir.path().join("deck.txt");
    export_txt(&cards, &txt_path).unwrap();
    let text = std::fs::read_to_string(&txt_path).unwrap();
    assert!(text.starts_with("1. Question: Q1"));
    assert!(text.contains("2. Question: Q2"));

    let pdf_path = dir.path().join("deck.pdf");
    export_pdf(&cards, &pdf_path).unwrap();
    assert!(std::fs::read(&pdf_path).unwrap().starts_with(b"%PDF"));
}

#[tokio::test]
async fn overlapping_generations_keep_the_newest_deck() {
    let session = DeckSession::new();

    let slow_ticket = session.begin();
    let fast_ticket = session.begin();

    // The later invocation settles first.
    let fast = generate_from_text(
        "newer text",
        &config_with(StubGenerator::ok(r#"[{"question":"new","answer":"new"}]"#)),
    )
    .await
    .unwrap();
    assert!(session.commit(fast_ticket, fast.cards));

    // The stale result arrives afterwards and is discarded.
    let slow = generate_from_text(
        "older text",
        &config_with(StubGenerator::ok(r#"[{"question":"old","answer":"old"}]"#)),
    )
    .await
    .unwrap();
    assert!(!session.commit(slow_ticket, slow.cards));

    assert_eq!(session.cards()[0].question, "new");
}
