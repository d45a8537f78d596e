mod common;

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use common::{Reply, DOG};
use genum::{
    api::{dictionary, trivia},
    error::ErrorKind,
    options::{Range, WordLength},
    pipeline::{Dispatcher, Output, Pipeline, Request, Value, NUMBER_LABEL, WORD_LABEL},
};

fn only(n: i64) -> Request {
    Request::Number(Range::new(n, n).unwrap())
}

fn three_letters() -> Request {
    Request::Word(WordLength::new(3).unwrap())
}

#[tokio::test]
async fn trivia_is_rendered_verbatim() {
    let base = common::serve(|target| match target {
        "/trivia/42" => Reply::text("42 is an answer."),
        _ => Reply::status(500, "unexpected"),
    })
    .await;
    let pipeline = Pipeline::new(&common::config(&base)).unwrap();

    let output = pipeline.run(only(42)).await.unwrap();
    assert_eq!(
        output,
        Output {
            label: NUMBER_LABEL,
            value: Value::Number(42),
            heading: None,
            text: "42 is an answer.".to_owned(),
        }
    );
}

#[tokio::test]
async fn numbers_stay_in_range() {
    let base = common::serve(|_| Reply::text("a number")).await;
    let pipeline = Pipeline::new(&common::config(&base)).unwrap();

    let range = Range::new(-3, 3).unwrap();
    for _ in 0..100 {
        let Value::Number(n) = pipeline.generate(Request::Number(range)).await.unwrap() else {
            panic!("expected a number");
        };
        assert!(range.contains(n));
    }
}

#[tokio::test]
async fn trivia_errors_become_fallback() {
    let base = common::serve(|_| Reply::status(500, "oops")).await;
    let pipeline = Pipeline::new(&common::config(&base)).unwrap();

    let output = pipeline.run(only(7)).await.unwrap();
    assert_eq!(output.value, Value::Number(7));
    assert_eq!(output.text, trivia::FALLBACK);
}

#[tokio::test]
async fn unreachable_trivia_becomes_fallback() {
    let base = common::unreachable().await;
    let pipeline = Pipeline::new(&common::config(&base)).unwrap();

    let output = pipeline.run(only(7)).await.unwrap();
    assert_eq!(output.text, trivia::FALLBACK);
}

#[tokio::test]
async fn word_is_defined_with_part_of_speech() {
    let base = common::serve(|target| match target {
        "/api?words=1&length=3" => Reply::json(r#"["dog"]"#),
        "/api/v2/entries/en/Dog" => Reply::json(DOG),
        _ => Reply::not_found(),
    })
    .await;
    let pipeline = Pipeline::new(&common::config(&base)).unwrap();

    let output = pipeline.run(three_letters()).await.unwrap();
    assert_eq!(
        output,
        Output {
            label: WORD_LABEL,
            value: Value::Word("dog".to_owned()),
            heading: Some("Dog".to_owned()),
            text: "(noun) a domesticated carnivorous mammal".to_owned(),
        }
    );
}

#[tokio::test]
async fn part_of_speech_can_be_left_out() {
    let base = common::serve(|target| match target {
        "/api?words=1&length=3" => Reply::json(r#"["dog"]"#),
        "/api/v2/entries/en/Dog" => Reply::json(DOG),
        _ => Reply::not_found(),
    })
    .await;
    let mut config = common::config(&base);
    config.part_of_speech = false;
    let pipeline = Pipeline::new(&config).unwrap();

    let output = pipeline.run(three_letters()).await.unwrap();
    assert_eq!(output.text, "a domesticated carnivorous mammal");
}

#[tokio::test]
async fn unknown_words_get_fallback_definition() {
    let base = common::serve(|target| match target {
        "/api?words=1&length=3" => Reply::json(r#"["zzz"]"#),
        _ => Reply::not_found(),
    })
    .await;
    let pipeline = Pipeline::new(&common::config(&base)).unwrap();

    let output = pipeline.run(three_letters()).await.unwrap();
    assert_eq!(output.value, Value::Word("zzz".to_owned()));
    assert_eq!(output.text, dictionary::FALLBACK);
}

#[tokio::test]
async fn entries_without_definitions_get_fallback() {
    let base = common::serve(|target| match target {
        "/api?words=1&length=3" => Reply::json(r#"["dog"]"#),
        _ => Reply::json(r#"[{"word": "dog", "meanings": []}]"#),
    })
    .await;
    let pipeline = Pipeline::new(&common::config(&base)).unwrap();

    let output = pipeline.run(three_letters()).await.unwrap();
    assert_eq!(output.text, dictionary::FALLBACK);
}

#[tokio::test]
async fn missing_word_aborts() {
    let base = common::serve(|_| Reply::json("[]")).await;
    let pipeline = Pipeline::new(&common::config(&base)).unwrap();

    let err = pipeline.run(three_letters()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn malformed_word_list_aborts() {
    let base = common::serve(|_| Reply::text("not json")).await;
    let pipeline = Pipeline::new(&common::config(&base)).unwrap();

    assert!(pipeline.run(three_letters()).await.is_err());
}

#[tokio::test]
async fn cancelled_runs_end_early() {
    let base = common::serve(|_| Reply::text("slow").delayed(Duration::from_secs(30))).await;
    let pipeline = Pipeline::new(&common::config(&base)).unwrap();

    let token = CancellationToken::new();
    token.cancel();
    let err = pipeline.run_until_cancelled(only(1), token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Cancelled);
}

#[tokio::test]
async fn latest_request_wins() {
    let base = common::serve(|target| match target {
        "/trivia/1" => Reply::text("1 is slow.").delayed(Duration::from_secs(2)),
        "/trivia/2" => Reply::text("2 is fast."),
        _ => Reply::status(500, "unexpected"),
    })
    .await;
    let mut dispatcher = Dispatcher::new(Pipeline::new(&common::config(&base)).unwrap());

    let first = dispatcher.submit(only(1));
    let second = dispatcher.submit(only(2));
    assert!(second > first);

    let completion = dispatcher.completed().await;
    assert_eq!(completion.ticket, second);
    assert_eq!(completion.result.unwrap().text, "2 is fast.");
    assert!(!dispatcher.is_busy());

    // The superseded run never completes.
    let stale = tokio::time::timeout(Duration::from_millis(300), dispatcher.completed()).await;
    assert!(stale.is_err());
}

#[tokio::test]
async fn superseded_slow_run_is_dropped_even_if_it_finishes() {
    let base = common::serve(|target| match target {
        "/trivia/1" => Reply::text("1 is quick."),
        "/trivia/2" => Reply::text("2 is slower.").delayed(Duration::from_millis(300)),
        _ => Reply::status(500, "unexpected"),
    })
    .await;
    let mut dispatcher = Dispatcher::new(Pipeline::new(&common::config(&base)).unwrap());

    dispatcher.submit(only(1));
    let second = dispatcher.submit(only(2));

    let completion = dispatcher.completed().await;
    assert_eq!(completion.ticket, second);
    assert_eq!(completion.result.unwrap().text, "2 is slower.");
}
