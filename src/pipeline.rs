//! The generate → enrich pipeline and its dispatcher.
//!
//! One [`Pipeline::run`] draws a value, fetches its enrichment and returns
//! the [`Output`] to render. Enrichment failures are substituted with a
//! fixed message inside the run; only a failure to produce a value at all
//! surfaces as an error, which the caller renders as [`FALLBACK`].
//!
//! The [`Dispatcher`] runs pipelines in the background and guarantees that
//! the latest request wins: submitting a new request cancels the one in
//! flight, and any result that still arrives for a superseded ticket is
//! dropped.

use std::{fmt, sync::Arc};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    api::{dictionary, random_word, trivia},
    config::{Config, Endpoints},
    error::{Error, Result},
    http,
    options::{Range, WordLength},
    rand,
};

/// Shown when the pipeline fails as a whole.
pub const FALLBACK: &str = "Sorry, we couldn't fetch the data.";

/// Label rendered above a generated number.
pub const NUMBER_LABEL: &str = "Your generated number is:";

/// Label rendered above a generated word.
pub const WORD_LABEL: &str = "Your generated word is:";

/// What to generate, with the options current at the time of the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Request {
    Number(Range),
    Word(WordLength),
}

/// A generated value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Number(i64),
    Word(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Word(word) => write!(f, "{word}"),
        }
    }
}

/// Everything one run renders.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Output {
    pub label: &'static str,
    pub value: Value,

    /// Heading above the enrichment: the capitalized word, if any.
    pub heading: Option<String>,

    /// Trivia or definition.
    pub text: String,
}

pub struct Pipeline {
    client: http::Client,
    endpoints: Endpoints,
    part_of_speech: bool,
}

impl Pipeline {
    /// Creates a pipeline with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the HTTP client cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http::Client::new(config)?,
            endpoints: config.endpoints.clone(),
            part_of_speech: config.part_of_speech,
        })
    }

    /// Produces a value for `request`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a random word could not be fetched. Numbers are
    /// drawn locally and never fail.
    pub async fn generate(&self, request: Request) -> Result<Value> {
        match request {
            Request::Number(range) => {
                let n = rand::draw(range);
                debug!("drew {n} from {range}");
                Ok(Value::Number(n))
            }
            Request::Word(length) => {
                match random_word::fetch(&self.client, &self.endpoints.random_word, length).await {
                    Ok(word) => {
                        debug!("fetched word {word:?} of length {length}");
                        Ok(Value::Word(word))
                    }
                    Err(e) => {
                        error!("error fetching word: {e}");
                        Err(e)
                    }
                }
            }
        }
    }

    /// Fetches the enrichment text for `value`.
    ///
    /// Never fails: errors are logged and replaced with the fallback message
    /// of the API that failed.
    pub async fn enrich(&self, value: &Value) -> String {
        match value {
            Value::Number(n) => {
                match trivia::fetch(&self.client, &self.endpoints.trivia, *n).await {
                    Ok(text) => text,
                    Err(e) => {
                        error!("error fetching trivia: {e}");
                        trivia::FALLBACK.to_owned()
                    }
                }
            }
            Value::Word(word) => {
                let word = dictionary::capitalize(word);
                match dictionary::lookup(&self.client, &self.endpoints.dictionary, &word).await {
                    Ok(sense) => sense.describe(self.part_of_speech),
                    Err(e) => {
                        error!("error fetching definition: {e}");
                        dictionary::FALLBACK.to_owned()
                    }
                }
            }
        }
    }

    /// Generates and enriches one value.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    pub async fn run(&self, request: Request) -> Result<Output> {
        let value = self.generate(request).await?;
        let text = self.enrich(&value).await;

        let (label, heading) = match &value {
            Value::Number(_) => (NUMBER_LABEL, None),
            Value::Word(word) => (WORD_LABEL, Some(dictionary::capitalize(word))),
        };

        Ok(Output {
            label,
            value,
            heading,
            text,
        })
    }

    /// Like [`run`](Self::run), but gives up as soon as `token` is cancelled.
    ///
    /// # Errors
    ///
    /// Will return `Err` with [`ErrorKind::Cancelled`](crate::error::ErrorKind::Cancelled)
    /// when cancelled, or see [`generate`](Self::generate).
    pub async fn run_until_cancelled(
        &self,
        request: Request,
        token: CancellationToken,
    ) -> Result<Output> {
        tokio::select! {
            biased;

            () = token.cancelled() => Err(Error::cancelled("superseded by a newer request")),
            output = self.run(request) => output,
        }
    }

    /// Builds the Wordnik page URL for `word`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configured Wordnik URL cannot be a base.
    pub fn wordnik_url(&self, word: &str) -> Result<url::Url> {
        dictionary::wordnik_url(&self.endpoints.wordnik, word)
    }
}

/// Result of one dispatched run.
#[derive(Debug)]
pub struct Completion {
    pub ticket: u64,
    pub result: Result<Output>,
}

/// Runs pipelines in the background, latest request wins.
pub struct Dispatcher {
    pipeline: Arc<Pipeline>,
    next_ticket: u64,
    current: Option<(u64, CancellationToken)>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(pipeline: Pipeline) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            pipeline: Arc::new(pipeline),
            next_ticket: 0,
            current: None,
            tx,
            rx,
        }
    }

    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Whether a run is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// Starts a run for `request`, cancelling the one in flight.
    ///
    /// Returns the ticket of the new run.
    pub fn submit(&mut self, request: Request) -> u64 {
        self.cancel();

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let token = CancellationToken::new();
        self.current = Some((ticket, token.clone()));

        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = pipeline.run_until_cancelled(request, token).await;
            // Receiver is gone only when the dispatcher is dropped.
            let _ = tx.send(Completion { ticket, result });
        });

        trace!("submitted run {ticket}: {request:?}");
        ticket
    }

    /// Cancels the run in flight, if any.
    pub fn cancel(&mut self) {
        if let Some((ticket, token)) = self.current.take() {
            debug!("cancelling run {ticket}");
            token.cancel();
        }
    }

    /// Waits for the current run to complete.
    ///
    /// Completions of superseded runs are dropped. Pending forever while
    /// nothing is in flight, which makes this suitable for `select!`.
    /// Cancel-safe.
    pub async fn completed(&mut self) -> Completion {
        loop {
            // `self` holds a sender, so the channel never closes.
            let Some(completion) = self.rx.recv().await else {
                std::future::pending::<()>().await;
                continue;
            };

            match self.current {
                Some((ticket, _)) if ticket == completion.ticket => {
                    self.current = None;
                    return completion;
                }
                _ => trace!("dropping stale run {}", completion.ticket),
            }
        }
    }
}
