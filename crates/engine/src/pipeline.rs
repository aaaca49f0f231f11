//! Debounced request pipeline.
//!
//! Every new [`FormState`] opens a generation. The dispatcher emits
//! [`RequestResult::Loading`] for it straight away, waits for the debounce
//! delay and then validates the form and calls the generator. A newer
//! generation aborts the pending task of the previous one; anything an older
//! generation still manages to send is dropped by [`Results`].

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    client::QrApi,
    form::{FormInput, FormState, FormTracker},
    request::build_query,
    response::map_reply,
    result::RequestResult,
    validation::validate,
};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct Outcome {
    generation: u64,
    result: RequestResult,
}

/// Validates `state` and, when valid, asks the generator for the image.
///
/// Invalid forms never reach the network.
pub async fn run<A: QrApi>(api: &A, state: &FormState) -> RequestResult {
    match validate(state) {
        Err(errors) => RequestResult::Failed(errors),
        Ok(payment) => map_reply(api.fetch(&build_query(&payment)).await),
    }
}

pub struct Dispatcher<A: QrApi> {
    api: Arc<A>,
    debounce: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Outcome>,
}

impl<A: QrApi> Dispatcher<A> {
    /// Starts a new generation for `state` and returns its number.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, state: FormState) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(task) = self.pending.take() {
            task.abort();
        }

        let _ = self.tx.send(Outcome {
            generation,
            result: RequestResult::Loading,
        });

        let api = Arc::clone(&self.api);
        let current = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        let debounce = self.debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let result = run(api.as_ref(), &state).await;

            if current.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "discarding superseded result");
                return;
            }
            tracing::debug!(generation, state = result.state().label(), "request settled");
            let _ = tx.send(Outcome { generation, result });
        }));

        generation
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl<A: QrApi> Drop for Dispatcher<A> {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

/// Receiving end of the pipeline.
///
/// Yields results of the latest generation only and never the same result
/// twice in a row.
#[derive(Debug)]
pub struct Results {
    rx: mpsc::UnboundedReceiver<Outcome>,
    generation: Arc<AtomicU64>,
    last: Option<RequestResult>,
}

impl Results {
    /// Waits for the next result. Returns `None` once the dispatcher is gone.
    pub async fn next(&mut self) -> Option<RequestResult> {
        loop {
            let outcome = self.rx.recv().await?;
            if let Some(result) = self.accept(outcome) {
                return Some(result);
            }
        }
    }

    /// Non-blocking variant of [`Results::next`] for render loops.
    pub fn try_next(&mut self) -> Option<RequestResult> {
        loop {
            let outcome = self.rx.try_recv().ok()?;
            if let Some(result) = self.accept(outcome) {
                return Some(result);
            }
        }
    }

    fn accept(&mut self, outcome: Outcome) -> Option<RequestResult> {
        if outcome.generation != self.generation.load(Ordering::SeqCst) {
            return None;
        }
        if self.last.as_ref() == Some(&outcome.result) {
            return None;
        }
        self.last = Some(outcome.result.clone());
        Some(outcome.result)
    }
}

/// Form tracker and dispatcher wired together.
pub struct Pipeline<A: QrApi> {
    tracker: FormTracker,
    dispatcher: Dispatcher<A>,
}

impl<A: QrApi> Pipeline<A> {
    pub fn new(api: Arc<A>, debounce: Duration) -> (Self, Results) {
        let (tx, rx) = mpsc::unbounded_channel();
        let generation = Arc::new(AtomicU64::new(0));

        let dispatcher = Dispatcher {
            api,
            debounce,
            generation: Arc::clone(&generation),
            pending: None,
            tx,
        };
        let results = Results {
            rx,
            generation,
            last: None,
        };

        (
            Self {
                tracker: FormTracker::default(),
                dispatcher,
            },
            results,
        )
    }

    /// Feeds the current raw form. Returns `true` when it started a new
    /// generation, `false` when the trimmed values did not change.
    pub fn on_input(&mut self, input: &FormInput) -> bool {
        match self.tracker.observe(input) {
            Some(state) => {
                self.dispatcher.dispatch(state);
                true
            }
            None => false,
        }
    }

    pub fn generation(&self) -> u64 {
        self.dispatcher.generation()
    }
}
