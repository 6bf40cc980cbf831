use crate::parsers::VideoMatch;
use std::collections::VecDeque;

/// What happened to one candidate sub-page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A video URL was extracted
    Found(VideoMatch),
    /// The page loaded but no pattern matched
    NotFound,
    /// The fetch itself failed
    Failed(String),
}

/// A candidate handed out by the queue; must be returned through `complete`
#[derive(Debug)]
pub struct Job {
    pub index: usize,
    pub url: String,
}

/// Report produced each time a job completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub index: usize,
    pub url: String,
    pub outcome: Outcome,
    pub processed: usize,
    pub total: usize,
}

/// Candidates waiting to be resolved, processed strictly one at a time
#[derive(Debug)]
pub struct ResolutionQueue {
    pending: VecDeque<String>,
    total: usize,
    processed: usize,
    in_flight: bool,
}

impl ResolutionQueue {
    pub fn new(candidates: Vec<String>) -> Self {
        let total = candidates.len();
        Self {
            pending: candidates.into(),
            total,
            processed: 0,
            in_flight: false,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn is_finished(&self) -> bool {
        self.processed == self.total
    }

    /// Hands out the next candidate in table order.
    ///
    /// Returns `None` once the queue is empty, or while the previous job has
    /// not been completed yet.
    pub fn next_job(&mut self) -> Option<Job> {
        if self.in_flight {
            ::log::warn!("Job requested while another is still in flight");
            return None;
        }
        let url = self.pending.pop_front()?;
        self.in_flight = true;
        Some(Job {
            index: self.processed,
            url,
        })
    }

    /// Records the outcome of the in-flight job and advances the counter
    pub fn complete(&mut self, job: Job, outcome: Outcome) -> Completion {
        self.in_flight = false;
        self.processed += 1;
        Completion {
            index: job.index,
            url: job.url,
            outcome,
            processed: self.processed,
            total: self.total,
        }
    }
}
