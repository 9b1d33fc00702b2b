//! Shared test mocks and utilities for the Millionaire quiz engine.

mod clock;
mod questions;
mod repository;
mod rng;

pub use clock::FixedClock;
pub use questions::{InMemoryQuestionRepository, generate_questions};
pub use repository::{FailingEventRepository, InMemoryEventRepository};
pub use rng::{MockRng, SequenceRng};
