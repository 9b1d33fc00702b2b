//! Millionaire Core — shared domain abstractions.
//!
//! This crate defines the traits and types every bounded context of the quiz
//! engine depends on: aggregates, events, the event repository seam, and the
//! injected clock and random source. It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod repository;
pub mod rng;
