//! Millionaire — PostgreSQL persistence.
//!
//! Event streams live in `domain_events`; the question pool lives in
//! `questions`. Both tables are created by the workspace `migrations/`.

pub mod pg_event_repository;
pub mod pg_question_repository;
