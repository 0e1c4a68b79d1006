//! Pitchside Intent - Rule-based message interpretation
//!
//! Classifies a football question into an intent with an ordered table of
//! regular expressions, then extracts players, clubs, competitions,
//! positions, numbers and comparison operands with vocabulary lookups and
//! name plausibility heuristics.
//!
//! The processor is synchronous and holds no per-call state; share it
//! behind a lock when patterns are added at runtime.

pub mod entities;
pub mod names;
pub mod patterns;
pub mod processor;
pub mod vocabulary;

pub use entities::EntityExtractor;
pub use patterns::{CompiledPattern, IntentRule, PatternTable};
pub use processor::{apply_context, score, InputRejection, IntentProcessor};
