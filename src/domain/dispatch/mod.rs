//! Keyword-driven response dispatch for the open-dialogue phase.

mod dispatcher;
mod rules;

pub use dispatcher::Dispatcher;
pub use rules::{ResponseRule, CANONICAL_RULES, FALLBACK_TEMPLATE};
