//! ResponseDispatcher - first-match-wins keyword scan over the rule table.
//!
//! Deliberately not a scored or hash-based matcher: declared order is the
//! tie-break, and callers rely on exactly that.

use super::rules::{ResponseRule, CANONICAL_RULES, FALLBACK_TEMPLATE};

/// Selects a canned reply template for free text.
///
/// Total: an input that matches no rule gets the fallback template. Holds no
/// state between calls.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    rules: Vec<ResponseRule>,
    fallback: &'static str,
}

impl Dispatcher {
    /// Creates a dispatcher over the canonical rule table.
    pub fn new() -> Self {
        Self::with_rules(CANONICAL_RULES.to_vec())
    }

    /// Creates a dispatcher over a custom ordered rule list. Order is
    /// meaningful; the list is scanned front to back.
    pub fn with_rules(rules: Vec<ResponseRule>) -> Self {
        Self {
            rules,
            fallback: FALLBACK_TEMPLATE,
        }
    }

    /// Returns the ordered rule list.
    pub fn rules(&self) -> &[ResponseRule] {
        &self.rules
    }

    /// Picks the reply for the given free text.
    ///
    /// Lowercases the input, scans rules in declared order, returns the
    /// first match's template, or the fallback when nothing matches.
    pub fn respond(&self, text: &str) -> &'static str {
        let normalized = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.template)
            .unwrap_or(self.fallback)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
