//! The ordered keyword rule table for open-dialogue replies.
//!
//! Rule order IS the specification: the dispatcher scans this table top to
//! bottom and the first rule with any matching keyword wins. Reordering the
//! table changes observable behavior, so additions go at the position their
//! priority demands, never "wherever fits".

use serde::Serialize;

/// A single keyword rule: trigger substrings plus the canned reply template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseRule {
    /// Short label used in logs and tests.
    pub name: &'static str,
    /// A rule matches when any of these is a substring of the normalized
    /// (lowercased) input.
    pub keywords: &'static [&'static str],
    /// The reply returned when this rule wins.
    pub template: &'static str,
}

impl ResponseRule {
    /// Returns true if any keyword is a substring of the normalized input.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|kw| normalized.contains(kw))
    }
}

/// Reply when no rule matches. A miss is a defined terminal case, not an
/// error.
pub const FALLBACK_TEMPLATE: &str = "Thank you for sharing that. Could you tell me more about \
     your symptoms, for example when they started or how they've changed?";

/// The canonical rule table, in priority order:
/// duration, worsening, stable, improving, treatment, severity, lifestyle,
/// specialist, medication, how-many phrasing, pain, fever.
pub const CANONICAL_RULES: [ResponseRule; 12] = [
    ResponseRule {
        name: "duration",
        keywords: &["days", "weeks", "months", "since", "yesterday", "last night"],
        template: "Thanks for telling me how long this has been going on. Symptoms that \
             persist beyond a few days are worth mentioning to a clinician, so keep \
             tracking when they occur.",
    },
    ResponseRule {
        name: "worsening",
        keywords: &["worse", "worsening", "deteriorat", "getting bad"],
        template: "I'm sorry to hear it's been getting worse. A worsening trend is \
             important information. If the decline is rapid or severe, please seek \
             medical care promptly.",
    },
    ResponseRule {
        name: "stable",
        keywords: &["same", "unchanged", "stable", "no change", "not changed"],
        template: "Staying the same can still be uncomfortable. Stable symptoms are \
             usually less urgent, but keep noting anything new that appears.",
    },
    ResponseRule {
        name: "improving",
        keywords: &["better", "improving", "improved", "recovering", "clearing up"],
        template: "That's encouraging. If things keep improving, continue whatever is \
             working and finish any care plan you've started.",
    },
    ResponseRule {
        name: "treatment",
        keywords: &["treatment", "cure", "remedy", "how to treat", "what should i do", "heal"],
        template: "I can't prescribe treatment, but your report will help a clinician \
             recommend next steps. Rest and hydration are rarely a bad idea in the \
             meantime.",
    },
    ResponseRule {
        name: "severity",
        keywords: &["serious", "dangerous", "severe", "worried", "emergency", "scary"],
        template: "I understand the worry. I can't judge severity from text alone. If you \
             feel this could be an emergency, contact your local emergency services \
             right away.",
    },
    ResponseRule {
        name: "lifestyle",
        keywords: &["diet", "food", "eat", "exercise", "lifestyle", "sleep"],
        template: "Lifestyle can play a real part. Regular sleep, balanced meals and \
             gentle activity support most recoveries, unless a clinician has told you \
             otherwise.",
    },
    ResponseRule {
        name: "specialist",
        keywords: &["doctor", "specialist", "hospital", "clinic", "physician"],
        template: "Based on what you've shared, a consultation would be sensible. Your \
             intake summary is ready to share with a doctor of your choice.",
    },
    ResponseRule {
        name: "medication",
        keywords: &["medicine", "medication", "pill", "tablet", "drug", "painkiller", "dose"],
        template: "I can't advise on specific medication. Please check dosage guidance \
             with a pharmacist or doctor, and mention anything you already take.",
    },
    ResponseRule {
        name: "how-many",
        keywords: &["how many", "how long", "how much longer"],
        template: "It's hard to put a number on it from here. Duration varies a lot from \
             person to person; a clinician can give you a better estimate after an \
             examination.",
    },
    ResponseRule {
        name: "pain",
        keywords: &["pain", "hurt", "ache", "aching", "sore", "burning"],
        template: "Pain is your body asking for attention. Note where it sits, how strong \
             it feels on a scale of 1-10, and what makes it better or worse.",
    },
    ResponseRule {
        name: "fever",
        keywords: &["fever", "temperature", "chills", "sweats"],
        template: "With a fever, keep fluids up and rest. If your temperature stays high \
             or lasts more than three days, see a doctor.",
    },
];
