//! Canned transcript fragments.
//!
//! The recorder's fragment source: a finite ordered list standing in for
//! real speech-to-text output. A real ASR engine replaces this list but
//! keeps the append-at-intervals contract.

/// The simulated transcription, one sentence per scheduled append.
pub fn demo_fragments() -> Vec<String> {
    [
        "In React, controlled components are those where form data is handled by React state.",
        "The component state becomes the single source of truth for the input value.",
        "Any changes to the input are reflected in state through onChange handlers.",
        "Uncontrolled components are where form data is handled by the DOM itself.",
        "Instead of using state, you would use refs to get values from the DOM.",
        "Controlled components provide more control but require more code to set up.",
        "Uncontrolled components are simpler but less predictable.",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}
