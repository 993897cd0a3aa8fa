//! The fixed Llama Guard 3 safety taxonomy.
//!
//! Thirteen category codes with human-readable labels. The table is ordered,
//! process-wide, and never mutated; prompts render it verbatim and the
//! response parser looks codes back up in it.

/// The closed S1–S13 taxonomy, in prompt order.
pub const SAFETY_CATEGORIES: &[(&str, &str)] = &[
    ("S1", "Violent Crimes"),
    ("S2", "Non-Violent Crimes"),
    ("S3", "Sex-Related Crimes"),
    ("S4", "Child Sexual Exploitation"),
    ("S5", "Defamation"),
    ("S6", "Specialized Advice"),
    ("S7", "Privacy"),
    ("S8", "Intellectual Property"),
    ("S9", "Indiscriminate Weapons"),
    ("S10", "Hate"),
    ("S11", "Suicide & Self-Harm"),
    ("S12", "Sexual Content"),
    ("S13", "Elections"),
];

/// Look up the label for a category code. Codes are matched exactly
/// (case-sensitive); anything outside the table is unknown.
pub fn label_for(code: &str) -> Option<&'static str> {
    SAFETY_CATEGORIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

/// Render the taxonomy as one `CODE: Label` line per category, in table
/// order. This exact block is embedded in the moderation prompt.
pub fn render_category_block() -> String {
    let mut block = String::new();
    for (i, (code, label)) in SAFETY_CATEGORIES.iter().enumerate() {
        if i > 0 {
            block.push('\n');
        }
        block.push_str(code);
        block.push_str(": ");
        block.push_str(label);
    }
    block
}
