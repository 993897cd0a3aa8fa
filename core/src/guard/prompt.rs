//! Prompt construction for the moderation and code-review pipelines.
//!
//! Both prompts are pure functions of their inputs plus the immutable
//! category table. Content is substituted without escaping, so text
//! containing the framing tokens is trusted to be pre-sanitized by the
//! caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::categories::render_category_block;

/// Which conversation slot the content is classified under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[default]
    User,
    Agent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("User"),
            Role::Agent => f.write_str("Agent"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Role::User),
            "Agent" => Ok(Role::Agent),
            other => Err(format!("invalid role '{other}' (expected User or Agent)")),
        }
    }
}

/// Build the Llama Guard 3 moderation prompt for one piece of content.
///
/// The instruction suffix dictates the two-line response shape the parser
/// depends on: first line `safe` or `unsafe`, optional second line with
/// comma-separated category codes. The trailing
/// `assistant<|end_header_id|>` anchor is what
/// [`super::parse::DEFAULT_ECHO_MARKER`] strips back out of echoed output.
pub fn moderation_prompt(content: &str, role: Role) -> String {
    let categories = render_category_block();

    format!(
        r"<|begin_of_text|><|start_header_id|>user<|end_header_id|>

Task: Check if there is unsafe content in '{role}' messages in conversations according to our safety policy with the below categories.

<BEGIN UNSAFE CONTENT CATEGORIES>
{categories}
<END UNSAFE CONTENT CATEGORIES>

<BEGIN CONVERSATION>

{role}: {content}

<END CONVERSATION>

Provide your safety assessment for {role} in the above conversation:
- First line must read 'safe' or 'unsafe'.
- If unsafe, a second line must include a comma-separated list of violated categories.<|eot_id|><|start_header_id|>assistant<|end_header_id|>
"
    )
}

/// Build the free-form code-review prompt. No structured-response contract;
/// the model's output is passed through unparsed.
pub fn review_prompt(code: &str) -> String {
    format!(
        r"
Analyze the following code for:
- Bugs
- Security vulnerabilities
- AI-generated / copied patterns
- Optimization suggestions

Code:
{code}

Provide a structured response (JSON-like if possible).
"
    )
}
