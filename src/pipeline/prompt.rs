/// Hard cap on the final prompt sent to the image model, in characters.
/// Well below the provider's own limit for dall-e-3 prompts.
pub const MAX_PROMPT_CHARS: usize = 1000;

/// System instruction used in rewrite mode. Keeps the chat model on-task:
/// the output must still describe a printable line-art page.
pub const REWRITE_SYSTEM_PROMPT: &str = "You write prompts for an image generation model that \
produces coloring book pages. Given a short description, expand it into a single vivid prompt \
for a black and white line drawing: bold clean outlines, no shading, no gradients, no color, \
plenty of white space to color in. Reply with the prompt text only, no quotes or commentary.";

/// Fill the fixed coloring-book template with a sanitized description.
/// Deterministic; used when no rewrite step is configured.
pub fn direct_prompt(sanitized: &str) -> String {
    format!(
        "A simple black and white line drawing coloring book page of {}. The image should be \
in a coloring book style with clear black outlines, no shading, no colors, and plenty of \
white space for coloring.",
        sanitized
    )
}

/// Post-process a rewritten prompt: chat models like to wrap their answer in
/// quotes and stretch it over several lines. Strips wrapping quotes, collapses
/// whitespace, and truncates to [`MAX_PROMPT_CHARS`].
pub fn tidy_rewritten_prompt(raw: &str) -> String {
    let unquoted = raw.trim().trim_matches(|c| c == '"' || c == '\'');

    let collapsed = unquoted.split_whitespace().collect::<Vec<_>>().join(" ");

    collapsed
        .chars()
        .take(MAX_PROMPT_CHARS)
        .collect::<String>()
        .trim_end()
        .to_string()
}
