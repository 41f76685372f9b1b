use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::process;

pub const DEFAULT_TOOL: &str = "gemini";
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

const SUMMARY_PROMPT: &str = "Summarize the following video transcript. \
Capture the key points, main arguments, and important details, and finish \
with a short list of takeaways.";

/// Single combined argument handed to the summarizer CLI
fn build_prompt(transcript: &str) -> String {
    format!("{SUMMARY_PROMPT}\n\n---\n\n{transcript}")
}

/// Summarize a transcript via an external LLM CLI.
///
/// The tool gets one combined prompt argument plus `--model`; its stdout is
/// the summary text.
pub async fn summarize_transcript(tool: &str, model: &str, transcript: &str) -> Result<String> {
    debug!("Summarizing {} chars with {tool} ({model})", transcript.len());
    let prompt = build_prompt(transcript);
    let out = process::run(Path::new(tool), &[&prompt, "--model", model]).await?;
    Ok(out.stdout)
}
