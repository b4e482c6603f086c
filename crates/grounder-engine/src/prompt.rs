//! Prompt composition for the completion endpoint.

/// Substituted for the context block when retrieval found nothing.
pub const NO_CONTEXT_FALLBACK: &str = "No relevant local background knowledge.";

/// Compose the instruction sent downstream.
///
/// The context goes in verbatim inside the quoted block; escaping against
/// the wire format is the completion client's business (serde does it
/// there), not ours.
pub fn build_prompt(context: Option<&str>, query: &str) -> String {
    let context = match context {
        Some(c) if !c.is_empty() => c,
        _ => NO_CONTEXT_FALLBACK,
    };
    format!(
        "You are my personal assistant.\n\
         Background material:\n\
         \"\"\"\n\
         {context}\n\
         \"\"\"\n\
         User question: {query}\n\
         Draw on the background material and answer the user in a warm, friendly tone."
    )
}
