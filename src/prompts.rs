//! Instruction template for the summarization call.

/// Placeholder replaced with the document text
pub const TEXT_PLACEHOLDER: &str = "{text}";

pub const SUMMARY_TEMPLATE: &str = r#"
You are an expert summarizer. Summarize the following content in **clear bullet points** using simple language.

Instructions:
- Focus only on the **key ideas, arguments, or takeaways**
- Do **not include filler, greetings, or unnecessary details**
- Format the summary as **bullet points** (• or -)
- Try to stay within **500 words maximum**

Content:
{text}
"#;

/// Render the summary prompt for a document's text
pub fn render(text: &str) -> String {
    SUMMARY_TEMPLATE.replacen(TEXT_PLACEHOLDER, text, 1)
}
