pub const EMAIL_CHAIN_DELIMITER: &str = "\"\"\"";

const INSTRUCTIONS: &str = r#"You are an assistant that extracts the main composed message from email replies.

Instructions:
- Extract ONLY the text that begins with a **salutation** like "Hi", "Hello", "Hey", etc. It must **start exactly at that greeting**.
- Continue extracting text **until the closing line that contains a sign-off**, such as "Thanks", "Thank you", "Regards", or the sender's **name** (e.g., "Meghan", "John", etc.).
- **Do NOT include any previous email replies, quoted or forwarded messages, headers, or signatures.**
- **Do NOT extract anything before the salutation or after the closing name/sign-off.**
- The result must be natural and human-readable, maintaining all original **line breaks** and paragraph formatting exactly."#;

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn instructions() -> &'static str {
        INSTRUCTIONS
    }

    /// Wraps the raw email chain in the fixed extraction instructions.
    pub fn reply_extraction(email_chain: &str) -> String {
        format!(
            "\n{}\n\nEmail Chain:\n{delim}{}{delim}\n",
            INSTRUCTIONS,
            email_chain,
            delim = EMAIL_CHAIN_DELIMITER
        )
    }
}
