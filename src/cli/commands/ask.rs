//! One-shot assistant question.

use crate::cli::args::OutputFormat;
use crate::error::StaffdeskError;
use crate::output::format_turn;
use crate::portal::Portal;

/// Ask a single question and format the reply.
///
/// # Errors
///
/// Returns a validation error for a blank prompt. Service failures come back
/// as the fallback reply, not as errors.
pub fn ask(portal: &mut Portal, prompt: &[String], format: OutputFormat) -> Result<String, StaffdeskError> {
    let turn = portal.ask(&prompt.join(" "))?;
    match format {
        OutputFormat::Pretty => Ok(turn.text.clone()),
        OutputFormat::Json => format_turn(turn, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::SystemClock;
    use crate::features::assistant::MockChatBackend;

    #[test]
    fn test_ask_prints_reply_text() {
        let mut backend = MockChatBackend::new();
        backend
            .expect_generate()
            .withf(|_, prompt| prompt == "what time is it")
            .returning(|_, _| Ok("Time to ship.".to_string()));
        let mut portal = Portal::new(&Config::default(), Box::new(SystemClock), Box::new(backend));

        let words: Vec<String> = ["what", "time", "is", "it"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(ask(&mut portal, &words, OutputFormat::Pretty).unwrap(), "Time to ship.");
    }

    #[test]
    fn test_ask_json_has_role() {
        let mut backend = MockChatBackend::new();
        backend.expect_generate().returning(|_, _| Ok("ok".to_string()));
        let mut portal = Portal::new(&Config::default(), Box::new(SystemClock), Box::new(backend));

        let json = ask(&mut portal, &["hi".to_string()], OutputFormat::Json).unwrap();
        assert!(json.contains("\"role\": \"model\""));
    }
}
