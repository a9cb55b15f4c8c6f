//! Per-contact message threads.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::contact::{default_directory, Contact};
use crate::core::IdSource;
use crate::error::StaffdeskError;

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Timestamp-derived id.
    pub id: String,
    /// Sender display name or username.
    pub sender: String,
    /// Message body.
    pub content: String,
    /// When it was sent.
    pub timestamp: DateTime<Utc>,
    /// Sent by the logged-in user.
    pub is_me: bool,
}

/// Colleague directory plus one thread per contact.
#[derive(Debug, Default)]
pub struct Inbox {
    contacts: Vec<Contact>,
    threads: HashMap<String, Vec<Message>>,
    ids: IdSource,
}

impl Inbox {
    /// Create an inbox over `contacts` with no messages.
    #[must_use]
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            threads: HashMap::new(),
            ids: IdSource::new(),
        }
    }

    /// The built-in directory with an opening exchange in the first thread.
    #[must_use]
    pub fn seeded(username: &str, now: DateTime<Utc>) -> Self {
        let mut inbox = Self::new(default_directory());
        if let Some(first) = inbox.contacts.first().cloned() {
            let thread = vec![
                Message {
                    id: "m1".to_string(),
                    sender: first.name.clone(),
                    content: "Hey, did you push the latest updates to the repo?".to_string(),
                    timestamp: now - Duration::seconds(1000),
                    is_me: false,
                },
                Message {
                    id: "m2".to_string(),
                    sender: username.to_string(),
                    content: "Yes, just waiting for the CI/CD pipeline to clear.".to_string(),
                    timestamp: now - Duration::seconds(500),
                    is_me: true,
                },
            ];
            inbox.threads.insert(first.id, thread);
        }
        inbox
    }

    /// Contacts whose name or role matches `query` (all when `None`).
    #[must_use]
    pub fn contacts(&self, query: Option<&str>) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| query.map_or(true, |q| c.matches(q)))
            .collect()
    }

    /// Look up a contact by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn contact(&self, contact_id: &str) -> Result<&Contact, StaffdeskError> {
        self.contacts
            .iter()
            .find(|c| c.id == contact_id)
            .ok_or_else(|| StaffdeskError::NotFound(format!("contact '{contact_id}'")))
    }

    /// Messages exchanged with a contact, in send order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn thread(&self, contact_id: &str) -> Result<&[Message], StaffdeskError> {
        self.contact(contact_id)?;
        Ok(self
            .threads
            .get(contact_id)
            .map_or(&[][..], Vec::as_slice))
    }

    /// Append a message from the user to a contact's thread.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown contact or a validation error for blank text.
    pub fn send(
        &mut self,
        contact_id: &str,
        sender: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<&Message, StaffdeskError> {
        self.contact(contact_id)?;
        if text.trim().is_empty() {
            return Err(StaffdeskError::validation("message is empty"));
        }

        let message = Message {
            id: self.ids.next(now),
            sender: sender.to_string(),
            content: text.to_string(),
            timestamp: now,
            is_me: true,
        };
        let thread = self.threads.entry(contact_id.to_string()).or_default();
        thread.push(message);
        thread
            .last()
            .ok_or_else(|| StaffdeskError::NotFound("sent message".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_seeded_first_thread() {
        let inbox = Inbox::seeded("jdoe", now());
        let thread = inbox.thread("1").unwrap();
        assert_eq!(thread.len(), 2);
        assert!(!thread[0].is_me);
        assert!(thread[1].is_me);
        assert_eq!(thread[1].sender, "jdoe");
        assert!(inbox.thread("2").unwrap().is_empty());
    }

    #[test]
    fn test_send_appends() {
        let mut inbox = Inbox::seeded("jdoe", now());
        inbox.send("2", "jdoe", "Ping", now()).unwrap();
        inbox.send("2", "jdoe", "Pong?", now()).unwrap();

        let thread = inbox.thread("2").unwrap();
        let bodies: Vec<_> = thread.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(bodies, vec!["Ping", "Pong?"]);
        assert_ne!(thread[0].id, thread[1].id);
    }

    #[test]
    fn test_send_rejects_blank_and_unknown() {
        let mut inbox = Inbox::seeded("jdoe", now());
        assert!(matches!(
            inbox.send("1", "jdoe", "   ", now()),
            Err(StaffdeskError::Validation(_))
        ));
        assert!(matches!(
            inbox.send("99", "jdoe", "hi", now()),
            Err(StaffdeskError::NotFound(_))
        ));
        assert_eq!(inbox.thread("1").unwrap().len(), 2);
    }

    #[test]
    fn test_contact_search() {
        let inbox = Inbox::seeded("jdoe", now());
        assert_eq!(inbox.contacts(None).len(), 3);
        let found = inbox.contacts(Some("arch"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Harold Finch");
    }
}
