use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ChatError;
use crate::models::{ChatMessage, Origin};
use crate::services::chat::{ChatProvider, Message};

pub const GREETING: &str = "Hello! I'm your booking assistant. I can help you book appointments, check availability, and answer questions about our services.\n\n**Try saying:**\n\n- \"Book me an appointment\"\n- \"I need to schedule a meeting\"\n- \"What are your available times?\"\n- \"My name is wissem, email wissham25@gmail.com, phone +216 56766351\"";

const SYSTEM_PROMPT: &str = "You are a helpful booking assistant for a service business. Your role is to:\n- Help users book appointments\n- Answer questions about business hours (Monday to Friday, 9:30 AM - 9:30 PM Malaysia time, closed 12:30 PM - 2:30 PM for lunch and 6:30 PM - 8:30 PM for dinner)\n- Collect booking information (name, email, phone, date, time)\n- Be friendly, professional, and concise\n- If users want to book, guide them through the process or suggest they use the booking form\n\nKeep responses brief and helpful. Use markdown formatting when appropriate.";

const GENERIC_APOLOGY: &str = "Sorry, I encountered an error. Please try again.";
const MISSING_KEY_HINT: &str =
    "OpenRouter API key is not configured. Please set OPENROUTER_API_KEY in your environment variables.";
const AUTH_FAILED_HINT: &str = "API authentication failed. Please check your OpenRouter API key.";

/// Conversation state machine: Idle while no completion is pending,
/// AwaitingReply while one is. The log is append-only and seeded with the
/// assistant greeting.
pub struct ChatController {
    provider: Arc<dyn ChatProvider>,
    log: Mutex<Vec<ChatMessage>>,
    awaiting: AtomicBool,
}

impl ChatController {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider,
            log: Mutex::new(vec![ChatMessage::assistant(GREETING)]),
            awaiting: AtomicBool::new(false),
        }
    }

    /// No-op on blank input or while a reply is already pending. Always
    /// returns to Idle before returning.
    pub async fn send_message(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.awaiting.swap(true, Ordering::SeqCst) {
            return;
        }

        let history = {
            let mut log = self.log.lock().unwrap();
            log.push(ChatMessage::user(text));
            // Skip the seeded greeting at position zero.
            log.iter()
                .skip(1)
                .map(|msg| Message {
                    role: match msg.origin {
                        Origin::User => "user".to_string(),
                        Origin::Assistant => "assistant".to_string(),
                    },
                    content: msg.text.clone(),
                })
                .collect::<Vec<_>>()
        };

        let reply = match self.provider.complete(SYSTEM_PROMPT, &history).await {
            Ok(reply) => reply,
            Err(ChatError::MissingCredentials) => MISSING_KEY_HINT.to_string(),
            Err(ChatError::Unauthorized) => AUTH_FAILED_HINT.to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "chat completion failed");
                GENERIC_APOLOGY.to_string()
            }
        };

        self.log.lock().unwrap().push(ChatMessage::assistant(reply));
        self.awaiting.store(false, Ordering::SeqCst);
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.log.lock().unwrap().clone()
    }

    pub fn awaiting_reply(&self) -> bool {
        self.awaiting.load(Ordering::SeqCst)
    }
}
