use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use slotbook::controllers::chat::GREETING;
use slotbook::controllers::ChatController;
use slotbook::errors::ChatError;
use slotbook::models::Origin;
use slotbook::services::chat::{ChatProvider, Message};

// ── Mock Provider ──

#[derive(Clone)]
enum Script {
    Reply(String),
    MissingCredentials,
    Unauthorized,
    ApiError,
}

struct MockChat {
    script: Mutex<VecDeque<Script>>,
    received: Mutex<Vec<Vec<Message>>>,
    delay: Duration,
}

impl MockChat {
    fn new(script: Vec<Script>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            received: Mutex::new(vec![]),
            delay: Duration::ZERO,
        }
    }

    fn with_delay(script: Vec<Script>, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(script)
        }
    }

    fn received(&self) -> Vec<Vec<Message>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for MockChat {
    async fn complete(
        &self,
        _system_prompt: &str,
        messages: &[Message],
    ) -> Result<String, ChatError> {
        self.received.lock().unwrap().push(messages.to_vec());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let script = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Script::Reply("fallback".to_string()));
        match script {
            Script::Reply(text) => Ok(text),
            Script::MissingCredentials => Err(ChatError::MissingCredentials),
            Script::Unauthorized => Err(ChatError::Unauthorized),
            Script::ApiError => Err(anyhow::anyhow!("server melted").into()),
        }
    }
}

fn chat(script: Vec<Script>) -> (ChatController, Arc<MockChat>) {
    let provider = Arc::new(MockChat::new(script));
    (
        ChatController::new(Arc::clone(&provider) as Arc<dyn ChatProvider>),
        provider,
    )
}

// ── Tests ──

#[tokio::test]
async fn log_is_seeded_with_the_greeting() {
    let (ctrl, _) = chat(vec![]);
    let messages = ctrl.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].origin, Origin::Assistant);
    assert_eq!(messages[0].text, GREETING);
    assert!(!ctrl.awaiting_reply());
}

#[tokio::test]
async fn reply_is_appended_as_assistant_message() {
    let (ctrl, _) = chat(vec![Script::Reply("**Sure!** What day?".to_string())]);
    ctrl.send_message("Book me an appointment").await;

    let messages = ctrl.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].origin, Origin::User);
    assert_eq!(messages[1].text, "Book me an appointment");
    assert_eq!(messages[2].origin, Origin::Assistant);
    assert_eq!(messages[2].text, "**Sure!** What day?");
    assert!(!ctrl.awaiting_reply());
}

#[tokio::test]
async fn history_excludes_the_seeded_greeting() {
    let (ctrl, provider) = chat(vec![
        Script::Reply("first reply".to_string()),
        Script::Reply("second reply".to_string()),
    ]);
    ctrl.send_message("hello").await;
    ctrl.send_message("again").await;

    let received = provider.received();
    assert_eq!(received.len(), 2);

    // first call: just the new user message
    assert_eq!(received[0].len(), 1);
    assert_eq!(received[0][0].role, "user");
    assert_eq!(received[0][0].content, "hello");

    // second call: full prior conversation minus the greeting
    assert_eq!(received[1].len(), 3);
    assert_eq!(received[1][0].content, "hello");
    assert_eq!(received[1][1].role, "assistant");
    assert_eq!(received[1][1].content, "first reply");
    assert_eq!(received[1][2].content, "again");
}

#[tokio::test]
async fn blank_input_is_a_noop() {
    let (ctrl, provider) = chat(vec![Script::Reply("unused".to_string())]);
    ctrl.send_message("").await;
    ctrl.send_message("   \n\t ").await;

    assert_eq!(ctrl.messages().len(), 1);
    assert!(provider.received().is_empty());
}

#[tokio::test]
async fn input_is_trimmed_before_sending() {
    let (ctrl, provider) = chat(vec![Script::Reply("ok".to_string())]);
    ctrl.send_message("  hello  ").await;
    assert_eq!(provider.received()[0][0].content, "hello");
    assert_eq!(ctrl.messages()[1].text, "hello");
}

#[tokio::test(start_paused = true)]
async fn second_send_while_awaiting_reply_is_dropped() {
    let provider = Arc::new(MockChat::with_delay(
        vec![Script::Reply("done".to_string())],
        Duration::from_millis(100),
    ));
    let ctrl = ChatController::new(Arc::clone(&provider) as Arc<dyn ChatProvider>);

    tokio::join!(ctrl.send_message("one"), ctrl.send_message("two"));

    let messages = ctrl.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].text, "one");
    assert_eq!(messages[2].text, "done");
    assert_eq!(provider.received().len(), 1);
}

#[tokio::test]
async fn missing_credentials_get_a_configuration_hint() {
    let (ctrl, _) = chat(vec![Script::MissingCredentials]);
    ctrl.send_message("hi").await;

    let last = ctrl.messages().pop().unwrap();
    assert_eq!(last.origin, Origin::Assistant);
    assert_eq!(
        last.text,
        "OpenRouter API key is not configured. Please set OPENROUTER_API_KEY in your environment variables."
    );
}

#[tokio::test]
async fn auth_failure_gets_a_credential_hint() {
    let (ctrl, _) = chat(vec![Script::Unauthorized]);
    ctrl.send_message("hi").await;

    let last = ctrl.messages().pop().unwrap();
    assert_eq!(
        last.text,
        "API authentication failed. Please check your OpenRouter API key."
    );
}

#[tokio::test]
async fn other_failures_get_a_generic_apology_and_recover() {
    let (ctrl, provider) = chat(vec![
        Script::ApiError,
        Script::Reply("recovered".to_string()),
    ]);
    ctrl.send_message("hi").await;

    let last = ctrl.messages().pop().unwrap();
    assert_eq!(last.text, "Sorry, I encountered an error. Please try again.");
    assert!(!ctrl.awaiting_reply());

    // the controller is back in Idle and can send again
    ctrl.send_message("still there?").await;
    assert_eq!(provider.received().len(), 2);
    assert_eq!(ctrl.messages().pop().unwrap().text, "recovered");
}
