use std::sync::{Arc, Mutex};

use gistr::agent::{AgentError, LanguageModel};

/// A recorded completion request: (api key, prompt)
pub type Call = (String, String);

#[derive(Clone)]
pub struct MockLlm {
    pub response: String,
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub fail_with: Option<(u16, String)>,
}

impl MockLlm {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(status: u16, msg: &str) -> Self {
        Self {
            response: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some((status, msg.to_string())),
        }
    }
}

impl LanguageModel for MockLlm {
    fn model(&self) -> &str {
        "mock-llama"
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, AgentError> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), prompt.to_string()));
        if let Some((status, ref message)) = self.fail_with {
            return Err(AgentError::Api {
                status,
                message: message.clone(),
            });
        }
        Ok(self.response.clone())
    }
}
