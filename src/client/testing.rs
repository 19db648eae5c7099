//! Test doubles for the wire boundary.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{Secret, SecretAuth, VaultTransport};
use crate::{Error, Result};

/// One write observed by a [`FakeTransport`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedWrite {
    pub path: String,
    pub token: Option<String>,
    pub body: Option<Value>,
}

/// In-memory [`VaultTransport`] that records writes and replays queued
/// responses. With an empty queue every write succeeds with no body, which
/// is what `auth/token/revoke-self` returns.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Result<Option<Secret>>>>,
    calls: Mutex<Vec<RecordedWrite>>,
}

impl FakeTransport {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a login response carrying `token`.
    pub fn push_token(&self, token: &str) {
        self.push(Ok(Some(Secret {
            request_id: None,
            lease_id: None,
            lease_duration: 0,
            renewable: false,
            data: None,
            auth: Some(SecretAuth {
                client_token: token.to_string(),
                accessor: None,
                policies: Vec::new(),
                lease_duration: 0,
                renewable: false,
            }),
        })));
    }

    /// Queue a failing response.
    pub fn push_error(&self, status: u16, message: &str) {
        self.push(Err(Error::Api {
            status,
            errors: vec![message.to_string()],
        }));
    }

    /// Queue a success with no auth block.
    pub fn push_empty(&self) {
        self.push(Ok(None));
    }

    fn push(&self, response: Result<Option<Secret>>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedWrite> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl VaultTransport for FakeTransport {
    async fn write(
        &self,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Option<Secret>> {
        self.calls.lock().unwrap().push(RecordedWrite {
            path: path.to_string(),
            token: token.map(str::to_string),
            body: body.cloned(),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }
}
