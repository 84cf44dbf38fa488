use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;

use super::{Gateway, GenerateRequest, GenerateResponse};
use crate::error::GatewayError;

/// Replays canned replies in order and records every request it receives.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<GenerateResponse, u16>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedGateway {
    pub fn replying(text: &str) -> Self {
        let gateway = Self::default();
        gateway.push(Ok(GenerateResponse::text(text)));
        gateway
    }

    pub fn failing(status: u16) -> Self {
        let gateway = Self::default();
        gateway.push(Err(status));
        gateway
    }

    pub fn push(&self, reply: Result<GenerateResponse, u16>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GatewayError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(status)) => Err(GatewayError::Api {
                status,
                message: "scripted failure".into(),
            }),
            None => panic!("ScriptedGateway ran out of replies"),
        }
    }
}
