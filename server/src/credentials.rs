//! Opaque tokens bound 1:1 to agent ids.

use crate::registry::AgentId;
use crate::utils::random_suffix;
use rand::Rng;
use std::collections::HashMap;

const TOKEN_SUFFIX_LEN: usize = 13;

#[derive(Debug)]
pub struct CredentialMap {
    tokens: HashMap<AgentId, String>,
    next_seq: u64,
}

impl CredentialMap {
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
            next_seq: 1,
        }
    }

    /// Issues the token for a freshly registered agent.
    ///
    /// Tokens are never rotated. Issuing twice for the same id returns the
    /// existing token instead of replacing it.
    pub fn issue<R: Rng>(&mut self, agent_id: &AgentId, rng: &mut R) -> String {
        if let Some(existing) = self.tokens.get(agent_id) {
            return existing.clone();
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let token = format!("tk_{}_{}", seq, random_suffix(rng, TOKEN_SUFFIX_LEN));
        self.tokens.insert(agent_id.clone(), token.clone());
        token
    }

    /// True only when `token` is exactly the one issued for `agent_id`.
    pub fn authorize(&self, agent_id: &AgentId, token: Option<&str>) -> bool {
        match (self.tokens.get(agent_id), token) {
            (Some(issued), Some(presented)) => issued == presented,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for CredentialMap {
    fn default() -> Self {
        Self::new()
    }
}
