//! Environment access behind a trait so configuration is testable without
//! mutating process globals.

use std::env;

pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}

/// Zero-sized type; delegates to `std::env`.
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

/// In-memory environment for config tests. Not `Send + Sync`.
#[cfg(test)]
pub struct InMemoryEnv {
    vars: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl InMemoryEnv {
    pub fn new() -> Self {
        Self {
            vars: std::cell::RefCell::new(std::collections::HashMap::new()),
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        self.vars
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
impl ReadEnv for InMemoryEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        self.vars
            .borrow()
            .get(key)
            .cloned()
            .ok_or(env::VarError::NotPresent)
    }
}
