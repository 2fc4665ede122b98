//! One interactive session: a catalog, its command history, and the line
//! protocol on top.
//!
//! Free text is resolved; lines starting with `:` are session commands.
//! Every line yields exactly one JSON document.

use serde_json::{Value, json};

use ii_engine::{Catalog, CommandHistory, IntentResolver, validate};
use ii_protocol::Resolution;

/// Owns the state a front end needs across commands.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    history: CommandHistory,
}

impl Session {
    pub fn new(catalog: Catalog, history_limit: usize) -> Self {
        Self {
            catalog,
            history: CommandHistory::new(history_limit),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Handle one input line.
    pub fn handle_line(&self, line: &str) -> anyhow::Result<Value> {
        match line.trim().strip_prefix(':') {
            Some(command) => self.handle_command(command),
            None => self.resolve(line),
        }
    }

    /// Resolve free text. Resolved intents are validated and recorded.
    pub fn resolve(&self, text: &str) -> anyhow::Result<Value> {
        let intent = match IntentResolver::new(&self.catalog).resolve(text) {
            Resolution::Resolved { intent } => intent,
            unresolved => return Ok(serde_json::to_value(&unresolved)?),
        };

        let validation = validate(&intent);
        if !validation.valid {
            tracing::info!(intent = %intent.intent_id, errors = ?validation.errors, "intent has validation warnings");
        }
        let entry = self.history.record(text.trim(), intent, validation);

        let mut value = serde_json::to_value(Resolution::Resolved {
            intent: entry.intent,
        })?;
        value["validation"] = serde_json::to_value(&entry.validation)?;
        Ok(value)
    }

    fn handle_command(&self, command: &str) -> anyhow::Result<Value> {
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        let resolver = IntentResolver::new(&self.catalog);

        let value = match name {
            "contexts" => serde_json::to_value(&self.catalog)?,
            "examples" => {
                let context = (!arg.is_empty()).then_some(arg);
                json!({
                    "context": context,
                    "examples": resolver.context_examples(context),
                })
            }
            "suggest" => json!({ "suggestions": resolver.suggest(arg) }),
            "history" => serde_json::to_value(self.history.entries())?,
            "analytics" => serde_json::to_value(self.history.analytics())?,
            _ => {
                tracing::debug!(command = %name, "unknown session command");
                json!({ "error": format!("unknown command: {name}") })
            }
        };
        Ok(value)
    }
}
