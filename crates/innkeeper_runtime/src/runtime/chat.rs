//! Question handling: one user turn in, one assistant turn out.

use innkeeper_core::{Session, Turn};
use tracing::{info, warn};

use crate::error::RuntimeError;

use super::Runtime;

impl Runtime {
    /// Append `question` as a user turn, ask the model, append its answer.
    ///
    /// Runs whatever state the excerpt is in. A failed completion does not
    /// return an error: it becomes an assistant turn carrying the error text.
    /// Only a blank question is rejected, and then the session is unchanged.
    /// Anything else is recorded exactly as given.
    pub async fn ask(&self, session: &mut Session, question: &str) -> Result<Turn, RuntimeError> {
        if question.trim().is_empty() {
            return Err(RuntimeError::EmptyQuestion);
        }

        session.push_turn(Turn::user(question));

        let reply = match self
            .completion
            .complete(session.excerpt(), session.turns())
            .await
        {
            Ok(text) => Turn::assistant(text),
            Err(e) => {
                warn!(session.id = %session.id, error = %e, "Completion failed");
                Turn::assistant_error(e)
            }
        };

        info!(
            session.id = %session.id,
            turns = session.turn_count() + 1,
            failed = reply.failed,
            "Assistant replied"
        );
        session.push_turn(reply.clone());
        Ok(reply)
    }
}
