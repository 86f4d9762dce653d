//! Lazy excerpt population with a cooldown on failed fetches.

use chrono::Utc;
use innkeeper_core::Session;
use tracing::{debug, info};

use super::Runtime;

impl Runtime {
    /// Make sure `session` holds an excerpt for `url`.
    ///
    /// Fetches when nothing usable is stored for that page. A failed result is
    /// stored too. A failure for the same page younger than the refetch
    /// cooldown is left in place without touching the network.
    ///
    /// Returns true if a fetch was attempted.
    pub async fn ensure_excerpt(&self, session: &mut Session, url: &str) -> bool {
        if !session.needs_excerpt(url) {
            return false;
        }

        if self.in_cooldown(session, url) {
            debug!(url, "Skipping refetch, last failure is within cooldown");
            return false;
        }

        let excerpt = self.extractor.extract(url).await;
        info!(
            session.id = %session.id,
            url,
            ready = excerpt.is_usable(),
            "Excerpt updated"
        );
        session.set_excerpt(excerpt);
        true
    }

    /// Fetch `url` regardless of what the session holds, cooldown included.
    ///
    /// Returns true if the new excerpt is usable.
    pub async fn refresh_excerpt(&self, session: &mut Session, url: &str) -> bool {
        let excerpt = self.extractor.extract(url).await;
        let usable = excerpt.is_usable();
        info!(session.id = %session.id, url, ready = usable, "Excerpt refreshed");
        session.set_excerpt(excerpt);
        usable
    }

    fn in_cooldown(&self, session: &Session, url: &str) -> bool {
        let excerpt = session.excerpt();
        let Some(failed_at) = excerpt.failed_at() else {
            return false;
        };
        if excerpt.source_url() != Some(url) {
            return false;
        }

        let cooldown = self.config.refetch_cooldown();
        if cooldown.is_zero() {
            return false;
        }

        // A clock that went backwards counts as still cooling down.
        match (Utc::now() - failed_at).to_std() {
            Ok(elapsed) => elapsed < cooldown,
            Err(_) => true,
        }
    }
}
