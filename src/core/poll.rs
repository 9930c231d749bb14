use std::time::Duration;

/// Fixed refresh period for the open conversation.
pub const MESSAGE_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Identifies one scheduled recurring reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollHandle {
    pub id: u64,
    pub contact_email: String,
}

/// Owns the single recurring message reload.
///
/// The UI turns the live handle into a timer stream keyed by `id`; when the
/// handle changes or goes away the old stream is dropped. Ticks that arrive
/// for a dead id are ignored via [`Poller::is_live`].
#[derive(Debug)]
pub struct Poller {
    interval: Duration,
    next_id: u64,
    live: Option<PollHandle>,
}

impl Default for Poller {
    fn default() -> Self {
        Poller::new(MESSAGE_POLL_INTERVAL)
    }
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Poller {
            interval,
            next_id: 1,
            live: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cancel any live handle, then schedule a new one.
    pub fn start(&mut self, contact_email: &str) -> &PollHandle {
        self.cancel();
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("poll #{id} started for {contact_email}");
        self.live.insert(PollHandle {
            id,
            contact_email: contact_email.to_string(),
        })
    }

    pub fn cancel(&mut self) -> Option<PollHandle> {
        let old = self.live.take();
        if let Some(h) = &old {
            log::debug!("poll #{} cancelled", h.id);
        }
        old
    }

    pub fn live(&self) -> Option<&PollHandle> {
        self.live.as_ref()
    }

    pub fn is_live(&self, id: u64) -> bool {
        self.live.as_ref().is_some_and(|h| h.id == id)
    }

    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        usize::from(self.live.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_replaces_handle() {
        let mut poller = Poller::default();
        let first = poller.start("a@x.com").id;
        let second = poller.start("b@x.com").id;
        assert_ne!(first, second);
        assert_eq!(poller.live_count(), 1);
        assert!(!poller.is_live(first));
        assert!(poller.is_live(second));
        assert_eq!(poller.live().unwrap().contact_email, "b@x.com");
    }

    #[test]
    fn cancel_leaves_nothing_live() {
        let mut poller = Poller::default();
        let id = poller.start("a@x.com").id;
        assert_eq!(poller.cancel().map(|h| h.id), Some(id));
        assert_eq!(poller.live_count(), 0);
        assert!(!poller.is_live(id));
        assert!(poller.cancel().is_none());
    }

    #[test]
    fn default_interval_is_three_seconds() {
        assert_eq!(Poller::default().interval(), Duration::from_secs(3));
    }
}
