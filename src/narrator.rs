use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::Error;

const NARRATIONS: [&str; 3] = [
    "As you venture forward, the forest seems to come alive around you. Leaves rustle mysteriously overhead, and you catch glimpses of small creatures darting between the trees. The path ahead splits into two directions - one leading uphill toward what appears to be ruins, the other descending toward the sound of water.",
    "Your keen observation reveals fresh footprints in the soft earth - humanoid, but larger than normal. They seem to lead deeper into the forest. Suddenly, you hear a branch snap behind you, and you spin around to see a pair of glowing eyes watching you from the shadows.",
    "The forest responds to your call with an eerie silence. Then, slowly, a melodic voice drifts through the trees: 'Lost traveler, the path you seek is not the one beneath your feet.' A figure emerges from behind an ancient oak - an ethereal being with bark-like skin and leaves for hair.",
];

/// Answers player actions with canned narration after a fixed delay.
#[derive(Clone, Debug)]
pub struct Narrator {
    delay: Duration,
}

impl Narrator {
    pub fn new(delay: Duration) -> Narrator {
        Narrator { delay }
    }

    pub fn reply(&self, input: &str) -> PendingReply {
        let delay = self.delay;
        let input = input.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(%input, "narrating reply");
            narrate()
        });

        PendingReply { handle }
    }
}

fn narrate() -> String {
    NARRATIONS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(NARRATIONS[0])
        .to_string()
}

/// A reply that is still being composed. Dropping it cancels the reply.
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<String>,
}

impl PendingReply {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn wait(mut self) -> Result<String, Error> {
        match (&mut self.handle).await {
            Ok(narration) => Ok(narration),
            Err(err) if err.is_cancelled() => Err(Error::ReplyCancelled),
            Err(err) => Err(Error::ExistentialState(err.to_string())),
        }
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reply_arrives_after_delay() {
        let narrator = Narrator::new(Duration::from_millis(10));

        let narration = narrator.reply("I look around").wait().await.unwrap();

        assert!(NARRATIONS.contains(&narration.as_str()));
    }

    #[tokio::test]
    async fn cancelled_reply_never_arrives() {
        let narrator = Narrator::new(Duration::from_secs(60));

        let reply = narrator.reply("I draw my weapon");
        reply.cancel();

        assert_eq!(reply.wait().await.unwrap_err(), Error::ReplyCancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_is_pending_until_delay_elapses() {
        let narrator = Narrator::new(Duration::from_secs(2));
        let reply = narrator.reply("I follow the forest path");

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!reply.is_finished());

        let narration = reply.wait().await.unwrap();
        assert!(!narration.is_empty());
    }
}
