//! Recitation playback state.
//!
//! The browser owns the actual audio element; it asks the player what to
//! play and reports back when a track ends or fails. Only one track is ever
//! active: starting a sequence stops a single verse and the other way round.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Playback {
    #[default]
    Idle,
    Sequence {
        surah: u32,
        urls: Vec<String>,
        index: usize,
        paused: bool,
    },
    Single {
        verse: u32,
        url: String,
        paused: bool,
    },
}

#[derive(Debug, Default)]
pub struct Player {
    playback: Playback,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatus {
    #[serde(flatten)]
    pub playback: Playback,
    pub current_url: Option<String>,
}

impl Player {
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn status(&self) -> PlayerStatus {
        PlayerStatus {
            playback: self.playback.clone(),
            current_url: self.current_url().map(str::to_string),
        }
    }

    /// URL of the track that should be sounding right now.
    pub fn current_url(&self) -> Option<&str> {
        match &self.playback {
            Playback::Sequence {
                urls,
                index,
                paused: false,
                ..
            } => urls.get(*index).map(String::as_str),
            Playback::Single {
                url, paused: false, ..
            } => Some(url),
            _ => None,
        }
    }

    pub fn play_sequence(&mut self, surah: u32, urls: Vec<String>) {
        self.stop();
        if urls.is_empty() {
            return;
        }
        self.playback = Playback::Sequence {
            surah,
            urls,
            index: 0,
            paused: false,
        };
    }

    /// Selecting the verse that is already playing stops it.
    pub fn play_single(&mut self, verse: u32, url: String) {
        let same = matches!(&self.playback, Playback::Single { verse: playing, .. } if *playing == verse);
        self.stop();
        if same {
            return;
        }
        self.playback = Playback::Single {
            verse,
            url,
            paused: false,
        };
    }

    /// Natural end of the current track.
    pub fn ended(&mut self) {
        let finished = match &mut self.playback {
            Playback::Sequence { urls, index, .. } => {
                *index += 1;
                *index >= urls.len()
            }
            Playback::Single { .. } => true,
            Playback::Idle => false,
        };
        if finished {
            self.stop();
        }
    }

    /// A play attempt was rejected; nothing further is attempted.
    pub fn failed(&mut self) {
        self.stop();
    }

    pub fn pause(&mut self) {
        self.set_paused(true);
    }

    pub fn resume(&mut self) {
        self.set_paused(false);
    }

    pub fn stop(&mut self) {
        self.playback = Playback::Idle;
    }

    fn set_paused(&mut self, value: bool) {
        match &mut self.playback {
            Playback::Sequence { paused, .. } | Playback::Single { paused, .. } => *paused = value,
            Playback::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("https://cdn.test/{i}.mp3")).collect()
    }

    #[test]
    fn sequence_advances_until_past_the_end() {
        let mut player = Player::default();
        player.play_sequence(1, urls(3));
        assert_eq!(player.current_url(), Some("https://cdn.test/1.mp3"));

        player.ended();
        assert_eq!(player.current_url(), Some("https://cdn.test/2.mp3"));
        player.ended();
        assert_eq!(player.current_url(), Some("https://cdn.test/3.mp3"));
        player.ended();
        assert_eq!(player.playback(), &Playback::Idle);
    }

    #[test]
    fn failure_stops_the_sequence() {
        let mut player = Player::default();
        player.play_sequence(1, urls(3));
        player.failed();
        assert_eq!(player.current_url(), None);
    }

    #[test]
    fn empty_sequence_stays_idle() {
        let mut player = Player::default();
        player.play_sequence(2, Vec::new());
        assert_eq!(player.playback(), &Playback::Idle);
    }

    #[test]
    fn single_verse_replaces_sequence_and_back() {
        let mut player = Player::default();
        player.play_sequence(1, urls(7));
        player.play_single(4, "https://cdn.test/single.mp3".into());
        assert!(matches!(player.playback(), Playback::Single { verse: 4, .. }));

        player.play_sequence(1, urls(7));
        assert!(matches!(player.playback(), Playback::Sequence { index: 0, .. }));
    }

    #[test]
    fn selecting_the_playing_verse_toggles_it_off() {
        let mut player = Player::default();
        player.play_single(4, "a.mp3".into());
        player.play_single(4, "a.mp3".into());
        assert_eq!(player.playback(), &Playback::Idle);
    }

    #[test]
    fn pause_and_resume_keep_position() {
        let mut player = Player::default();
        player.play_sequence(1, urls(3));
        player.ended();
        player.pause();
        assert_eq!(player.current_url(), None);
        player.resume();
        assert_eq!(player.current_url(), Some("https://cdn.test/2.mp3"));
    }
}
