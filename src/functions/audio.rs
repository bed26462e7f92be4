use crate::functions::assets::{AssetPaths, is_web_url};
use rand::seq::IndexedRandom;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Cue {
    Correct,
    Wrong,
    Lose,
    Win,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Correct, Cue::Wrong, Cue::Lose, Cue::Win];

    pub fn name(self) -> &'static str {
        match self {
            Cue::Correct => "correct",
            Cue::Wrong => "wrong",
            Cue::Lose => "lose",
            Cue::Win => "win",
        }
    }

    pub fn variants(self) -> usize {
        match self {
            Cue::Correct => 2,
            Cue::Wrong => 4,
            Cue::Lose => 2,
            Cue::Win => 3,
        }
    }

    /// File names of every variant, e.g. `wrong_1.ogg` .. `wrong_4.ogg`.
    pub fn sounds(self) -> Vec<String> {
        (1..=self.variants())
            .map(|variant| format!("{}_{variant}.ogg", self.name()))
            .collect()
    }
}

pub fn all_sounds() -> Vec<String> {
    Cue::ALL.into_iter().flat_map(Cue::sounds).collect()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("no announcement registered for sound `{0}`")]
    UnknownSound(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sound {
    pub name: String,
    pub url: String,
    pub line: &'static str,
}

impl Sound {
    /// Embed-ready text: the announcement plus the file, linked when the URL is absolute.
    pub fn markdown(&self) -> String {
        if is_web_url(&self.url) {
            format!("*{}* ([{}]({}))", self.line, self.name, self.url)
        } else {
            format!("*{}* (`{}`)", self.line, self.name)
        }
    }
}

/// Chat messages can't carry sound, so a played sound is announced in the
/// game embed instead. Every sound must be preloaded before it can play.
#[derive(Clone)]
pub struct ChatAudio {
    assets: AssetPaths,
    ready: HashMap<String, Sound>,
    last_played: Option<Sound>,
}

impl ChatAudio {
    pub fn new(assets: AssetPaths) -> Self {
        Self {
            assets,
            ready: HashMap::new(),
            last_played: None,
        }
    }

    /// Resolves URL and announcement of every sound. Fails on the first
    /// sound that has no announcement; nothing is registered in that case.
    pub fn preload(&mut self, sounds: &[String]) -> Result<(), AudioError> {
        let mut resolved = Vec::with_capacity(sounds.len());
        for name in sounds {
            let line =
                announcement(name).ok_or_else(|| AudioError::UnknownSound(name.clone()))?;
            resolved.push(Sound {
                name: name.clone(),
                url: self.assets.sound_url(name),
                line,
            });
        }

        for sound in resolved {
            self.ready.insert(sound.name.clone(), sound);
        }
        debug!(count = sounds.len(), "sounds preloaded");
        Ok(())
    }

    /// Plays one of `candidates`, chosen uniformly. Candidates that were
    /// never preloaded are skipped.
    pub fn play(&mut self, candidates: &[String]) -> Option<&Sound> {
        let playable: Vec<&Sound> = candidates
            .iter()
            .filter_map(|name| self.ready.get(name))
            .collect();
        let sound = playable.choose(&mut rand::rng()).map(|sound| (*sound).clone());
        if let Some(sound) = &sound {
            debug!(sound = %sound.name, "sound played");
        }
        self.last_played = sound;
        self.last_played.as_ref()
    }

    pub fn play_cue(&mut self, cue: Cue) -> Option<&Sound> {
        self.play(&cue.sounds())
    }

    pub fn last_played(&self) -> Option<&Sound> {
        self.last_played.as_ref()
    }

    pub fn clear(&mut self) {
        self.last_played = None;
    }

    #[cfg(test)]
    pub fn is_ready(&self, name: &str) -> bool {
        self.ready.contains_key(name)
    }
}

fn announcement(name: &str) -> Option<&'static str> {
    let line = match name {
        "correct_1.ogg" => "Plim!",
        "correct_2.ogg" => "Ding ding!",
        "wrong_1.ogg" => "Bzzt!",
        "wrong_2.ogg" => "Bonk!",
        "wrong_3.ogg" => "Fom fom fom...",
        "wrong_4.ogg" => "Ih-óóó!",
        "lose_1.ogg" => "Wah wah wah...",
        "lose_2.ogg" => "Tuuun...",
        "win_1.ogg" => "Tcharam!",
        "win_2.ogg" => "Fanfarra!",
        "win_3.ogg" => "Uhuuul!",
        _ => return None,
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio() -> ChatAudio {
        let mut audio = ChatAudio::new(AssetPaths::new(None, "/public/sounds"));
        audio.preload(&all_sounds()).expect("all sounds are known");
        audio
    }

    #[test]
    fn lists_every_variant() {
        let sounds = all_sounds();
        assert_eq!(sounds.len(), 11);
        assert_eq!(
            Cue::Wrong.sounds(),
            ["wrong_1.ogg", "wrong_2.ogg", "wrong_3.ogg", "wrong_4.ogg"]
        );
        assert!(sounds.contains(&"lose_2.ogg".to_string()));
        assert!(sounds.contains(&"win_3.ogg".to_string()));
    }

    #[test]
    fn preload_resolves_urls() {
        let audio = audio();
        for name in all_sounds() {
            assert!(audio.is_ready(&name), "{name} should be ready");
        }
    }

    #[test]
    fn preload_rejects_unknown_sound_without_partial_state() {
        let mut audio = ChatAudio::new(AssetPaths::new(None, "/s"));
        let sounds = vec!["win_1.ogg".to_string(), "boing.ogg".to_string()];

        assert_eq!(
            audio.preload(&sounds),
            Err(AudioError::UnknownSound("boing.ogg".into()))
        );
        assert!(!audio.is_ready("win_1.ogg"));
    }

    #[test]
    fn play_picks_among_candidates() {
        let mut audio = audio();
        let candidates = Cue::Correct.sounds();
        for _ in 0..32 {
            let sound = audio.play(&candidates).expect("a sound");
            assert!(candidates.contains(&sound.name));
            assert_eq!(sound.url, format!("/public/sounds/{}", sound.name));
        }
        let single = vec!["lose_1.ogg".to_string()];
        assert_eq!(audio.play(&single).map(|s| s.line), Some("Wah wah wah..."));
        assert_eq!(audio.last_played().map(|s| s.name.as_str()), Some("lose_1.ogg"));
    }

    #[test]
    fn play_without_preload_is_silent() {
        let mut audio = ChatAudio::new(AssetPaths::new(None, "/s"));
        assert!(audio.play_cue(Cue::Win).is_none());
        assert!(audio.last_played().is_none());
    }

    #[test]
    fn markdown_links_absolute_urls_only() {
        let local = Sound {
            name: "win_1.ogg".into(),
            url: "/public/sounds/win_1.ogg".into(),
            line: "Tcharam!",
        };
        assert_eq!(local.markdown(), "*Tcharam!* (`win_1.ogg`)");

        let remote = Sound {
            url: "https://cdn.test/win_1.ogg".into(),
            ..local
        };
        assert_eq!(
            remote.markdown(),
            "*Tcharam!* ([win_1.ogg](https://cdn.test/win_1.ogg))"
        );
    }
}
