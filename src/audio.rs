//! Sound effects.
//!
//! `AudioPlayer` is an explicit resource: build it once at startup, call
//! `initialize()`, hand it to whatever UI code needs it, `dispose()` on teardown.
//! Loading is best effort. A sound that fails to load or is not buffered yet is
//! skipped with a warning; nothing here ever fails a caller.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Buy,
    Sell,
    Reroll,
    LevelUp,
    StarUp,
    Error,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 6] = [
        SoundEffect::Buy,
        SoundEffect::Sell,
        SoundEffect::Reroll,
        SoundEffect::LevelUp,
        SoundEffect::StarUp,
        SoundEffect::Error,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Buy => "buy",
            SoundEffect::Sell => "sell",
            SoundEffect::Reroll => "reroll",
            SoundEffect::LevelUp => "level_up",
            SoundEffect::StarUp => "star_up",
            SoundEffect::Error => "error",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::Buy => "buy.mp3",
            SoundEffect::Sell => "sell.mp3",
            SoundEffect::Reroll => "reroll.mp3",
            SoundEffect::LevelUp => "level_up.mp3",
            SoundEffect::StarUp => "star_up.mp3",
            SoundEffect::Error => "error.mp3",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == s)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AudioError {
    #[error("audio playback is not available in this environment")]
    Unavailable,
    #[error("failed to load sound '{effect}': {reason}")]
    Load { effect: &'static str, reason: String },
    #[error("sound '{0}' is not loaded")]
    NotLoaded(&'static str),
    #[error("failed to play sound '{effect}': {reason}")]
    Playback { effect: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AudioConfig {
    /// Prefix joined with each effect's file name.
    pub base_url: String,
    pub volume: f64,
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { base_url: "sounds/".to_string(), volume: 0.5, enabled: true }
    }
}

impl AudioConfig {
    pub fn url_for(&self, effect: SoundEffect) -> String {
        if self.base_url.is_empty() || self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, effect.file_name())
        } else {
            format!("{}/{}", self.base_url, effect.file_name())
        }
    }
}

/// Platform side of the player.
pub trait SoundBackend {
    fn load(&mut self, effect: SoundEffect, url: &str) -> Result<(), AudioError>;
    /// Enough data buffered to start playback right away.
    fn is_ready(&self, effect: SoundEffect) -> bool;
    fn play(&mut self, effect: SoundEffect, volume: f64) -> Result<(), AudioError>;
    fn release(&mut self, effect: SoundEffect);
    /// Asynchronous load failure (network, decode) reported after `load` accepted the sound.
    fn load_failure(&self, _effect: SoundEffect) -> Option<String> {
        None
    }
}

fn clamp_volume(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

pub struct AudioPlayer<B: SoundBackend> {
    backend: B,
    config: AudioConfig,
    loaded: HashSet<SoundEffect>,
}

impl<B: SoundBackend> AudioPlayer<B> {
    pub fn new(backend: B, config: AudioConfig) -> Self {
        let config = AudioConfig { volume: clamp_volume(config.volume), ..config };
        Self { backend, config, loaded: HashSet::new() }
    }

    /// Starts loading every effect. Returns how many were accepted by the backend.
    pub fn initialize(&mut self) -> usize {
        for effect in SoundEffect::ALL {
            if self.loaded.contains(&effect) {
                continue;
            }
            let url = self.config.url_for(effect);
            match self.backend.load(effect, &url) {
                Ok(()) => {
                    self.loaded.insert(effect);
                }
                Err(e) => log::warn!("{e}"),
            }
        }
        log::info!("audio: {}/{} sounds loading", self.loaded.len(), SoundEffect::ALL.len());
        self.loaded.len()
    }

    /// True once every effect is loaded and buffered.
    pub fn is_ready(&self) -> bool {
        SoundEffect::ALL
            .iter()
            .all(|e| self.loaded.contains(e) && self.backend.is_ready(*e))
    }

    /// Drops sounds whose load failed after `initialize`, warning once per sound.
    /// Returns how many were dropped.
    pub fn check_load_failures(&mut self) -> usize {
        let failed: Vec<(SoundEffect, String)> = self
            .loaded
            .iter()
            .filter_map(|&e| self.backend.load_failure(e).map(|reason| (e, reason)))
            .collect();
        for (effect, reason) in &failed {
            log::warn!("{}", AudioError::Load { effect: effect.name(), reason: reason.clone() });
            self.loaded.remove(effect);
            self.backend.release(*effect);
        }
        failed.len()
    }

    /// Returns whether playback was started.
    pub fn play(&mut self, effect: SoundEffect) -> bool {
        if !self.config.enabled {
            return false;
        }
        self.check_load_failures();
        if !self.loaded.contains(&effect) {
            log::warn!("audio: {}, skipping", AudioError::NotLoaded(effect.name()));
            return false;
        }
        if !self.backend.is_ready(effect) {
            log::warn!("audio: sound '{}' not ready yet, skipping", effect.name());
            return false;
        }
        match self.backend.play(effect, self.config.volume) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    /// Name-based play for the JS side. Unknown names are ignored.
    pub fn play_named(&mut self, name: &str) -> bool {
        match SoundEffect::parse(name) {
            Some(effect) => self.play(effect),
            None => {
                log::warn!("audio: unknown sound '{name}'");
                false
            }
        }
    }

    pub fn play_buy(&mut self) -> bool {
        self.play(SoundEffect::Buy)
    }

    pub fn play_sell(&mut self) -> bool {
        self.play(SoundEffect::Sell)
    }

    pub fn play_reroll(&mut self) -> bool {
        self.play(SoundEffect::Reroll)
    }

    pub fn play_level_up(&mut self) -> bool {
        self.play(SoundEffect::LevelUp)
    }

    pub fn play_star_up(&mut self) -> bool {
        self.play(SoundEffect::StarUp)
    }

    pub fn play_error(&mut self) -> bool {
        self.play(SoundEffect::Error)
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.config.volume = clamp_volume(volume);
    }

    pub fn volume(&self) -> f64 {
        self.config.volume
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Releases every loaded sound. `initialize()` may be called again afterwards.
    pub fn dispose(&mut self) {
        for effect in self.loaded.drain() {
            self.backend.release(effect);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

// HTMLMediaElement.readyState values.
const HAVE_CURRENT_DATA: u16 = 2;

/// `<audio>` element per effect.
pub struct HtmlAudioBackend {
    elements: HashMap<SoundEffect, HtmlAudioElement>,
    // Shared by every play() promise, lives as long as the backend.
    on_reject: Closure<dyn FnMut(JsValue)>,
}

impl HtmlAudioBackend {
    pub fn new() -> Self {
        let on_reject = Closure::<dyn FnMut(JsValue)>::new(|err: JsValue| {
            log::warn!("audio: playback rejected: {}", js_reason(&err));
        });
        Self { elements: HashMap::new(), on_reject }
    }
}

impl Default for HtmlAudioBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn js_reason(v: &JsValue) -> String {
    v.as_string().unwrap_or_else(|| format!("{v:?}"))
}

impl SoundBackend for HtmlAudioBackend {
    fn load(&mut self, effect: SoundEffect, url: &str) -> Result<(), AudioError> {
        let el = HtmlAudioElement::new_with_src(url).map_err(|e| AudioError::Load {
            effect: effect.name(),
            reason: js_reason(&e),
        })?;
        el.set_preload("auto");
        el.load();
        self.elements.insert(effect, el);
        Ok(())
    }

    fn is_ready(&self, effect: SoundEffect) -> bool {
        self.elements
            .get(&effect)
            .is_some_and(|el| el.ready_state() >= HAVE_CURRENT_DATA && el.error().is_none())
    }

    fn play(&mut self, effect: SoundEffect, volume: f64) -> Result<(), AudioError> {
        let el = self
            .elements
            .get(&effect)
            .ok_or(AudioError::NotLoaded(effect.name()))?;
        el.set_volume(volume);
        el.set_current_time(0.0);
        let promise = el.play().map_err(|e| AudioError::Playback {
            effect: effect.name(),
            reason: js_reason(&e),
        })?;
        // Autoplay policy rejections arrive asynchronously.
        let _ = promise.catch(&self.on_reject);
        Ok(())
    }

    fn load_failure(&self, effect: SoundEffect) -> Option<String> {
        let err = self.elements.get(&effect)?.error()?;
        Some(format!("media error code {}", err.code()))
    }

    fn release(&mut self, effect: SoundEffect) {
        if let Some(el) = self.elements.remove(&effect) {
            let _ = el.pause();
            el.set_src("");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeBackend {
        fail_load: Vec<SoundEffect>,
        not_ready: Vec<SoundEffect>,
        fail_play: Vec<SoundEffect>,
        urls: Vec<String>,
        played: Vec<(SoundEffect, f64)>,
        released: Vec<SoundEffect>,
        broken_after_load: Vec<SoundEffect>,
    }

    impl SoundBackend for FakeBackend {
        fn load(&mut self, effect: SoundEffect, url: &str) -> Result<(), AudioError> {
            if self.fail_load.contains(&effect) {
                return Err(AudioError::Load { effect: effect.name(), reason: "404".into() });
            }
            self.urls.push(url.to_string());
            Ok(())
        }

        fn is_ready(&self, effect: SoundEffect) -> bool {
            !self.not_ready.contains(&effect)
        }

        fn play(&mut self, effect: SoundEffect, volume: f64) -> Result<(), AudioError> {
            if self.fail_play.contains(&effect) {
                return Err(AudioError::Playback { effect: effect.name(), reason: "blocked".into() });
            }
            self.played.push((effect, volume));
            Ok(())
        }

        fn release(&mut self, effect: SoundEffect) {
            self.released.push(effect);
        }

        fn load_failure(&self, effect: SoundEffect) -> Option<String> {
            self.broken_after_load
                .contains(&effect)
                .then(|| "decode error".to_string())
        }
    }

    // Per-thread capture so parallel tests see only their own records.
    struct CaptureLogger;

    thread_local! {
        static CAPTURED: std::cell::RefCell<Vec<(log::Level, String)>> =
            const { std::cell::RefCell::new(Vec::new()) };
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            CAPTURED.with(|c| c.borrow_mut().push((record.level(), record.args().to_string())));
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger;

    fn capture_logs() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);
        CAPTURED.with(|c| c.borrow_mut().clear());
    }

    fn captured() -> Vec<(log::Level, String)> {
        CAPTURED.with(|c| c.borrow().clone())
    }

    fn player(backend: FakeBackend) -> AudioPlayer<FakeBackend> {
        AudioPlayer::new(backend, AudioConfig::default())
    }

    #[test]
    fn initialize_tolerates_individual_failures() {
        let mut p = player(FakeBackend { fail_load: vec![SoundEffect::Sell], ..Default::default() });
        assert_eq!(p.initialize(), SoundEffect::ALL.len() - 1);
        assert!(!p.is_ready());
        assert!(!p.play_sell());
        assert!(p.play_buy());
        assert!(p.backend().urls.contains(&"sounds/buy.mp3".to_string()));
    }

    #[test]
    fn play_before_initialize_is_noop() {
        let mut p = player(FakeBackend::default());
        assert!(!p.play(SoundEffect::Reroll));
        assert!(p.backend().played.is_empty());
        p.initialize();
        assert!(p.is_ready());
        assert!(p.play_reroll());
    }

    #[test]
    fn unready_and_failing_sounds_are_skipped() {
        let mut p = player(FakeBackend {
            not_ready: vec![SoundEffect::LevelUp],
            fail_play: vec![SoundEffect::StarUp],
            ..Default::default()
        });
        p.initialize();
        assert!(!p.play_level_up());
        assert!(!p.play_star_up());
        assert!(p.play_error());
        assert_eq!(p.backend().played.len(), 1);
    }

    #[test]
    fn disabled_player_is_silent() {
        let mut p = player(FakeBackend::default());
        p.initialize();
        p.set_enabled(false);
        assert!(!p.is_enabled());
        assert!(!p.play_buy());
        p.set_enabled(true);
        assert!(p.play_buy());
    }

    #[test]
    fn volume_is_clamped_and_forwarded() {
        let mut p = player(FakeBackend::default());
        p.initialize();
        p.set_volume(1.7);
        assert_eq!(p.volume(), 1.0);
        p.set_volume(-0.2);
        assert_eq!(p.volume(), 0.0);
        p.set_volume(f64::NAN);
        assert_eq!(p.volume(), 0.0);
        p.set_volume(0.25);
        p.play_sell();
        assert_eq!(p.backend().played, vec![(SoundEffect::Sell, 0.25)]);
    }

    #[test]
    fn named_play_and_dispose() {
        let mut p = player(FakeBackend::default());
        p.initialize();
        assert!(p.play_named("star_up"));
        assert!(!p.play_named("victory"));
        p.dispose();
        assert_eq!(p.backend().released.len(), SoundEffect::ALL.len());
        assert!(!p.play_named("star_up"));
    }

    #[test]
    fn url_joins_base() {
        let cfg = AudioConfig { base_url: "https://cdn.example/sfx".into(), ..Default::default() };
        assert_eq!(cfg.url_for(SoundEffect::Buy), "https://cdn.example/sfx/buy.mp3");
        let cfg = AudioConfig { base_url: String::new(), ..Default::default() };
        assert_eq!(cfg.url_for(SoundEffect::Error), "error.mp3");
    }

    #[test]
    fn async_load_failure_warns_once_and_skips() {
        capture_logs();
        let mut p = player(FakeBackend { broken_after_load: vec![SoundEffect::Reroll], ..Default::default() });
        assert_eq!(p.initialize(), SoundEffect::ALL.len());
        assert!(!p.play_reroll());
        assert!(!p.play_reroll());
        assert!(p.play_buy());
        assert_eq!(p.backend().released, vec![SoundEffect::Reroll]);
        let load_warnings = captured()
            .into_iter()
            .filter(|(lvl, msg)| *lvl == log::Level::Warn && msg.contains("failed to load sound 'reroll'"))
            .count();
        assert_eq!(load_warnings, 1);
    }

    #[test]
    fn skipped_sounds_warn() {
        capture_logs();
        let mut p = player(FakeBackend { not_ready: vec![SoundEffect::Sell], ..Default::default() });
        assert!(!p.play_buy());
        p.initialize();
        assert!(!p.play_sell());
        let logs = captured();
        assert!(logs.iter().any(|(lvl, msg)| *lvl == log::Level::Warn && msg.contains("'buy' is not loaded")));
        assert!(logs.iter().any(|(lvl, msg)| *lvl == log::Level::Warn && msg.contains("'sell' not ready")));
    }
}
