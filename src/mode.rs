//! Modes: controllers that rotate among scenes or show externally supplied frames

use rand::Rng;
use rand::seq::IteratorRandom;

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::scene::Scene;
use crate::sprite::GameKeys;

/// Shortest time a scene stays on screen before rotating, in frames
pub const MIN_SCENE_FRAMES: i32 = 400;
/// Upper bound (exclusive) of the time a scene stays on screen, in frames
pub const MAX_SCENE_FRAMES: i32 = 800;

/// Mode rotating at random among a fixed repertoire of scenes
///
/// Starts idle with no scene selected. Each call to [`SceneMode::next_scene`]
/// picks a scene other than the current one and gives it between
/// [`MIN_SCENE_FRAMES`] and [`MAX_SCENE_FRAMES`] frames of screen time.
#[derive(Debug, Clone)]
pub struct SceneMode {
    scenes: Vec<Scene>,
    current: Option<usize>,
    remaining_frames: i32,
}

impl SceneMode {
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self {
            scenes,
            current: None,
            remaining_frames: 0,
        }
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        self.current.and_then(|index| self.scenes.get(index))
    }

    pub const fn remaining_frames(&self) -> i32 {
        self.remaining_frames
    }

    /// Switch to a random scene other than the active one
    ///
    /// A mode whose only scene is already active stays on it. Returns the
    /// name of the scene that is active afterwards.
    pub fn next_scene(&mut self) -> Option<&'static str> {
        let mut rng = rand::thread_rng();
        let candidate = (0..self.scenes.len())
            .filter(|&index| Some(index) != self.current)
            .choose(&mut rng);
        let Some(index) = candidate else {
            return self.current_scene().map(Scene::name);
        };

        self.current = Some(index);
        self.remaining_frames = rng.gen_range(MIN_SCENE_FRAMES..MAX_SCENE_FRAMES);
        let name = self.scenes[index].name();
        tracing::info!(scene = name, frames = self.remaining_frames, "switched scene");
        Some(name)
    }

    pub fn step(&mut self) {
        self.remaining_frames = self.remaining_frames.saturating_sub(1);
        if self.remaining_frames <= 0 {
            self.next_scene();
        }
        if let Some(scene) = self.current.and_then(|index| self.scenes.get_mut(index)) {
            scene.step();
        }
    }

    pub fn render(&mut self, canvas: &mut Canvas<'_>) {
        if let Some(scene) = self.current.and_then(|index| self.scenes.get_mut(index)) {
            scene.render(canvas);
        }
    }

    pub fn handle_game_keys(&mut self, keys: GameKeys) -> bool {
        self.current
            .and_then(|index| self.scenes.get_mut(index))
            .is_some_and(|scene| scene.handle_game_keys(keys))
    }
}

/// Mode that shows frames pushed from outside
///
/// Each staged frame is drawn exactly once. Without a new frame, render
/// leaves the canvas untouched.
#[derive(Debug, Clone, Default)]
pub struct SlaveMode {
    pixels: Option<Vec<Rgb>>,
}

impl SlaveMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame for the next render, replacing any frame not yet shown
    pub fn stage(&mut self, pixels: Vec<Rgb>) {
        self.pixels = Some(pixels);
    }

    pub const fn has_pending_frame(&self) -> bool {
        self.pixels.is_some()
    }

    pub fn render(&mut self, canvas: &mut Canvas<'_>) {
        if let Some(pixels) = self.pixels.take() {
            canvas.copy_from(&pixels);
        }
    }
}

/// Mode slot - enum containing all mode kinds
#[derive(Debug, Clone)]
pub enum ModeSlot {
    Scenes(SceneMode),
    Slave(SlaveMode),
}

impl ModeSlot {
    pub fn next_scene(&mut self) -> Option<&'static str> {
        match self {
            Self::Scenes(mode) => mode.next_scene(),
            Self::Slave(_) => None,
        }
    }

    pub fn step(&mut self) {
        match self {
            Self::Scenes(mode) => mode.step(),
            Self::Slave(_) => {}
        }
    }

    pub fn render(&mut self, canvas: &mut Canvas<'_>) {
        match self {
            Self::Scenes(mode) => mode.render(canvas),
            Self::Slave(mode) => mode.render(canvas),
        }
    }

    pub fn handle_game_keys(&mut self, keys: GameKeys) -> bool {
        match self {
            Self::Scenes(mode) => mode.handle_game_keys(keys),
            Self::Slave(_) => false,
        }
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        match self {
            Self::Scenes(mode) => mode.current_scene(),
            Self::Slave(_) => None,
        }
    }

    pub const fn is_slave(&self) -> bool {
        matches!(self, Self::Slave(_))
    }
}

/// The standing modes a frame state switches between
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeId {
    Empty,
    Attract,
    Game,
    Slave,
    /// Built from the scene or sprite named on the command line
    Custom,
}

impl ModeId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Attract => "attract",
            Self::Game => "game",
            Self::Slave => "slave",
            Self::Custom => "custom",
        }
    }
}
