//! State owned by the frame scheduler: the standing modes, which one is
//! active, and the global modifier flags.
//!
//! Every control message is routed here. Nothing in this module is shared
//! across threads.

use tracing::{info, warn};

use crate::canvas::Canvas;
use crate::color::{BLACK, Rgb};
use crate::geometry::Geometry;
use crate::message::{Action, ControlMessage};
use crate::mode::{ModeId, ModeSlot, SceneMode, SlaveMode};
use crate::modifier::Modifiers;
use crate::scene::SceneId;
use crate::sprite::{GameKey, GameKeys};

/// Default spin advance per frame, in pixels
pub const DEFAULT_SPIN_STEP: usize = 12;
/// Default cumulative spin offset at which spinning stops
pub const DEFAULT_SPIN_LIMIT: usize = 450;

/// The modes a frame state can switch between
#[derive(Debug, Clone)]
pub struct ModeSet {
    empty: ModeSlot,
    attract: ModeSlot,
    game: ModeSlot,
    slave: ModeSlot,
    custom: Option<ModeSlot>,
}

impl ModeSet {
    /// Standing modes with freshly built scenes
    pub fn new(geometry: &Geometry) -> Self {
        let attract = SceneId::ATTRACT
            .iter()
            .map(|id| id.build(geometry))
            .collect();
        Self {
            empty: ModeSlot::Scenes(SceneMode::new(Vec::new())),
            attract: ModeSlot::Scenes(SceneMode::new(attract)),
            game: ModeSlot::Scenes(SceneMode::new(vec![SceneId::Game.build(geometry)])),
            slave: ModeSlot::Slave(SlaveMode::new()),
            custom: None,
        }
    }

    /// Add a mode built from an explicitly requested scene or sprite
    #[must_use]
    pub fn with_custom(mut self, mode: SceneMode) -> Self {
        self.custom = Some(ModeSlot::Scenes(mode));
        self
    }

    pub fn get(&self, id: ModeId) -> Option<&ModeSlot> {
        match id {
            ModeId::Empty => Some(&self.empty),
            ModeId::Attract => Some(&self.attract),
            ModeId::Game => Some(&self.game),
            ModeId::Slave => Some(&self.slave),
            ModeId::Custom => self.custom.as_ref(),
        }
    }

    pub fn get_mut(&mut self, id: ModeId) -> Option<&mut ModeSlot> {
        match id {
            ModeId::Empty => Some(&mut self.empty),
            ModeId::Attract => Some(&mut self.attract),
            ModeId::Game => Some(&mut self.game),
            ModeId::Slave => Some(&mut self.slave),
            ModeId::Custom => self.custom.as_mut(),
        }
    }
}

/// Active mode plus the global modifiers
pub struct FrameState {
    modes: ModeSet,
    strip_len: usize,
    active: Option<ModeId>,
    modifiers: Modifiers,
    spin: usize,
    spin_step: usize,
    spin_limit: usize,
}

impl FrameState {
    /// Create a state with no mode selected; call [`FrameState::select_mode`] to start
    pub fn new(modes: ModeSet, strip_len: usize) -> Self {
        Self {
            modes,
            strip_len,
            active: None,
            modifiers: Modifiers::empty(),
            spin: 0,
            spin_step: DEFAULT_SPIN_STEP,
            spin_limit: DEFAULT_SPIN_LIMIT,
        }
    }

    #[must_use]
    pub fn with_spin(mut self, step: usize, limit: usize) -> Self {
        self.spin_step = step;
        self.spin_limit = limit;
        self
    }

    pub const fn active_mode(&self) -> Option<ModeId> {
        self.active
    }

    pub fn mode(&self) -> Option<&ModeSlot> {
        self.active.and_then(|id| self.modes.get(id))
    }

    pub fn modes(&self) -> &ModeSet {
        &self.modes
    }

    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub const fn spin_offset(&self) -> usize {
        self.spin
    }

    /// Whether frames come from outside and must not be paced locally
    pub fn is_slave(&self) -> bool {
        self.mode().is_some_and(ModeSlot::is_slave)
    }

    /// Activate a mode and start its first scene
    ///
    /// Returns `false` if the mode is already active or was never configured.
    pub fn select_mode(&mut self, id: ModeId) -> bool {
        if self.active == Some(id) {
            return false;
        }
        let Some(mode) = self.modes.get_mut(id) else {
            warn!(mode = id.as_str(), "mode is not configured");
            return false;
        };
        info!(mode = id.as_str(), "switching mode");
        mode.next_scene();
        self.active = Some(id);
        true
    }

    pub fn next_scene(&mut self) {
        if let Some(mode) = self.active_mut() {
            mode.next_scene();
        }
    }

    pub fn handle_message(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::Action(action) => self.handle_action(action),
            ControlMessage::Ping => info!("pong"),
            ControlMessage::PixelFrame(pixels) => self.stage_pixels(pixels),
            ControlMessage::GameKey { key, pressed } => self.handle_game_key(key, pressed),
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Next => {
                self.modifiers.remove(Modifiers::STOP | Modifiers::OFF);
                self.next_scene();
            }
            Action::Toggle => {
                let target = if self.active == Some(ModeId::Empty) {
                    ModeId::Attract
                } else {
                    ModeId::Empty
                };
                self.select_mode(target);
                self.next_scene();
            }
            Action::Off => self.modifiers.insert(Modifiers::OFF),
            Action::Stop => self.modifiers.insert(Modifiers::STOP),
            Action::Start | Action::Resume | Action::On => {
                self.modifiers.remove(Modifiers::STOP | Modifiers::OFF);
            }
            Action::Reverse => self.modifiers.insert(Modifiers::REVERSE),
            Action::Spin => {
                self.modifiers.insert(Modifiers::SPIN);
                self.spin = 0;
            }
        }
    }

    fn handle_game_key(&mut self, key: GameKey, pressed: bool) {
        self.modifiers.remove(Modifiers::STOP | Modifiers::OFF);
        self.select_mode(ModeId::Game);
        if let Some(mode) = self.active_mut() {
            mode.handle_game_keys(GameKeys::only(key, pressed));
        }
    }

    fn stage_pixels(&mut self, mut pixels: Vec<Rgb>) {
        if pixels.len() != self.strip_len {
            warn!(
                expected = self.strip_len,
                received = pixels.len(),
                "pixel frame has wrong length"
            );
            pixels.resize(self.strip_len, BLACK);
        }
        self.select_mode(ModeId::Slave);
        if let Some(ModeSlot::Slave(slave)) = self.modes.get_mut(ModeId::Slave) {
            slave.stage(pixels);
        }
    }

    fn active_mut(&mut self) -> Option<&mut ModeSlot> {
        self.active.and_then(|id| self.modes.get_mut(id))
    }

    /// Clear unless stopped, then render and step unless stopped or off
    pub fn draw(&mut self, canvas: &mut Canvas<'_>) {
        if !self.modifiers.contains(Modifiers::STOP) {
            canvas.clear();
        }
        if self.modifiers.renders() {
            if let Some(mode) = self.active_mut() {
                mode.render(canvas);
                mode.step();
            }
        }
    }

    /// Apply spin then reverse to a rendered buffer
    pub fn apply_modifiers(&mut self, pixels: &mut [Rgb]) {
        if self.modifiers.contains(Modifiers::SPIN) {
            if !pixels.is_empty() {
                pixels.rotate_left(self.spin % pixels.len());
            }
            self.spin += self.spin_step;
            if self.spin >= self.spin_limit {
                self.modifiers.remove(Modifiers::SPIN);
            }
        }
        if self.modifiers.contains(Modifiers::REVERSE) {
            pixels.reverse();
        }
    }
}
