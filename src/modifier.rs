use bitflags::bitflags;

bitflags! {
    /// Global post-processing toggles applied after the active mode renders
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        /// Freeze the buffer: no clear, no render
        const STOP = 1 << 0;
        /// Blank output: clear but do not render
        const OFF = 1 << 1;
        /// Reverse pixel order
        const REVERSE = 1 << 2;
        /// Rotate the buffer by a growing offset until the spin limit
        const SPIN = 1 << 3;
    }
}

impl Modifiers {
    /// Whether the active mode should render this frame
    pub const fn renders(self) -> bool {
        !self.intersects(Self::STOP.union(Self::OFF))
    }
}
