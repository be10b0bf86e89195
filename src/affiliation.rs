/// Index of a flow within its [`Level`](crate::Level), in the order its termini were declared.
pub type FlowId = usize;

/// An RGB flow color.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The `index`th color of [`PALETTE`], cycling once the palette runs out.
    pub fn from_palette(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }
}

/// Flow colors in the order they are handed out to the termini of a level.
pub const PALETTE: [Color; 7] = [
    Color::rgb(255, 0, 0),
    Color::rgb(255, 255, 0),
    Color::rgb(0, 255, 0),
    Color::rgb(0, 0, 255),
    Color::rgb(0, 255, 255),
    Color::rgb(255, 124, 0),
    Color::rgb(140, 35, 163),
];

/// The letter used for a flow when a board is printed: `A` for the first flow, `B` for the second, and so on.
pub(crate) fn display_of(flow: FlowId) -> char {
    (b'A' + (flow % 26) as u8) as char
}
