use derive_more::Display;

/// One of the six candy kinds that can occupy a board cell.
///
/// The set is fixed: match detection compares kinds for equality and the
/// board generator draws uniformly from [`TokenKind::ALL`]. The label and hue
/// carried by each kind are plain data for a presentation layer; the engine
/// never interprets them.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    /// Orange candy.
    Orange,
    /// Lime candy.
    Lime,
    /// Berry candy.
    Berry,
    /// Lemon candy.
    Lemon,
    /// Sky candy.
    Sky,
    /// Cherry candy.
    Cherry,
}

impl TokenKind {
    /// Array containing every token kind, in drawing order.
    pub const ALL: [Self; 6] = [
        Self::Orange,
        Self::Lime,
        Self::Berry,
        Self::Lemon,
        Self::Sky,
        Self::Cherry,
    ];

    /// Human-readable label for this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Orange => "Orange",
            Self::Lime => "Lime",
            Self::Berry => "Berry",
            Self::Lemon => "Lemon",
            Self::Sky => "Sky",
            Self::Cherry => "Cherry",
        }
    }

    /// Display hue (degrees) for this kind.
    #[must_use]
    pub const fn hue(self) -> u16 {
        match self {
            Self::Orange => 24,
            Self::Lime => 132,
            Self::Berry => 290,
            Self::Lemon => 55,
            Self::Sky => 200,
            Self::Cherry => 350,
        }
    }

    /// Single-character code used by the board text format.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Orange => 'o',
            Self::Lime => 'l',
            Self::Berry => 'b',
            Self::Lemon => 'm',
            Self::Sky => 's',
            Self::Cherry => 'c',
        }
    }

    /// Parses a single-character code back into a kind.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

/// A source of freshly drawn token kinds.
///
/// Gravity refill and board generation both consume tokens through this
/// trait, so the randomized implementation lives outside the core crate and
/// tests can substitute a deterministic sequence.
pub trait TokenSource {
    /// Draws the next token kind.
    fn next_token(&mut self) -> TokenKind;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> TokenKind {
        (**self).next_token()
    }
}
