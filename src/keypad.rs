use {
    crate::*,
    glam::IVec2,
    nom::{combinator::verify, IResult},
    static_assertions::const_assert,
    strum::{EnumIter, IntoEnumIterator},
};

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Default, EnumIter, Eq, Hash, Ord, PartialEq, PartialOrd)]
    pub enum Key {
        #[default]
        Activate = ACTIVATE = b'A',
        Zero = ZERO = b'0',
        One = ONE = b'1',
        Two = TWO = b'2',
        Three = THREE = b'3',
        Four = FOUR = b'4',
        Five = FIVE = b'5',
        Six = SIX = b'6',
        Seven = SEVEN = b'7',
        Eight = EIGHT = b'8',
        Nine = NINE = b'9',
        Up = UP = b'^',
        Down = DOWN = b'v',
        Left = LEFT = b'<',
        Right = RIGHT = b'>',
    }
}

impl Key {
    pub fn parse_digit<'i>(input: &'i str) -> IResult<&'i str, Self> {
        verify(Self::parse, |key: &Key| key.is_digit())(input)
    }

    pub fn parse_activate<'i>(input: &'i str) -> IResult<&'i str, Self> {
        verify(Self::parse, |&key: &Key| key == Self::Activate)(input)
    }

    pub fn string_from_iter<I: Iterator<Item = Key>>(iter: I) -> String {
        iter.map(|key| key as u8 as char).collect()
    }

    pub fn try_digit(self) -> Option<u8> {
        match self as u8 {
            Self::ZERO..=Self::NINE => Some(self as u8 - Self::ZERO),
            _ => None,
        }
    }

    pub fn is_digit(self) -> bool {
        self.try_digit().is_some()
    }

    /// The unit step an arrow key commands, `None` for digits and `A`.
    pub fn try_step(self) -> Option<IVec2> {
        match self {
            Self::Up => Some(IVec2::NEG_Y),
            Self::Down => Some(IVec2::Y),
            Self::Left => Some(IVec2::NEG_X),
            Self::Right => Some(IVec2::X),
            _ => None,
        }
    }
}

/// One of the two physical keypad layouts.
///
/// Positions are keypad-local, `(column, row)`, with `y` growing downward. Each layout has exactly
/// one gap cell, which no arm may ever point at.
#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq)]
pub enum Pad {
    Numeric,
    Directional,
}

impl Pad {
    const NUMERIC_DIMENSIONS: IVec2 = IVec2::new(3_i32, 4_i32);
    const NUMERIC_GAP: IVec2 = IVec2::new(0_i32, 3_i32);
    const DIRECTIONAL_DIMENSIONS: IVec2 = IVec2::new(3_i32, 2_i32);
    const DIRECTIONAL_GAP: IVec2 = IVec2::ZERO;

    pub const fn dimensions(self) -> IVec2 {
        match self {
            Self::Numeric => Self::NUMERIC_DIMENSIONS,
            Self::Directional => Self::DIRECTIONAL_DIMENSIONS,
        }
    }

    pub const fn gap(self) -> IVec2 {
        match self {
            Self::Numeric => Self::NUMERIC_GAP,
            Self::Directional => Self::DIRECTIONAL_GAP,
        }
    }

    /// The `A` cell, where every robot arm rests between commands.
    pub const fn activate_position(self) -> IVec2 {
        match self {
            Self::Numeric => IVec2::new(2_i32, 3_i32),
            Self::Directional => IVec2::new(2_i32, 0_i32),
        }
    }

    pub fn is_gap(self, pos: IVec2) -> bool {
        pos == self.gap()
    }

    pub fn contains(self, pos: IVec2) -> bool {
        pos.cmpge(IVec2::ZERO).all() && pos.cmplt(self.dimensions()).all() && !self.is_gap(pos)
    }

    pub fn position_of(self, key: Key) -> Result<IVec2, InvalidKey> {
        match self {
            Self::Numeric => match key as u8 {
                Key::ONE..=Key::NINE => {
                    let index: i32 = (key as u8 - Key::ONE) as i32;

                    Ok(IVec2::new(index % 3_i32, 2_i32 - index / 3_i32))
                }
                Key::ZERO => Ok(IVec2::new(1_i32, 3_i32)),
                Key::ACTIVATE => Ok(self.activate_position()),
                _ => Err(InvalidKey { key, pad: self }),
            },
            Self::Directional => match key {
                Key::Up => Ok(IVec2::new(1_i32, 0_i32)),
                Key::Activate => Ok(self.activate_position()),
                Key::Left => Ok(IVec2::new(0_i32, 1_i32)),
                Key::Down => Ok(IVec2::new(1_i32, 1_i32)),
                Key::Right => Ok(IVec2::new(2_i32, 1_i32)),
                _ => Err(InvalidKey { key, pad: self }),
            },
        }
    }

    pub fn iter_keys(self) -> impl Iterator<Item = Key> {
        Key::iter().filter(move |&key| self.position_of(key).is_ok())
    }
}

// Both gaps sit in a corner of their layout
const_assert!(Pad::NUMERIC_GAP.x == 0_i32);
const_assert!(Pad::NUMERIC_GAP.y == Pad::NUMERIC_DIMENSIONS.y - 1_i32);
const_assert!(Pad::DIRECTIONAL_GAP.x == 0_i32 && Pad::DIRECTIONAL_GAP.y == 0_i32);

/// A key symbol that is not present on the pad it was requested from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidKey {
    pub key: Key,
    pub pad: Pad,
}

/// A run of identical arrow presses.
#[cfg_attr(test, derive(Debug))]
#[derive(Clone, Copy, PartialEq)]
pub struct Run {
    pub key: Key,
    pub count: u8,
}

/// The unordered moves between two cells: a horizontal run plus a vertical run.
///
/// Which of the two runs goes first (or how they interleave) is deliberately left open; see
/// `search::valid_orderings`.
#[cfg_attr(test, derive(Debug))]
#[derive(Clone, Copy, PartialEq)]
pub struct MoveSet {
    horizontal: Run,
    vertical: Run,
}

impl MoveSet {
    pub fn between(from: IVec2, to: IVec2) -> Self {
        let delta: IVec2 = to - from;

        Self {
            horizontal: Run {
                key: if delta.x > 0_i32 { Key::Right } else { Key::Left },
                count: delta.x.unsigned_abs() as u8,
            },
            vertical: Run {
                key: if delta.y > 0_i32 { Key::Down } else { Key::Up },
                count: delta.y.unsigned_abs() as u8,
            },
        }
    }

    /// The Manhattan distance between the two cells.
    pub fn len(self) -> usize {
        self.horizontal.count as usize + self.vertical.count as usize
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0_usize
    }

    pub fn runs(self) -> [Run; 2_usize] {
        [self.horizontal, self.vertical]
    }
}
