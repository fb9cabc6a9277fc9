pub use {code::*, keypad::*, search::*, util::*};

pub mod code;
pub mod keypad;
pub mod search;
pub mod util;
