use serenity::all::Colour;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colors {
    Info = 0x0773D6,
    Success = 0x3BD65D,
    Warning = 0xF0D932,
    Error = 0xFC1F28,
}

impl From<Colors> for Colour {
    fn from(value: Colors) -> Self {
        Colour(value as u32)
    }
}
