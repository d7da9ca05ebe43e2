mod ping;

pub use ping::*;
