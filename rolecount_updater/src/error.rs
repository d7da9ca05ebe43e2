use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// No total, verification or tracked role channel is bound
    #[error("There are no channels configured for renaming")]
    NothingToUpdate,

    #[error(transparent)]
    Snapshot(#[from] rolecount_cache::Error),

    #[error(transparent)]
    Serenity(#[from] serenity::Error),
}

pub type Result<T> = ::core::result::Result<T, Error>;
