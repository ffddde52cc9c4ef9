use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed reading path {path}")]
    FailedReadingPath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed writing path {path}")]
    FailedWritingPath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Texture file {path} is {found} bytes, expected {expected} for a {width}x{height} texture")]
    TextureSizeMismatch {
        path: String,
        width: u32,
        height: u32,
        expected: u64,
        found: u64,
    },

    #[error("Texture file {path} claims an unaddressable size of {width}x{height}")]
    TextureTooLarge {
        path: String,
        width: u32,
        height: u32,
    },

    #[error("Texture file {path} is too short to contain a header ({found} bytes)")]
    MissingTextureHeader { path: String, found: u64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ticks per second limit must be greater than zero")]
    ZeroTickRate,

    #[error("image size {width}x{height} has a zero dimension")]
    EmptyImage { width: u32, height: u32 },

    #[error("quit key must not be empty")]
    EmptyQuitKey,

    #[error("collision matrix must be square, row {row} has {len} entries for {size} types")]
    NonSquareCollisionMatrix { row: usize, len: usize, size: usize },
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to spawn the input reader thread")]
    SpawnFailed(#[source] std::io::Error),
}
