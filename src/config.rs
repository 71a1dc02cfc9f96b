//! Engine configuration

/// Tunables for a game against the engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Transposition table budget in bytes
    pub tt_size_bytes: usize,
    /// Thinking time per engine move, in seconds
    pub search_seconds: u64,
    /// Side the engine plays
    pub engine_is_white: bool,
    /// Deepest iteration the search will start
    pub max_depth: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tt_size_bytes: 64_000_000,
            search_seconds: 3,
            engine_is_white: false,
            max_depth: 64,
        }
    }
}

impl EngineConfig {
    pub fn with_tt_size_bytes(mut self, bytes: usize) -> Self {
        self.tt_size_bytes = bytes;
        self
    }

    pub fn with_search_seconds(mut self, seconds: u64) -> Self {
        self.search_seconds = seconds;
        self
    }

    pub fn with_engine_is_white(mut self, white: bool) -> Self {
        self.engine_is_white = white;
        self
    }

    pub fn with_max_depth(mut self, depth: i32) -> Self {
        self.max_depth = depth.max(1);
        self
    }
}
