pub mod bfs;
pub mod bidirectional;
pub mod common;
pub mod dfs;
pub mod dls;
pub mod iddfs;
pub mod ucs;
