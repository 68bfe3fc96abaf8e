use crate::config;
use serde::{Deserialize, Serialize};
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Limits {
    pub max_files: usize,
    pub max_total_size: u64,
    pub max_file_size: u64,
    pub max_depth: usize,
}
impl Default for Limits {
    fn default() -> Self {
        Self {
            max_files: config::max_files(),
            max_total_size: config::max_total_size_bytes(),
            max_file_size: config::max_file_size_bytes(),
            max_depth: config::max_directory_depth(),
        }
    }
}
#[derive(Debug, Default)]
pub struct LimitsBuilder {
    limits: Limits,
}
impl LimitsBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn max_files(mut self, count: usize) -> Self {
        self.limits.max_files = count;
        self
    }
    pub fn max_total_size(mut self, bytes: u64) -> Self {
        self.limits.max_total_size = bytes;
        self
    }
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.limits.max_file_size = bytes;
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.limits.max_depth = depth;
        self
    }
    pub fn build(self) -> Limits {
        self.limits
    }
}
