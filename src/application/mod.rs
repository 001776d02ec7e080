// Application layer - The page enhancer and its seams
pub mod enhancer;
pub mod refresh;
pub mod stats_gateway;
