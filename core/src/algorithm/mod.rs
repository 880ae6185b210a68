//! FLUX Algorithm Framework
//! Maximum-flow computation with capacity scaling and preflow optimization
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod flow;
pub mod traits;

pub use self::flow::*;
pub use self::traits::*;
