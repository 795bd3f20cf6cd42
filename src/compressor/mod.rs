//! 공기압축기 에너지/손실 계산 모듈 모음.

pub mod compressor_type;
pub mod energy;
pub mod estimator;
pub mod loss_breakdown;
pub mod loss_profile;

pub use compressor_type::*;
pub use energy::*;
pub use estimator::*;
pub use loss_breakdown::*;
pub use loss_profile::*;
