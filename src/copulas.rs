//! # Copulas
//!
//! $$
//! F(y_1,\dots,y_k)=C\big(F_1(y_1),\dots,F_k(y_k)\big)
//! $$
//!
pub mod archimedean;
pub mod boundary;
pub mod correlation;
pub mod independence;
pub mod joint;

pub use archimedean::clayton::Clayton;
pub use archimedean::frank::Frank;
pub use archimedean::gumbel::Gumbel;
pub use independence::Independence;
pub use joint::JointDistribution;
