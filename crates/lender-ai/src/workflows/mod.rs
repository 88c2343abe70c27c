pub mod credit;
pub mod qualification;
