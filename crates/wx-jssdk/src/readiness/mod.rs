mod gate;
mod signature;

pub use {
    gate::{ReadinessGate, ReadinessState},
    signature::{Signature, SignatureProvider},
};
