//! Real platform wiring. The core itself only knows the collaborator
//! traits of `collaborators.rs`; this module supplies the one
//! production-grade implementation this repo ships.

#[cfg(target_os = "windows")]
pub mod win32;
