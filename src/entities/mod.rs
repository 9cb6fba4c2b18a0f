// Entity Models
//
// Records are plain values: built once when a directory is loaded and never
// mutated afterwards.

pub mod account;

pub use account::AccountRecord;
