// Hanfe Hangul Composition
// Jamo tables and the incremental syllable composer

mod composer;
pub mod tables;

pub use composer::{Composer, CompositionResult, JamoRole};
