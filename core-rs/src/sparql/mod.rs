/**
 * sparql module
 *
 * - assembler: CONSTRUCT query assembly from factory-supplied fragments
 */

pub mod assembler;

pub use assembler::{ConstructQuery, SubjectScope};
