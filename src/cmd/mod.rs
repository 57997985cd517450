/// Whole-document JSON dump command.
pub mod dump;
/// Header and statistics command.
pub mod info;
/// Decode/encode fidelity check command.
pub mod roundtrip;
/// Template capture writer command.
pub mod template;
/// Tree listing command.
pub mod walk;

mod util;
