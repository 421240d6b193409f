//! Built-in SIEVE commands.
pub mod actions;
pub mod control;
pub mod log;
pub mod vacation;

use crate::engine::Engine;

/// Registers every built-in command on `engine`.
pub fn register_builtins(engine: &mut Engine) {
    engine.register_command("require", control::Require);
    engine.register_command("if", control::If);
    engine.register_command("elsif", control::ElsIf);
    engine.register_command("else", control::Else);
    engine.register_command("stop", control::Stop);

    engine.register_command("keep", actions::Keep);
    engine.register_command("discard", actions::Discard);
    engine.register_command("redirect", actions::Redirect);
    engine.register_command_extension("fileinto", "fileinto", actions::FileInto);
    engine.register_command_extension("reject", "reject", actions::Reject);

    engine.register_command_extension("vacation", "vacation", vacation::VacationCommand);
    engine.register_command_extension("log", "log", log::Log);
}
