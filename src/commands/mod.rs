// ABOUTME: Command module aggregator for the lad CLI.
// ABOUTME: Each command drives one Deployer operation and reports through Output.

mod auto;
mod canary;
mod deploy;
mod promote;
mod rollback;
mod status;
mod switch;

pub use auto::auto;
pub use canary::canary;
pub use deploy::deploy;
pub use promote::promote;
pub use rollback::rollback;
pub use status::status;
pub use switch::switch;

use lad::diagnostics::Diagnostics;
use lad::output::Output;

/// Print warnings collected while the command ran.
fn emit_warnings(output: &Output, diag: &Diagnostics) {
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }
}
