// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Installed hook scripts record the version that generated them.
    EmitBuilder::builder()
        .build_date()
        .git_sha(true)
        .git_commit_date()
        .emit()?;
    Ok(())
}
