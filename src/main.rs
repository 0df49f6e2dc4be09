// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

use blurb::{Cli, action_from_cli, run};

#[cu::cli(flags = "common")]
async fn main(args: Cli) -> cu::Result<()> {
    let result = run(action_from_cli(args)?)?;

    if result.is_err() {
        cu::bailfyi!("some inputs could not be processed.");
    }

    Ok(())
}
